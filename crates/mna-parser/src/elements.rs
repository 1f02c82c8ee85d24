use crate::prelude::*;

pub mod capacitor;
pub mod cccs;
pub mod ccvs;
pub mod current_source;
pub mod inductor;
pub mod resistor;
pub mod source_value;
pub mod vccs;
pub mod vcvs;
pub mod voltage_source;

/// Represents any component that can be included in a circuit netlist.
#[derive(Debug, Clone)]
pub enum Element {
    VoltageSource(voltage_source::VoltageSource),
    CurrentSource(current_source::CurrentSource),
    Resistor(resistor::Resistor),
    Capacitor(capacitor::Capacitor),
    Inductor(inductor::Inductor),
    Vcvs(vcvs::Vcvs),
    Vccs(vccs::Vccs),
    Ccvs(ccvs::Ccvs),
    Cccs(cccs::Cccs),
}

/// A macro to forward a method call to the correct inner element struct.
/// This reduces boilerplate code for the `Element` enum wrappers.
macro_rules! dispatch {
    ($self:expr, $method:ident($($args:expr),*)) => {
        match $self {
            Element::VoltageSource(e) => e.$method($($args),*),
            Element::CurrentSource(e) => e.$method($($args),*),
            Element::Resistor(e) => e.$method($($args),*),
            Element::Capacitor(e) => e.$method($($args),*),
            Element::Inductor(e) => e.$method($($args),*),
            Element::Vcvs(e) => e.$method($($args),*),
            Element::Vccs(e) => e.$method($($args),*),
            Element::Ccvs(e) => e.$method($($args),*),
            Element::Cccs(e) => e.$method($($args),*),
        }
    };
}

impl From<voltage_source::VoltageSource> for Element {
    fn from(item: voltage_source::VoltageSource) -> Self {
        Element::VoltageSource(item)
    }
}
impl From<current_source::CurrentSource> for Element {
    fn from(item: current_source::CurrentSource) -> Self {
        Element::CurrentSource(item)
    }
}
impl From<resistor::Resistor> for Element {
    fn from(item: resistor::Resistor) -> Self {
        Element::Resistor(item)
    }
}
impl From<capacitor::Capacitor> for Element {
    fn from(item: capacitor::Capacitor) -> Self {
        Element::Capacitor(item)
    }
}
impl From<inductor::Inductor> for Element {
    fn from(item: inductor::Inductor) -> Self {
        Element::Inductor(item)
    }
}
impl From<vcvs::Vcvs> for Element {
    fn from(item: vcvs::Vcvs) -> Self {
        Element::Vcvs(item)
    }
}
impl From<vccs::Vccs> for Element {
    fn from(item: vccs::Vccs) -> Self {
        Element::Vccs(item)
    }
}
impl From<ccvs::Ccvs> for Element {
    fn from(item: ccvs::Ccvs) -> Self {
        Element::Ccvs(item)
    }
}
impl From<cccs::Cccs> for Element {
    fn from(item: cccs::Cccs) -> Self {
        Element::Cccs(item)
    }
}

impl Element {
    /// Retrieves the terminal nodes associated with the element. For
    /// controlled sources this includes the sample nodes used to resolve the
    /// controlling branch, since the index map must see every node an
    /// element touches.
    pub fn nodes(&self) -> Vec<&str> {
        match self {
            Element::VoltageSource(v) => vec![&v.plus, &v.minus],
            Element::CurrentSource(i) => vec![&i.plus, &i.minus],
            Element::Resistor(r) => vec![&r.plus, &r.minus],
            Element::Capacitor(c) => vec![&c.plus, &c.minus],
            Element::Inductor(l) => vec![&l.plus, &l.minus],
            Element::Vcvs(e) => vec![&e.plus, &e.minus, &e.pos_sample, &e.neg_sample],
            Element::Vccs(e) => vec![&e.plus, &e.minus, &e.pos_sample, &e.neg_sample],
            Element::Ccvs(e) => vec![&e.plus, &e.minus, &e.pos_sample, &e.neg_sample],
            Element::Cccs(e) => vec![&e.plus, &e.minus, &e.pos_sample, &e.neg_sample],
        }
    }

    /// Determines whether this element is voltage-defined and therefore
    /// requires a dedicated branch-current row in the MNA system, rather than
    /// being eliminated into the conductance matrix alone.
    pub fn is_branch_device(&self) -> bool {
        matches!(
            self,
            Element::VoltageSource(_)
                | Element::Inductor(_)
                | Element::Vcvs(_)
                | Element::Ccvs(_)
        )
    }

    /// Current-controlled sources (CCCS, CCVS) sample the branch current of
    /// another device via a pair of sense nodes rather than naming it
    /// directly; this returns that pair when applicable.
    pub fn sample_nodes(&self) -> Option<(&str, &str)> {
        match self {
            Element::Ccvs(e) => Some((&e.pos_sample, &e.neg_sample)),
            Element::Cccs(e) => Some((&e.pos_sample, &e.neg_sample)),
            _ => None,
        }
    }
}

/// A trait for elements that have a unique string identifier.
pub trait Identifiable {
    fn identifier(&self) -> String;
}

impl Identifiable for Element {
    fn identifier(&self) -> String {
        dispatch!(self, identifier())
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}
