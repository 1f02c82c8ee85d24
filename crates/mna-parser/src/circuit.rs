use crate::analyses::AnalysisConfig;
use crate::prelude::*;

/// The wire format handed from `mna-parser` to `mna_core::circuit::Circuit`:
/// an unresolved device list plus the directives that govern how they are
/// simulated. Node references are still plain names here; resolving them to
/// ids, picking ground, and wiring CCCS/CCVS sample branches is the core's
/// job, not the parser's.
#[derive(Debug, Clone)]
pub struct ParsedCircuit {
    pub elements: Vec<Element>,
    pub analysis: AnalysisConfig,
}

impl ParsedCircuit {
    pub fn new(elements: Vec<Element>, analysis: AnalysisConfig) -> Self {
        ParsedCircuit { elements, analysis }
    }

    pub fn empty() -> Self {
        ParsedCircuit {
            elements: Vec::new(),
            analysis: AnalysisConfig::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
