/// The time-stepping formula the transient engine should use once enough
/// history has accumulated to support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationMethod {
    BackwardEuler,
    Trapezoidal,
    Gear2,
}

impl Default for IntegrationMethod {
    /// An unrecognized `.method` keyword falls back to this rather than
    /// aborting the parse.
    fn default() -> Self {
        IntegrationMethod::Gear2
    }
}

/// A `.pz <in> <out> <order>` request: compute the transfer function from
/// `input_node` to `output_node` with a denominator of degree `order`.
#[derive(Debug, Clone)]
pub struct PoleZeroRequest {
    pub input_node: String,
    pub output_node: String,
    pub order: usize,
}

/// Everything the netlist's analysis directives (`.tran`, `.pz`, `.ground`,
/// `.method`) contribute, independent of the device list itself.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub method: IntegrationMethod,
    pub tick: f64,
    pub sim_end: f64,
    pub ground_net: Option<String>,
    pub pole_zero: Option<PoleZeroRequest>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            method: IntegrationMethod::default(),
            tick: 1e-6,
            sim_end: 1e-3,
            ground_net: None,
            pole_zero: None,
        }
    }
}
