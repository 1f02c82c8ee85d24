use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The assembled MNA matrix was singular where the ground-omission rule
    /// guarantees it should not be; indicates a construction bug, not a bad
    /// netlist.
    #[error("singular matrix during {0}")]
    Singular(&'static str),

    /// A stamping or solve routine was handed vectors/matrices of
    /// mismatched dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A `RootSolver` caller registered a different number of functions
    /// than Jacobian entries, or a mismatched initial guess.
    #[error("root solver dimension mismatch: {0}")]
    RootSolverDimensionMismatch(String),

    /// An element referenced a node name that could not be resolved.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// `ResultStore::append` requires strictly increasing tick values.
    #[error("tick {tick} is not strictly greater than previous tick {previous}")]
    NonMonotonicTick { tick: f64, previous: f64 },

    #[error("netlist parse error: {0}")]
    Parse(#[from] mna_parser::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
