/// Tolerances and iteration caps for the generic Newton-Raphson root solver.
///
/// Not consulted by the linear transient/pole-zero engines themselves —
/// this network has no nonlinear devices to iterate on at the MNA level —
/// but carried as the seam a future nonlinear collaborator (e.g. a cell
/// delay driver) would configure.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Maximum Newton iterations before declaring non-convergence.
    pub maximum_iterations: usize,

    /// Relative step tolerance: convergence when `|delta_i| <= x_tol * |x_i|`
    /// for every component.
    pub x_tol: f64,

    /// Finite-difference step used when no analytic Jacobian is supplied.
    pub finite_difference_step: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            maximum_iterations: 20,
            x_tol: 1e-9,
            finite_difference_step: 1e-6,
        }
    }
}
