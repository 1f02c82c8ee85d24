//! Generic multivariate Newton-Raphson root solver, shared scaffolding for
//! any engine that needs to drive a vector-valued function to zero. Used
//! directly by nothing in the transient path today (every stamped device
//! is linear), but it's the same iteration teacher circuits built for
//! nonlinear device solves, generalized so a future nonlinear device stamp
//! can plug in without a new solver.

use crate::dense::DenseLu;
use crate::prelude::*;

/// Numerical non-convergence is reported, not treated as an abort: the
/// caller gets the last iterate either way and decides what to do with it.
#[derive(Debug, Clone, PartialEq)]
pub enum RootSolverOutcome {
    Converged(Vec<f64>),
    NotConverged(Vec<f64>),
}

/// `f` maps the current guess to the residual vector; `jacobian` maps it to
/// the row-major `n x n` Jacobian. Iterates until every component's update
/// is within `config.x_tol` of the current value or `maximum_iterations` is
/// exhausted. Dimension mismatches and a singular Jacobian are programmer
/// errors and abort via `Err`; running out of iterations is not.
pub fn solve<F, J>(f: F, jacobian: J, x0: &[f64], config: &EngineConfig) -> Result<RootSolverOutcome>
where
    F: Fn(&[f64]) -> Vec<f64>,
    J: Fn(&[f64]) -> Vec<f64>,
{
    let n = x0.len();
    let mut x = x0.to_vec();

    for _ in 0..config.maximum_iterations {
        let residual = f(&x);
        if residual.len() != n {
            return Err(Error::RootSolverDimensionMismatch(format!(
                "residual has {} components, expected {n}",
                residual.len()
            )));
        }
        let jac = jacobian(&x);
        if jac.len() != n * n {
            return Err(Error::RootSolverDimensionMismatch(format!(
                "jacobian has {} entries, expected {}",
                jac.len(),
                n * n
            )));
        }

        let lu = DenseLu::factor(&jac, n)?;
        let neg_residual: Vec<f64> = residual.iter().map(|v| -v).collect();
        let delta = lu.solve(&neg_residual)?;

        let mut converged = true;
        for i in 0..n {
            if delta[i].abs() > config.x_tol * x[i].abs().max(1.0) {
                converged = false;
            }
            x[i] += delta[i];
        }
        if converged {
            return Ok(RootSolverOutcome::Converged(x));
        }
    }

    Ok(RootSolverOutcome::NotConverged(x))
}

/// Central-difference Jacobian, for callers with no analytic derivative.
pub fn finite_difference_jacobian<F>(f: &F, x: &[f64], step: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let n = x.len();
    let mut jac = vec![0.0; n * n];
    let mut probe = x.to_vec();
    for j in 0..n {
        let h = step * x[j].abs().max(1.0);
        probe[j] = x[j] + h;
        let f_plus = f(&probe);
        probe[j] = x[j] - h;
        let f_minus = f(&probe);
        probe[j] = x[j];
        for i in 0..n {
            jac[i * n + j] = (f_plus[i] - f_minus[i]) / (2.0 * h);
        }
    }
    jac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_on_a_linear_system() {
        // f(x) = [2x0 + x1 - 5, x0 - 3x1 + 5] has root x = [2, 3].
        let f = |x: &[f64]| vec![2.0 * x[0] + x[1] - 5.0, x[0] - 3.0 * x[1] + 5.0];
        let jac = |_: &[f64]| vec![2.0, 1.0, 1.0, -3.0];
        let config = EngineConfig::default();
        let outcome = solve(f, jac, &[0.0, 0.0], &config).unwrap();
        let RootSolverOutcome::Converged(x) = outcome else {
            panic!("expected convergence");
        };
        assert!((x[0] - 2.0).abs() < 1e-6);
        assert!((x[1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn converges_on_a_quadratic_with_finite_difference_jacobian() {
        // f(x) = x^2 - 2, root at sqrt(2).
        let f = |x: &[f64]| vec![x[0] * x[0] - 2.0];
        let config = EngineConfig::default();
        let outcome = solve(
            |x| f(x),
            |x| finite_difference_jacobian(&f, x, config.finite_difference_step),
            &[1.0],
            &config,
        )
        .unwrap();
        let RootSolverOutcome::Converged(x) = outcome else {
            panic!("expected convergence");
        };
        assert!((x[0] - std::f64::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let f = |_: &[f64]| vec![0.0, 0.0];
        let jac = |_: &[f64]| vec![1.0];
        let config = EngineConfig::default();
        assert!(solve(f, jac, &[0.0], &config).is_err());
    }

    #[test]
    fn exhausting_iterations_reports_not_converged_instead_of_aborting() {
        // A badly scaled Jacobian makes each step overshoot; with only two
        // iterations allowed the solver should report non-convergence
        // rather than erroring out.
        let f = |x: &[f64]| vec![x[0] - 1.0];
        let jac = |_: &[f64]| vec![1e-3];
        let config = EngineConfig {
            maximum_iterations: 2,
            ..EngineConfig::default()
        };
        let outcome = solve(f, jac, &[0.0], &config).unwrap();
        assert!(matches!(outcome, RootSolverOutcome::NotConverged(_)));
    }
}
