//! Root finding for the real-coefficient polynomials the pole-zero engine
//! produces (Hankel denominator, convolved numerator).
//!
//! Jenkins-Traub is the textbook choice here, but its deflation stages are
//! fiddly to get right without a reference to test against blindly.
//! Aberth-Ehrlich simultaneous iteration converges just as reliably for the
//! low-order (single digits to low tens) polynomials this analyzer produces
//! and is a few dozen lines of arithmetic, so that's what's implemented.

use num_complex::Complex64;

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-12;

/// Finds every root (real or complex) of a polynomial given as coefficients
/// from lowest degree to highest: `coeffs[0] + coeffs[1]*x + ... + coeffs[n]*x^n`.
pub fn roots(coeffs: &[f64]) -> Vec<Complex64> {
    let degree = coeffs.len().saturating_sub(1);
    if degree == 0 {
        return Vec::new();
    }
    let leading = coeffs[degree];
    let monic: Vec<f64> = coeffs.iter().map(|c| c / leading).collect();

    if degree == 1 {
        return vec![Complex64::new(-monic[0], 0.0)];
    }

    let derivative: Vec<f64> = monic
        .iter()
        .enumerate()
        .skip(1)
        .map(|(k, c)| c * k as f64)
        .collect();

    let mut z = initial_guesses(&monic, degree);

    for _ in 0..MAX_ITERATIONS {
        let evals: Vec<Complex64> = z.iter().map(|zi| eval(&monic, *zi)).collect();
        let derivs: Vec<Complex64> = z.iter().map(|zi| eval(&derivative, *zi)).collect();
        let mut max_delta = 0.0f64;
        let mut next = z.clone();

        for i in 0..degree {
            if derivs[i].norm() < 1e-300 {
                continue;
            }
            let w = evals[i] / derivs[i];
            let mut offset_sum = Complex64::new(0.0, 0.0);
            for (j, zj) in z.iter().enumerate() {
                if j != i {
                    offset_sum += Complex64::new(1.0, 0.0) / (z[i] - zj);
                }
            }
            let delta = w / (Complex64::new(1.0, 0.0) - w * offset_sum);
            next[i] = z[i] - delta;
            max_delta = max_delta.max(delta.norm());
        }

        z = next;
        if max_delta < TOLERANCE {
            break;
        }
    }

    z
}

fn eval(coeffs: &[f64], z: Complex64) -> Complex64 {
    coeffs
        .iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + Complex64::new(c, 0.0))
}

fn initial_guesses(monic: &[f64], degree: usize) -> Vec<Complex64> {
    let bound = 1.0 + monic[..degree].iter().fold(0.0f64, |m, c| m.max(c.abs()));
    (0..degree)
        .map(|k| {
            let theta = 2.0 * std::f64::consts::PI * (k as f64 + 0.5) / degree as f64;
            Complex64::from_polar(bound, theta)
        })
        .collect()
}
