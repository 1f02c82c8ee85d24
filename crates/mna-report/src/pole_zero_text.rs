//! Human-readable rendering of a `PoleZeroResult` for the CLI's stdout.

use mna_core::pole_zero::PoleZeroResult;
use num_complex::Complex64;
use std::fmt::Write as _;

fn format_complex(value: &Complex64) -> String {
    if value.im.abs() < 1e-9 {
        format!("{:.6e}", value.re)
    } else if value.im >= 0.0 {
        format!("{:.6e} + {:.6e}j", value.re, value.im)
    } else {
        format!("{:.6e} - {:.6e}j", value.re, value.im.abs())
    }
}

/// Renders poles, zeros, and their associated residues as a plain-text
/// table, one entry per line.
pub fn render(result: &PoleZeroResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "poles:");
    for (pole, residue) in result.poles.iter().zip(&result.residues) {
        let _ = writeln!(out, "  {}  (residue {})", format_complex(pole), format_complex(residue));
    }
    let _ = writeln!(out, "zeros:");
    for zero in &result.zeros {
        let _ = writeln!(out, "  {}", format_complex(zero));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_real_pole_without_an_imaginary_suffix() {
        let result = PoleZeroResult {
            poles: vec![Complex64::new(-1000.0, 0.0)],
            zeros: vec![],
            residues: vec![Complex64::new(1.0, 0.0)],
        };
        let text = render(&result);
        assert!(text.contains("poles:"));
        assert!(!text.contains('j'));
    }

    #[test]
    fn renders_a_complex_conjugate_pole_with_its_sign() {
        let result = PoleZeroResult {
            poles: vec![Complex64::new(-1.0, -2.0)],
            zeros: vec![],
            residues: vec![Complex64::new(0.5, 0.0)],
        };
        let text = render(&result);
        assert!(text.contains(" - "));
        assert!(text.contains('j'));
    }
}
