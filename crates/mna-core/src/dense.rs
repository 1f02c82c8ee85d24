//! Dense, full-pivoting LU factorization shared by the transient and
//! pole-zero engines. Sparse linear algebra is explicitly out of scope: the
//! systems this analyzer solves are small (one row per node/branch), and
//! full pivoting buys numerical robustness against the ill-conditioned rows
//! that controlled-source stamps and sub-pF/sub-nH dynamics produce.

use crate::prelude::*;
use num_complex::Complex64;

const PIVOT_EPS: f64 = 1e-300;

/// Real dense LU with full (row and column) pivoting.
#[derive(Debug, Clone)]
pub struct DenseLu {
    n: usize,
    lu: Vec<f64>,
    row_order: Vec<usize>,
    col_order: Vec<usize>,
}

impl DenseLu {
    fn at(data: &[f64], n: usize, r: usize, c: usize) -> f64 {
        data[r * n + c]
    }
    fn set(data: &mut [f64], n: usize, r: usize, c: usize, v: f64) {
        data[r * n + c] = v;
    }

    /// `a` is a row-major `n x n` matrix.
    pub fn factor(a: &[f64], n: usize) -> Result<Self> {
        if a.len() != n * n {
            return Err(Error::DimensionMismatch {
                expected: n * n,
                actual: a.len(),
            });
        }
        let mut lu = a.to_vec();
        let mut row_order: Vec<usize> = (0..n).collect();
        let mut col_order: Vec<usize> = (0..n).collect();

        for k in 0..n {
            let mut best = (0.0f64, k, k);
            for i in k..n {
                for j in k..n {
                    let v = Self::at(&lu, n, i, j).abs();
                    if v > best.0 {
                        best = (v, i, j);
                    }
                }
            }
            if best.0 < PIVOT_EPS {
                return Err(Error::Singular("dense LU factorization"));
            }
            let (_, pr, pc) = best;

            if pr != k {
                for j in 0..n {
                    lu.swap(k * n + j, pr * n + j);
                }
                row_order.swap(k, pr);
            }
            if pc != k {
                for i in 0..n {
                    lu.swap(i * n + k, i * n + pc);
                }
                col_order.swap(k, pc);
            }

            let pivot = Self::at(&lu, n, k, k);
            for i in (k + 1)..n {
                let factor = Self::at(&lu, n, i, k) / pivot;
                Self::set(&mut lu, n, i, k, factor);
                for j in (k + 1)..n {
                    let updated = Self::at(&lu, n, i, j) - factor * Self::at(&lu, n, k, j);
                    Self::set(&mut lu, n, i, j, updated);
                }
            }
        }

        Ok(DenseLu {
            n,
            lu,
            row_order,
            col_order,
        })
    }

    /// Solves `A x = b` using the cached factorization.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        if b.len() != self.n {
            return Err(Error::DimensionMismatch {
                expected: self.n,
                actual: b.len(),
            });
        }
        let n = self.n;
        let mut y = vec![0.0; n];
        for i in 0..n {
            let mut sum = b[self.row_order[i]];
            for j in 0..i {
                sum -= Self::at(&self.lu, n, i, j) * y[j];
            }
            y[i] = sum;
        }

        let mut x_perm = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum -= Self::at(&self.lu, n, i, j) * x_perm[j];
            }
            x_perm[i] = sum / Self::at(&self.lu, n, i, i);
        }

        let mut x = vec![0.0; n];
        for i in 0..n {
            x[self.col_order[i]] = x_perm[i];
        }
        Ok(x)
    }
}

/// Complex dense LU with full pivoting, used by the pole-zero engine's
/// s-domain moment recursion.
#[derive(Debug, Clone)]
pub struct DenseLuComplex {
    n: usize,
    lu: Vec<Complex64>,
    row_order: Vec<usize>,
    col_order: Vec<usize>,
}

impl DenseLuComplex {
    fn at(data: &[Complex64], n: usize, r: usize, c: usize) -> Complex64 {
        data[r * n + c]
    }
    fn set(data: &mut [Complex64], n: usize, r: usize, c: usize, v: Complex64) {
        data[r * n + c] = v;
    }

    pub fn factor(a: &[Complex64], n: usize) -> Result<Self> {
        if a.len() != n * n {
            return Err(Error::DimensionMismatch {
                expected: n * n,
                actual: a.len(),
            });
        }
        let mut lu = a.to_vec();
        let mut row_order: Vec<usize> = (0..n).collect();
        let mut col_order: Vec<usize> = (0..n).collect();

        for k in 0..n {
            let mut best = (0.0f64, k, k);
            for i in k..n {
                for j in k..n {
                    let v = Self::at(&lu, n, i, j).norm();
                    if v > best.0 {
                        best = (v, i, j);
                    }
                }
            }
            if best.0 < PIVOT_EPS {
                return Err(Error::Singular("complex dense LU factorization"));
            }
            let (_, pr, pc) = best;

            if pr != k {
                for j in 0..n {
                    lu.swap(k * n + j, pr * n + j);
                }
                row_order.swap(k, pr);
            }
            if pc != k {
                for i in 0..n {
                    lu.swap(i * n + k, i * n + pc);
                }
                col_order.swap(k, pc);
            }

            let pivot = Self::at(&lu, n, k, k);
            for i in (k + 1)..n {
                let factor = Self::at(&lu, n, i, k) / pivot;
                Self::set(&mut lu, n, i, k, factor);
                for j in (k + 1)..n {
                    let updated = Self::at(&lu, n, i, j) - factor * Self::at(&lu, n, k, j);
                    Self::set(&mut lu, n, i, j, updated);
                }
            }
        }

        Ok(DenseLuComplex {
            n,
            lu,
            row_order,
            col_order,
        })
    }

    pub fn solve(&self, b: &[Complex64]) -> Result<Vec<Complex64>> {
        if b.len() != self.n {
            return Err(Error::DimensionMismatch {
                expected: self.n,
                actual: b.len(),
            });
        }
        let n = self.n;
        let mut y = vec![Complex64::new(0.0, 0.0); n];
        for i in 0..n {
            let mut sum = b[self.row_order[i]];
            for j in 0..i {
                sum -= Self::at(&self.lu, n, i, j) * y[j];
            }
            y[i] = sum;
        }

        let mut x_perm = vec![Complex64::new(0.0, 0.0); n];
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum -= Self::at(&self.lu, n, i, j) * x_perm[j];
            }
            x_perm[i] = sum / Self::at(&self.lu, n, i, i);
        }

        let mut x = vec![Complex64::new(0.0, 0.0); n];
        for i in 0..n {
            x[self.col_order[i]] = x_perm[i];
        }
        Ok(x)
    }
}
