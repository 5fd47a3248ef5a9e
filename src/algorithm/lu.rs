//! LU decomposition with partial pivoting

use crate::error::{Error, Result};

/// LU decomposition result: `P·A = L·U`
///
/// L is unit lower triangular, U is upper triangular, both row-major `n x n`.
/// Row `i` of `P·A` is row `permutation[i]` of `A`.
#[derive(Clone, Debug, PartialEq)]
pub struct LuDecomposition {
    /// Dimension of the square input
    pub n: usize,
    /// Lower triangular factor with unit diagonal
    pub l: Vec<f64>,
    /// Upper triangular factor
    pub u: Vec<f64>,
    /// Source row of each row of `P·A`
    pub permutation: Vec<usize>,
    /// `+1.0` or `-1.0` depending on the parity of row swaps
    pub sign: f64,
}

impl LuDecomposition {
    /// `sign × Π U[i,i]`
    pub fn determinant(&self) -> f64 {
        let n = self.n;
        (0..n).fold(self.sign, |acc, i| acc * self.u[i * n + i])
    }
}

/// Factor the row-major `n x n` matrix `a`
///
/// For each pivot column `k < n - 1` the row with the largest `|U[i,k]|`,
/// `i >= k`, is swapped into place, then rows below are eliminated. Swaps
/// move the multipliers already stored in `L` columns `0..k` along with the
/// rows, keeping `L` unit lower triangular.
///
/// # Errors
///
/// - `Error::InvalidArgument` if `n == 0` or `a.len() != n * n`
/// - `Error::SingularMatrix` if a pivot column is zero from the diagonal down
pub fn lu_decompose(a: &[f64], n: usize) -> Result<LuDecomposition> {
    if n == 0 || a.len() != n * n {
        return Err(Error::invalid_argument(
            "a",
            format!("expected a non-empty {}x{} matrix, got {} elements", n, n, a.len()),
        ));
    }

    let mut l = vec![0.0; n * n];
    for i in 0..n {
        l[i * n + i] = 1.0;
    }
    let mut u = a.to_vec();
    let mut permutation: Vec<usize> = (0..n).collect();
    let mut sign = 1.0;

    for k in 0..n.saturating_sub(1) {
        // Find pivot
        let mut max_val = u[k * n + k].abs();
        let mut max_row = k;
        for i in (k + 1)..n {
            let val = u[i * n + k].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val == 0.0 {
            return Err(Error::SingularMatrix { column: k });
        }

        if max_row != k {
            for j in 0..n {
                u.swap(k * n + j, max_row * n + j);
            }
            for j in 0..k {
                l.swap(k * n + j, max_row * n + j);
            }
            permutation.swap(k, max_row);
            sign = -sign;
        }

        // Elimination
        let pivot = u[k * n + k];
        for i in (k + 1)..n {
            let factor = u[i * n + k] / pivot;
            l[i * n + k] = factor;
            for j in k..n {
                u[i * n + j] -= factor * u[k * n + j];
            }
        }
    }

    Ok(LuDecomposition {
        n,
        l,
        u,
        permutation,
        sign,
    })
}
