use crate::prelude::{CurveError, CurveResult};
use ndarray::{Array1, Array2};

const PIVOT_EPSILON: f64 = 1e-12;

pub struct MatrixHelper;

impl MatrixHelper {
    /// Solve `lhs * x = rhs` by Gaussian elimination with partial pivoting.
    pub fn solve(mut lhs: Array2<f64>, mut rhs: Array1<f64>) -> CurveResult<Array1<f64>> {
        let n = rhs.len();
        if lhs.nrows() != n || lhs.ncols() != n {
            return Err(CurveError::InvalidInput(format!(
                "expected a {n}x{n} system, got {}x{}",
                lhs.nrows(),
                lhs.ncols()
            )));
        }

        for col in 0..n {
            let pivot_row = (col..n)
                .max_by(|&a, &b| lhs[[a, col]].abs().total_cmp(&lhs[[b, col]].abs()))
                .unwrap_or(col);
            if lhs[[pivot_row, col]].abs() < PIVOT_EPSILON {
                return Err(CurveError::Interpolation(format!(
                    "singular system at column {col}"
                )));
            }
            if pivot_row != col {
                for k in 0..n {
                    lhs.swap([col, k], [pivot_row, k]);
                }
                rhs.swap(col, pivot_row);
            }

            for row in (col + 1)..n {
                let factor = lhs[[row, col]] / lhs[[col, col]];
                if factor == 0.0 {
                    continue;
                }
                for k in col..n {
                    lhs[[row, k]] -= factor * lhs[[col, k]];
                }
                rhs[row] -= factor * rhs[col];
            }
        }

        let mut solution = Array1::<f64>::zeros(n);
        for row in (0..n).rev() {
            let tail: f64 = ((row + 1)..n).map(|k| lhs[[row, k]] * solution[k]).sum();
            solution[row] = (rhs[row] - tail) / lhs[[row, row]];
        }
        Ok(solution)
    }
}
