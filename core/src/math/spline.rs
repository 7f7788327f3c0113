//! Interpolating quadratic B-spline.
//!
//! The knot vector is clamped at both ends and uses the midpoints between
//! consecutive sites as interior knots, skipping the first and last midpoint
//! so the number of basis functions equals the number of sites.

use crate::math::matrix::MatrixHelper;
use crate::prelude::{CurveError, CurveResult};
use ndarray::{Array1, Array2};

const DEGREE: usize = 2;

#[derive(Debug, Clone)]
pub struct QuadraticSpline {
    knots: Vec<f64>,
    coefficients: Vec<f64>,
}

impl QuadraticSpline {
    /// Fit the spline passing through every `(xs[i], ys[i])`.
    pub fn fit(xs: &[f64], ys: &[f64]) -> CurveResult<Self> {
        if xs.len() != ys.len() {
            return Err(CurveError::InvalidInput(format!(
                "{} sites but {} values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() <= DEGREE {
            return Err(CurveError::InvalidInput(format!(
                "quadratic interpolation needs at least {} points, got {}",
                DEGREE + 1,
                xs.len()
            )));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(CurveError::InvalidInput("non-finite site or value".into()));
        }
        if xs.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(CurveError::InvalidInput(
                "sites must be strictly increasing".into(),
            ));
        }

        let knots = clamped_knots(xs);
        let n = xs.len();
        let mut collocation = Array2::<f64>::zeros((n, n));
        for (row, &x) in xs.iter().enumerate() {
            let (span, basis) = basis_functions(&knots, n, x);
            for (offset, value) in basis.iter().enumerate() {
                collocation[[row, span - DEGREE + offset]] = *value;
            }
        }

        let solution = MatrixHelper::solve(collocation, Array1::from(ys.to_vec()))?;
        Ok(Self {
            knots,
            coefficients: solution.to_vec(),
        })
    }

    /// Domain covered by the fitted sites.
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.knots.len() - 1])
    }

    /// Value at `x`, or `None` outside the fitted domain.
    pub fn evaluate(&self, x: f64) -> Option<f64> {
        let (lo, hi) = self.domain();
        if !(lo..=hi).contains(&x) {
            return None;
        }
        let (span, basis) = basis_functions(&self.knots, self.coefficients.len(), x);
        Some(
            basis
                .iter()
                .enumerate()
                .map(|(offset, b)| b * self.coefficients[span - DEGREE + offset])
                .sum(),
        )
    }
}

fn clamped_knots(xs: &[f64]) -> Vec<f64> {
    let first = xs[0];
    let last = xs[xs.len() - 1];
    let mut knots = Vec::with_capacity(xs.len() + DEGREE + 1);
    knots.extend(std::iter::repeat(first).take(DEGREE + 1));
    let midpoints: Vec<f64> = xs.windows(2).map(|pair| (pair[0] + pair[1]) / 2.0).collect();
    knots.extend_from_slice(&midpoints[1..midpoints.len() - 1]);
    knots.extend(std::iter::repeat(last).take(DEGREE + 1));
    knots
}

/// Knot span containing `x` and the non-zero basis values on it (Cox-de Boor).
fn basis_functions(knots: &[f64], count: usize, x: f64) -> (usize, [f64; DEGREE + 1]) {
    let mut span = DEGREE;
    while span + 1 < count && knots[span + 1] <= x {
        span += 1;
    }

    let mut values = [0.0; DEGREE + 1];
    let mut left = [0.0; DEGREE + 1];
    let mut right = [0.0; DEGREE + 1];
    values[0] = 1.0;
    for j in 1..=DEGREE {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = values[r] / (right[r + 1] + left[j - r]);
            values[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        values[j] = saved;
    }
    (span, values)
}
