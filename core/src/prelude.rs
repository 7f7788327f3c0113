use serde::{Deserialize, Serialize};

/// A single sample on the power curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub wind_speed: f64,
    pub power: f64,
}

impl CurvePoint {
    pub fn new(wind_speed: f64, power: f64) -> Self {
        Self { wind_speed, power }
    }
}

/// Common error type for curve construction.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error(
        "configured wind speeds are out of order: expected cut_in ({cut_in}) < rated ({rated}) < cut_out ({cut_out}) < end ({end})"
    )]
    OutOfOrder {
        cut_in: f64,
        rated: f64,
        cut_out: f64,
        end: f64,
    },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("interpolation failure: {0}")]
    Interpolation(String),
}

pub type CurveResult<T> = Result<T, CurveError>;
