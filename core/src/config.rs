use crate::prelude::{CurveError, CurveResult};
use serde::{Deserialize, Serialize};

pub const CUT_IN_WIND_SPEED: f64 = 3.5;
pub const RATED_WIND_SPEED: f64 = 15.0;
pub const CUT_OUT_WIND_SPEED: f64 = 25.0;
pub const END_WIND_SPEED: f64 = 30.0;
pub const RATED_POWER_KW: f64 = 2000.0;
/// Sampling step of the ramp, also the offset used for the step anchors.
pub const PRECISION: f64 = 0.01;
/// Finest step the ramp grid can still resolve.
pub const MIN_PRECISION: f64 = 1e-9;
pub const MAX_RAMP_SAMPLES: f64 = 10_000_000.0;

/// Turbine thresholds (m/s) and output (kW) the curve is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurbineConfig {
    pub cut_in: f64,
    pub rated: f64,
    pub cut_out: f64,
    pub end: f64,
    pub rated_power: f64,
    pub precision: f64,
}

impl Default for TurbineConfig {
    fn default() -> Self {
        Self {
            cut_in: CUT_IN_WIND_SPEED,
            rated: RATED_WIND_SPEED,
            cut_out: CUT_OUT_WIND_SPEED,
            end: END_WIND_SPEED,
            rated_power: RATED_POWER_KW,
            precision: PRECISION,
        }
    }
}

impl TurbineConfig {
    pub fn new(
        cut_in: f64,
        rated: f64,
        cut_out: f64,
        end: f64,
        rated_power: f64,
        precision: f64,
    ) -> Self {
        Self {
            cut_in,
            rated,
            cut_out,
            end,
            rated_power,
            precision,
        }
    }

    /// Checks the threshold ordering first, then the scalar parameters.
    pub fn validate(&self) -> CurveResult<()> {
        let ordered =
            self.cut_in < self.rated && self.rated < self.cut_out && self.cut_out < self.end;
        if !ordered {
            return Err(CurveError::OutOfOrder {
                cut_in: self.cut_in,
                rated: self.rated,
                cut_out: self.cut_out,
                end: self.end,
            });
        }

        if !self.precision.is_finite() || self.precision < MIN_PRECISION {
            return Err(CurveError::InvalidParameter(format!(
                "precision must be a step of at least {}, got {}",
                MIN_PRECISION, self.precision
            )));
        }
        let ramp_samples = (self.rated - self.cut_in) / self.precision;
        if ramp_samples > MAX_RAMP_SAMPLES {
            return Err(CurveError::InvalidParameter(format!(
                "precision {} needs {:.0} ramp samples, limit is {}",
                self.precision, ramp_samples, MAX_RAMP_SAMPLES
            )));
        }
        if !self.rated_power.is_finite() || self.rated_power <= 0.0 {
            return Err(CurveError::InvalidParameter(format!(
                "rated power must be positive, got {}",
                self.rated_power
            )));
        }
        if self.cut_in < self.precision {
            return Err(CurveError::InvalidParameter(format!(
                "cut-in speed {} leaves no room below it at precision {}",
                self.cut_in, self.precision
            )));
        }

        Ok(())
    }
}
