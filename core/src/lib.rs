//! Curve construction for an idealised wind turbine power curve.
//!
//! Power is zero below cut-in, ramps quadratically up to rated power, stays
//! flat until cut-out and drops to zero above it. The curve is built once from
//! the turbine constants in [`config`] and handed to a renderer as an ordered
//! set of samples.

pub mod config;
pub mod curve;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use config::TurbineConfig;
pub use curve::{CurveBuilder, PowerCurve};
pub use prelude::{CurveError, CurvePoint, CurveResult};
