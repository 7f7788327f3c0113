pub mod builder;
pub mod power_curve;

pub use builder::CurveBuilder;
pub use power_curve::PowerCurve;
