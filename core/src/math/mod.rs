pub mod grid;
pub mod matrix;
pub mod spline;

pub use matrix::MatrixHelper;
pub use spline::QuadraticSpline;
