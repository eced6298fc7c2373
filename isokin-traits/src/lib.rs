use nalgebra::RealField;

pub use nalgebra;

/// Scalar type used throughout `isokin`.
///
/// Any `Copy` real field works: `f64`, `f32`, or a forward-mode dual number that
/// implements `RealField`.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

pub mod allocators;
