//! Isoparametric finite element kinematics.
//!
//! For a fixed set of isoparametric element shapes, `isokin` computes the gradients of the
//! shape functions with respect to physical coordinates at every quadrature point of an
//! element, together with the determinant of the isoparametric Jacobian. The computation is
//! available for the reference (undeformed) configuration only ("linear" analysis) or for both
//! the reference and the current (deformed) configuration ("nonlinear" analysis).
//!
//! The central type is [`ElementGeometry`](kinematics::ElementGeometry), which owns the nodal
//! coordinates and per-quadrature-point state of a single element. Collections with mixed
//! element shapes can use [`AnyElementGeometry`](any_element::AnyElementGeometry), and whole
//! collections can be recomputed in parallel with the functions in [`batch`].
use nalgebra::{DimMin, DimName};

pub mod allocators;
pub mod any_element;
pub mod batch;
pub mod element;
pub mod error;
pub mod kinematics;
pub mod quadrature;

#[cfg(feature = "proptest")]
pub mod proptest;

pub extern crate nalgebra;

pub use isokin_traits::Real;

/// A small, fixed-size dimension.
///
/// Used as a trait alias for various traits frequently needed by generic `isokin` routines.
pub trait SmallDim: DimName + DimMin<Self, Output = Self> {}

impl<D> SmallDim for D where D: DimName + DimMin<Self, Output = Self> {}
