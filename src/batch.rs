//! Gradient computation over collections of independent elements.
use eyre::WrapErr;
use log::debug;
use nalgebra::DefaultAllocator;
use rayon::prelude::*;

use crate::allocators::BiDimAllocator;
use crate::any_element::AnyElementGeometry;
use crate::element::ElementShape;
use crate::error::KinematicsError;
use crate::kinematics::{ElementGeometry, GradientMode};
use crate::Real;

/// An element whose gradients can be computed in isolation.
pub trait ComputeGradients {
    fn compute_gradients(&mut self, mode: GradientMode) -> Result<(), KinematicsError>;
}

impl<T, Shape> ComputeGradients for ElementGeometry<T, Shape>
where
    T: Real,
    Shape: ElementShape<T>,
    DefaultAllocator: BiDimAllocator<T, Shape::GeometryDim, Shape::NodalDim>,
{
    fn compute_gradients(&mut self, mode: GradientMode) -> Result<(), KinematicsError> {
        ElementGeometry::compute_gradients(self, mode)
    }
}

impl<T: Real> ComputeGradients for AnyElementGeometry<T> {
    fn compute_gradients(&mut self, mode: GradientMode) -> Result<(), KinematicsError> {
        AnyElementGeometry::compute_gradients(self, mode)
    }
}

/// Computes gradients of every element in parallel.
///
/// Elements share no state, so the result for each element is identical to calling
/// `compute_gradients` on it directly. If any element fails, an error identifying one of the
/// failing elements is returned. Which one is unspecified when several fail, and remaining
/// elements may be skipped once a failure is observed. Failed elements hold no computed state.
pub fn compute_gradients_par<E: ComputeGradients + Send>(elements: &mut [E], mode: GradientMode) -> eyre::Result<()> {
    debug!("Computing {:?} gradients of {} elements in parallel", mode, elements.len());
    elements
        .par_iter_mut()
        .with_min_len(64)
        .enumerate()
        .try_for_each(|(index, element)| {
            element
                .compute_gradients(mode)
                .wrap_err_with(|| format!("failed to compute gradients of element {index}"))
        })
}

/// Sequential counterpart of [`compute_gradients_par`]. Stops at the first failing element.
pub fn compute_gradients_seq<E: ComputeGradients>(elements: &mut [E], mode: GradientMode) -> eyre::Result<()> {
    for (index, element) in elements.iter_mut().enumerate() {
        element
            .compute_gradients(mode)
            .wrap_err_with(|| format!("failed to compute gradients of element {index}"))?;
    }
    Ok(())
}
