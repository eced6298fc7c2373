use nalgebra::{DefaultAllocator, DimName, OMatrix, OPoint};

use crate::allocators::BiDimAllocator;
use crate::kinematics::Configuration;
use crate::Real;

/// Jacobian determinant and physical-space shape function gradients at a quadrature point,
/// for a single configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PointKinematics<T, D, N>
where
    T: Real,
    D: DimName,
    N: DimName,
    DefaultAllocator: BiDimAllocator<T, D, N>,
{
    jacobian_determinant: T,
    gradients: OMatrix<T, D, N>,
}

impl<T, D, N> PointKinematics<T, D, N>
where
    T: Real,
    D: DimName,
    N: DimName,
    DefaultAllocator: BiDimAllocator<T, D, N>,
{
    pub(crate) fn new(jacobian_determinant: T, gradients: OMatrix<T, D, N>) -> Self {
        Self {
            jacobian_determinant,
            gradients,
        }
    }

    /// Determinant of the isoparametric Jacobian. Always strictly positive.
    pub fn jacobian_determinant(&self) -> T {
        self.jacobian_determinant
    }

    /// Shape function gradients with respect to physical coordinates.
    ///
    /// Column `i` is the gradient of the shape function of node `i`.
    pub fn gradients(&self) -> &OMatrix<T, D, N> {
        &self.gradients
    }
}

/// The state associated with a single quadrature point of an element.
///
/// The weight and natural coordinates are fixed at construction. The kinematic state of each
/// configuration is absent until it has been computed, and is discarded whenever the nodal
/// coordinates it was computed from change.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraturePoint<T, D, N>
where
    T: Real,
    D: DimName,
    N: DimName,
    DefaultAllocator: BiDimAllocator<T, D, N>,
{
    weight: T,
    natural_coords: OPoint<T, D>,
    reference: Option<PointKinematics<T, D, N>>,
    current: Option<PointKinematics<T, D, N>>,
}

impl<T, D, N> QuadraturePoint<T, D, N>
where
    T: Real,
    D: DimName,
    N: DimName,
    DefaultAllocator: BiDimAllocator<T, D, N>,
{
    pub(crate) fn new(weight: T, natural_coords: OPoint<T, D>) -> Self {
        Self {
            weight,
            natural_coords,
            reference: None,
            current: None,
        }
    }

    pub fn weight(&self) -> T {
        self.weight
    }

    pub fn natural_coords(&self) -> &OPoint<T, D> {
        &self.natural_coords
    }

    pub fn kinematics(&self, configuration: Configuration) -> Option<&PointKinematics<T, D, N>> {
        match configuration {
            Configuration::Reference => self.reference.as_ref(),
            Configuration::Current => self.current.as_ref(),
        }
    }

    pub fn reference(&self) -> Option<&PointKinematics<T, D, N>> {
        self.reference.as_ref()
    }

    pub fn current(&self) -> Option<&PointKinematics<T, D, N>> {
        self.current.as_ref()
    }

    pub fn reference_jacobian_determinant(&self) -> Option<T> {
        self.reference().map(PointKinematics::jacobian_determinant)
    }

    pub fn current_jacobian_determinant(&self) -> Option<T> {
        self.current().map(PointKinematics::jacobian_determinant)
    }

    /// Ratio of the current to the reference Jacobian determinant.
    ///
    /// This is the determinant of the deformation gradient at the point, i.e. the local
    /// change of area/volume.
    pub fn volume_ratio(&self) -> Option<T> {
        Some(self.current_jacobian_determinant()? / self.reference_jacobian_determinant()?)
    }

    pub(crate) fn store(
        &mut self,
        reference: PointKinematics<T, D, N>,
        current: Option<PointKinematics<T, D, N>>,
    ) {
        self.reference = Some(reference);
        self.current = current;
    }

    pub(crate) fn invalidate(&mut self, configuration: Configuration) {
        match configuration {
            Configuration::Reference => {
                self.reference = None;
                self.current = None;
            }
            Configuration::Current => self.current = None,
        }
    }
}
