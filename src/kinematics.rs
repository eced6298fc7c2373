//! Isoparametric kinematics of a single element.
//!
//! At each quadrature point with natural coordinates `ξ`, the isoparametric Jacobian is
//!
//! ```text
//! J = X G^T,    J_ij = ∂x_i / ∂ξ_j,
//! ```
//!
//! where `X` holds the nodal coordinates column-wise and `G` the natural-coordinate shape
//! function derivatives column-wise. The physical-space gradients are then
//!
//! ```text
//! ∇_x N = J^{-T} G,
//! ```
//!
//! where the inverse is always formed first (as the adjugate over the determinant) and then
//! transposed. The same convention is used for every shape and for both configurations.
use std::fmt;

use itertools::izip;
use log::{debug, warn};
use nalgebra::{try_convert, DefaultAllocator, DimName, OMatrix, OPoint, OVector};
use serde::{Deserialize, Serialize};

use crate::allocators::BiDimAllocator;
use crate::element::{ElementKind, ElementShape, ShapeGeometryDim, ShapeNodalDim};
use crate::error::KinematicsError;
use crate::{Real, SmallDim};

mod quadrature_point;

pub use quadrature_point::{PointKinematics, QuadraturePoint};

/// Undeformed (reference) or deformed (current) nodal positions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Configuration {
    Reference,
    Current,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Configuration::Reference => write!(f, "reference"),
            Configuration::Current => write!(f, "current"),
        }
    }
}

/// Selects which configurations are evaluated by a gradient computation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradientMode {
    /// Small deformations: only the reference configuration is evaluated.
    Linear,
    /// Large deformations: both the reference and the current configuration are evaluated.
    Nonlinear,
}

pub type ElementCoords<T, Shape> = OMatrix<T, ShapeGeometryDim<T, Shape>, ShapeNodalDim<T, Shape>>;
pub type ElementQuadraturePoint<T, Shape> = QuadraturePoint<T, ShapeGeometryDim<T, Shape>, ShapeNodalDim<T, Shape>>;
pub type ElementPointKinematics<T, Shape> = PointKinematics<T, ShapeGeometryDim<T, Shape>, ShapeNodalDim<T, Shape>>;
pub type StiffnessBlock<T, Shape> = OMatrix<T, ShapeGeometryDim<T, Shape>, ShapeGeometryDim<T, Shape>>;

/// Nodal coordinates and per-quadrature-point kinematic state of a single element.
///
/// # Coordinates
///
/// Every node has a reference and a current coordinate. The current coordinate of a node
/// mirrors its reference coordinate until it is set explicitly (or after
/// [`reset_current_coordinates`](Self::reset_current_coordinates)), so a nonlinear computation on
/// an undeformed element yields a deformation gradient equal to the identity.
///
/// # Computed state
///
/// Gradients and determinants become available through the accessors after a call to
/// [`compute_gradients_linear`](Self::compute_gradients_linear) (reference configuration) or
/// [`compute_gradients_nonlinear`](Self::compute_gradients_nonlinear) (both configurations).
/// Changing reference coordinates discards all computed state, changing current coordinates
/// discards the current-configuration state. Reading discarded or never computed state returns
/// [`KinematicsError::GradientsNotComputed`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementGeometry<T, Shape>
where
    T: Real,
    Shape: ElementShape<T>,
    DefaultAllocator: BiDimAllocator<T, Shape::GeometryDim, Shape::NodalDim>,
{
    shape: Shape,
    reference_coords: ElementCoords<T, Shape>,
    current_coords: ElementCoords<T, Shape>,
    reference_assigned: Vec<bool>,
    current_assigned: Vec<bool>,
    quadrature_points: Vec<ElementQuadraturePoint<T, Shape>>,
    stiffness_blocks: Vec<StiffnessBlock<T, Shape>>,
}

impl<T, Shape> Default for ElementGeometry<T, Shape>
where
    T: Real,
    Shape: ElementShape<T>,
    DefaultAllocator: BiDimAllocator<T, Shape::GeometryDim, Shape::NodalDim>,
{
    fn default() -> Self {
        Self::new(Shape::default())
    }
}

impl<T, Shape> ElementGeometry<T, Shape>
where
    T: Real,
    Shape: ElementShape<T>,
    DefaultAllocator: BiDimAllocator<T, Shape::GeometryDim, Shape::NodalDim>,
{
    /// Allocates the storage of an element with the given shape.
    ///
    /// No coordinates are set, and nothing is computed.
    pub fn new(shape: Shape) -> Self {
        let (weights, points) = shape.quadrature();
        let quadrature_points = izip!(weights, points)
            .map(|(w, xi)| QuadraturePoint::new(w, xi))
            .collect();
        let n = shape.num_nodes();
        Self {
            shape,
            reference_coords: OMatrix::zeros_generic(Shape::GeometryDim::name(), Shape::NodalDim::name()),
            current_coords: OMatrix::zeros_generic(Shape::GeometryDim::name(), Shape::NodalDim::name()),
            reference_assigned: vec![false; n],
            current_assigned: vec![false; n],
            quadrature_points,
            stiffness_blocks: vec![OMatrix::zeros_generic(Shape::GeometryDim::name(), Shape::GeometryDim::name()); n * n],
        }
    }

    /// Creates an element with the given reference vertices, one per node.
    pub fn from_reference_vertices(
        shape: Shape,
        vertices: &[OPoint<T, Shape::GeometryDim>],
    ) -> Result<Self, KinematicsError> {
        let mut element = Self::new(shape);
        element.set_reference_vertices(vertices)?;
        Ok(element)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ElementKind {
        self.shape.kind()
    }

    pub fn num_nodes(&self) -> usize {
        Shape::NodalDim::dim()
    }

    pub fn geometry_dim(&self) -> usize {
        Shape::GeometryDim::dim()
    }

    pub fn num_quadrature_points(&self) -> usize {
        self.quadrature_points.len()
    }

    /// Reference coordinates, one column per node.
    pub fn reference_coordinates(&self) -> &ElementCoords<T, Shape> {
        &self.reference_coords
    }

    /// Current coordinates, one column per node.
    pub fn current_coordinates(&self) -> &ElementCoords<T, Shape> {
        &self.current_coords
    }

    pub fn coordinates(&self, configuration: Configuration) -> &ElementCoords<T, Shape> {
        match configuration {
            Configuration::Reference => &self.reference_coords,
            Configuration::Current => &self.current_coords,
        }
    }

    pub fn set_reference_vertex(&mut self, node: usize, x: &OPoint<T, Shape::GeometryDim>) -> Result<(), KinematicsError> {
        self.check_node(node)?;
        self.reference_coords.set_column(node, &x.coords);
        self.reference_assigned[node] = true;
        if !self.current_assigned[node] {
            self.current_coords.set_column(node, &x.coords);
        }
        self.invalidate(Configuration::Reference);
        Ok(())
    }

    pub fn set_current_vertex(&mut self, node: usize, x: &OPoint<T, Shape::GeometryDim>) -> Result<(), KinematicsError> {
        self.check_node(node)?;
        self.current_coords.set_column(node, &x.coords);
        self.current_assigned[node] = true;
        self.invalidate(Configuration::Current);
        Ok(())
    }

    /// Sets the reference coordinate of a node from a slice of length `geometry_dim`.
    pub fn set_reference_coordinates(&mut self, node: usize, coords: &[T]) -> Result<(), KinematicsError> {
        let x = self.point_from_slice(coords)?;
        self.set_reference_vertex(node, &x)
    }

    /// Sets the current coordinate of a node from a slice of length `geometry_dim`.
    pub fn set_current_coordinates(&mut self, node: usize, coords: &[T]) -> Result<(), KinematicsError> {
        let x = self.point_from_slice(coords)?;
        self.set_current_vertex(node, &x)
    }

    /// Sets the reference coordinates of all nodes at once.
    pub fn set_reference_vertices(&mut self, vertices: &[OPoint<T, Shape::GeometryDim>]) -> Result<(), KinematicsError> {
        self.check_node_count(vertices.len())?;
        for (node, x) in vertices.iter().enumerate() {
            self.set_reference_vertex(node, x)?;
        }
        Ok(())
    }

    /// Sets the current coordinates of all nodes at once.
    pub fn set_current_vertices(&mut self, vertices: &[OPoint<T, Shape::GeometryDim>]) -> Result<(), KinematicsError> {
        self.check_node_count(vertices.len())?;
        for (node, x) in vertices.iter().enumerate() {
            self.set_current_vertex(node, x)?;
        }
        Ok(())
    }

    /// Sets the reference coordinates by looking up the element's nodes in a global vertex list.
    ///
    /// `node_indices[i]` is the index into `vertices` of local node `i`.
    pub fn gather_reference_vertices(
        &mut self,
        vertices: &[OPoint<T, Shape::GeometryDim>],
        node_indices: &[usize],
    ) -> Result<(), KinematicsError> {
        let local_vertices = self.gather(vertices, node_indices)?;
        self.set_reference_vertices(&local_vertices)
    }

    /// Sets the current coordinates by looking up the element's nodes in a global vertex list.
    pub fn gather_current_vertices(
        &mut self,
        vertices: &[OPoint<T, Shape::GeometryDim>],
        node_indices: &[usize],
    ) -> Result<(), KinematicsError> {
        let local_vertices = self.gather(vertices, node_indices)?;
        self.set_current_vertices(&local_vertices)
    }

    /// Makes the current coordinates mirror the reference coordinates again.
    pub fn reset_current_coordinates(&mut self) {
        self.current_coords.copy_from(&self.reference_coords);
        self.current_assigned.fill(false);
        self.invalidate(Configuration::Current);
    }

    /// Computes gradients and Jacobian determinants in the reference configuration.
    ///
    /// Any previously computed current-configuration state is discarded.
    pub fn compute_gradients_linear(&mut self) -> Result<(), KinematicsError> {
        self.compute_gradients(GradientMode::Linear)
    }

    /// Computes gradients and Jacobian determinants in both the reference and the current
    /// configuration.
    pub fn compute_gradients_nonlinear(&mut self) -> Result<(), KinematicsError> {
        self.compute_gradients(GradientMode::Nonlinear)
    }

    /// Computes gradients and Jacobian determinants for the configurations selected by `mode`.
    ///
    /// # Errors
    ///
    /// Fails if a reference coordinate has not been set, or if the Jacobian determinant at any
    /// quadrature point is not strictly positive in any evaluated configuration. On failure,
    /// no computed state is retained.
    pub fn compute_gradients(&mut self, mode: GradientMode) -> Result<(), KinematicsError> {
        if let Some(node) = self.reference_assigned.iter().position(|assigned| !assigned) {
            return Err(KinematicsError::ReferenceCoordinatesNotSet { node });
        }

        self.invalidate(Configuration::Reference);
        let result = populate_quadrature_points(
            &self.shape,
            &self.reference_coords,
            &self.current_coords,
            &mut self.quadrature_points,
            mode,
        );

        match &result {
            Ok(()) => debug!(
                "Computed {:?} gradients of {:?} element at {} quadrature points",
                mode,
                self.kind(),
                self.quadrature_points.len()
            ),
            Err(_) => self.invalidate(Configuration::Reference),
        }
        result
    }

    /// Whether gradients are available for the given configuration.
    pub fn is_computed(&self, configuration: Configuration) -> bool {
        self.quadrature_points
            .iter()
            .all(|point| point.kinematics(configuration).is_some())
    }

    pub fn quadrature_points(&self) -> &[ElementQuadraturePoint<T, Shape>] {
        &self.quadrature_points
    }

    pub fn quadrature_point(&self, index: usize) -> Result<&ElementQuadraturePoint<T, Shape>, KinematicsError> {
        self.quadrature_points
            .get(index)
            .ok_or(KinematicsError::QuadraturePointOutOfBounds {
                index,
                num_points: self.quadrature_points.len(),
            })
    }

    pub fn weight(&self, quadrature_point: usize) -> Result<T, KinematicsError> {
        Ok(self.quadrature_point(quadrature_point)?.weight())
    }

    /// Computed kinematic state of a quadrature point in the given configuration.
    pub fn point_kinematics(
        &self,
        configuration: Configuration,
        quadrature_point: usize,
    ) -> Result<&ElementPointKinematics<T, Shape>, KinematicsError> {
        self.quadrature_point(quadrature_point)?
            .kinematics(configuration)
            .ok_or(KinematicsError::GradientsNotComputed { configuration })
    }

    /// Component `dim` of the reference-configuration gradient of the shape function of `node`
    /// at the given quadrature point.
    ///
    /// Requires a successful gradient computation since the coordinates were last changed.
    pub fn gradient(&self, node: usize, quadrature_point: usize, dim: usize) -> Result<T, KinematicsError> {
        self.gradient_in(Configuration::Reference, node, quadrature_point, dim)
    }

    /// Component `dim` of the current-configuration gradient of the shape function of `node`
    /// at the given quadrature point.
    ///
    /// Requires a successful nonlinear gradient computation since the coordinates were last
    /// changed.
    pub fn current_gradient(&self, node: usize, quadrature_point: usize, dim: usize) -> Result<T, KinematicsError> {
        self.gradient_in(Configuration::Current, node, quadrature_point, dim)
    }

    pub fn gradient_in(
        &self,
        configuration: Configuration,
        node: usize,
        quadrature_point: usize,
        dim: usize,
    ) -> Result<T, KinematicsError> {
        self.check_node(node)?;
        self.check_dim(dim)?;
        let kinematics = self.point_kinematics(configuration, quadrature_point)?;
        Ok(kinematics.gradients()[(dim, node)])
    }

    pub fn jacobian_determinant(&self, configuration: Configuration, quadrature_point: usize) -> Result<T, KinematicsError> {
        Ok(self
            .point_kinematics(configuration, quadrature_point)?
            .jacobian_determinant())
    }

    pub fn reference_jacobian_determinant(&self, quadrature_point: usize) -> Result<T, KinematicsError> {
        self.jacobian_determinant(Configuration::Reference, quadrature_point)
    }

    pub fn current_jacobian_determinant(&self, quadrature_point: usize) -> Result<T, KinematicsError> {
        self.jacobian_determinant(Configuration::Current, quadrature_point)
    }

    /// Ratio of current to reference Jacobian determinant at a quadrature point.
    pub fn volume_ratio(&self, quadrature_point: usize) -> Result<T, KinematicsError> {
        let det_curr = self.current_jacobian_determinant(quadrature_point)?;
        let det_ref = self.reference_jacobian_determinant(quadrature_point)?;
        Ok(det_curr / det_ref)
    }

    /// Area (2D) or volume (3D) of the element in the given configuration, integrated with the
    /// element's quadrature rule: `Σ_q w_q det J_q`.
    pub fn measure(&self, configuration: Configuration) -> Result<T, KinematicsError> {
        let mut measure = T::zero();
        for point in &self.quadrature_points {
            let kinematics = point
                .kinematics(configuration)
                .ok_or(KinematicsError::GradientsNotComputed { configuration })?;
            measure += point.weight() * kinematics.jacobian_determinant();
        }
        Ok(measure)
    }

    pub fn reference_measure(&self) -> Result<T, KinematicsError> {
        self.measure(Configuration::Reference)
    }

    pub fn current_measure(&self) -> Result<T, KinematicsError> {
        self.measure(Configuration::Current)
    }

    /// Deformation gradient `F = ∂x/∂X = Σ_i x_i ⊗ ∇_X N_i` at a quadrature point.
    ///
    /// Requires reference-configuration gradients. The current coordinates are used as they are
    /// now, so the result is an identity matrix for an undeformed element.
    pub fn deformation_gradient(
        &self,
        quadrature_point: usize,
    ) -> Result<OMatrix<T, Shape::GeometryDim, Shape::GeometryDim>, KinematicsError> {
        let kinematics = self.point_kinematics(Configuration::Reference, quadrature_point)?;
        Ok(&self.current_coords * kinematics.gradients().transpose())
    }

    /// Maps natural coordinates to physical coordinates in the given configuration.
    pub fn map_reference_coords(
        &self,
        configuration: Configuration,
        xi: &OPoint<T, Shape::GeometryDim>,
    ) -> OPoint<T, Shape::GeometryDim> {
        let phi = self.shape.evaluate_basis(xi);
        OPoint::from(self.coordinates(configuration) * phi.transpose())
    }

    /// Storage for the `(a, b)` node-pair block of the element stiffness matrix.
    ///
    /// The blocks are zero-initialized and never written by `isokin` itself.
    ///
    /// # Panics
    ///
    /// Panics if either node index is out of bounds.
    pub fn stiffness_block(&self, a: usize, b: usize) -> &StiffnessBlock<T, Shape> {
        &self.stiffness_blocks[self.block_index(a, b)]
    }

    /// Mutable access to the `(a, b)` node-pair block of the element stiffness matrix.
    ///
    /// # Panics
    ///
    /// Panics if either node index is out of bounds.
    pub fn stiffness_block_mut(&mut self, a: usize, b: usize) -> &mut StiffnessBlock<T, Shape> {
        let index = self.block_index(a, b);
        &mut self.stiffness_blocks[index]
    }

    pub fn clear_stiffness_blocks(&mut self) {
        for block in &mut self.stiffness_blocks {
            block.fill(T::zero());
        }
    }

    fn block_index(&self, a: usize, b: usize) -> usize {
        let n = self.num_nodes();
        assert!(a < n && b < n, "Node pair ({a}, {b}) out of bounds for element with {n} nodes");
        a * n + b
    }

    fn invalidate(&mut self, configuration: Configuration) {
        for point in &mut self.quadrature_points {
            point.invalidate(configuration);
        }
    }

    fn check_node(&self, node: usize) -> Result<(), KinematicsError> {
        let num_nodes = self.num_nodes();
        if node < num_nodes {
            Ok(())
        } else {
            Err(KinematicsError::NodeIndexOutOfBounds { node, num_nodes })
        }
    }

    fn check_dim(&self, dim: usize) -> Result<(), KinematicsError> {
        let geometry_dim = self.geometry_dim();
        if dim < geometry_dim {
            Ok(())
        } else {
            Err(KinematicsError::DimensionOutOfBounds { dim, geometry_dim })
        }
    }

    fn check_node_count(&self, count: usize) -> Result<(), KinematicsError> {
        let expected = self.num_nodes();
        if count == expected {
            Ok(())
        } else {
            Err(KinematicsError::NodeCountMismatch {
                expected,
                actual: count,
            })
        }
    }

    fn point_from_slice(&self, coords: &[T]) -> Result<OPoint<T, Shape::GeometryDim>, KinematicsError> {
        let expected = self.geometry_dim();
        if coords.len() != expected {
            return Err(KinematicsError::CoordinateDimensionMismatch {
                expected,
                actual: coords.len(),
            });
        }
        Ok(OPoint::from(OVector::<T, Shape::GeometryDim>::from_column_slice(coords)))
    }

    fn gather(
        &self,
        vertices: &[OPoint<T, Shape::GeometryDim>],
        node_indices: &[usize],
    ) -> Result<Vec<OPoint<T, Shape::GeometryDim>>, KinematicsError> {
        self.check_node_count(node_indices.len())?;
        node_indices
            .iter()
            .map(|&index| {
                vertices
                    .get(index)
                    .cloned()
                    .ok_or(KinematicsError::VertexIndexOutOfBounds {
                        index,
                        num_vertices: vertices.len(),
                    })
            })
            .collect()
    }
}

fn populate_quadrature_points<T, Shape>(
    shape: &Shape,
    reference_coords: &ElementCoords<T, Shape>,
    current_coords: &ElementCoords<T, Shape>,
    quadrature_points: &mut [ElementQuadraturePoint<T, Shape>],
    mode: GradientMode,
) -> Result<(), KinematicsError>
where
    T: Real,
    Shape: ElementShape<T>,
    DefaultAllocator: BiDimAllocator<T, Shape::GeometryDim, Shape::NodalDim>,
{
    for (index, point) in quadrature_points.iter_mut().enumerate() {
        let natural_gradients = shape.gradients(point.natural_coords());
        let reference = compute_point_kinematics(reference_coords, &natural_gradients)
            .map_err(|det| non_positive_jacobian(Configuration::Reference, index, det))?;
        let current = match mode {
            GradientMode::Linear => None,
            GradientMode::Nonlinear => Some(
                compute_point_kinematics(current_coords, &natural_gradients)
                    .map_err(|det| non_positive_jacobian(Configuration::Current, index, det))?,
            ),
        };
        point.store(reference, current);
    }
    Ok(())
}

/// Computes the Jacobian determinant and the physical-space gradients at a point, given the
/// nodal coordinates and the natural-coordinate gradients at that point.
///
/// Returns the offending determinant if it is not strictly positive.
fn compute_point_kinematics<T, D, N>(
    coords: &OMatrix<T, D, N>,
    natural_gradients: &OMatrix<T, D, N>,
) -> Result<PointKinematics<T, D, N>, T>
where
    T: Real,
    D: SmallDim,
    N: DimName,
    DefaultAllocator: BiDimAllocator<T, D, N>,
{
    let j = coords * natural_gradients.transpose();
    let j_det = j.determinant();
    // Also rejects NaN
    if !(j_det > T::zero()) {
        return Err(j_det);
    }
    // The closed-form small inverse only fails for a zero determinant, which is rejected above
    let j_inv = j.try_inverse().ok_or(j_det)?;
    let j_inv_t = j_inv.transpose();
    Ok(PointKinematics::new(j_det, j_inv_t * natural_gradients))
}

fn non_positive_jacobian<T: Real>(configuration: Configuration, quadrature_point: usize, determinant: T) -> KinematicsError {
    warn!(
        "Non-positive Jacobian determinant {:?} at quadrature point {} in {} configuration",
        determinant, quadrature_point, configuration
    );
    KinematicsError::NonPositiveJacobian {
        configuration,
        quadrature_point,
        determinant: try_convert(determinant).unwrap_or(f64::NAN),
    }
}
