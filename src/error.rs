//! Errors reported by element kinematics.
use std::error::Error;
use std::fmt;

use crate::element::ElementKind;
use crate::kinematics::Configuration;

/// Errors that can occur when setting up or evaluating the kinematics of an element.
///
/// Geometry errors are never recovered from at this level. They are returned to the caller,
/// which decides whether to abort, remesh or reduce the step size.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// The isoparametric Jacobian at a quadrature point has a non-positive (or NaN) determinant.
    ///
    /// This happens for elements with zero area/volume, inverted elements and elements whose
    /// nodes are given in the wrong winding order.
    NonPositiveJacobian {
        configuration: Configuration,
        quadrature_point: usize,
        determinant: f64,
    },
    /// Gradients or determinants were requested before they were computed for the current
    /// coordinate state.
    GradientsNotComputed { configuration: Configuration },
    /// Gradient computation was requested before the reference coordinate of the node was set.
    ReferenceCoordinatesNotSet { node: usize },
    NodeIndexOutOfBounds { node: usize, num_nodes: usize },
    QuadraturePointOutOfBounds { index: usize, num_points: usize },
    DimensionOutOfBounds { dim: usize, geometry_dim: usize },
    VertexIndexOutOfBounds { index: usize, num_vertices: usize },
    /// A coordinate vector does not have the geometry dimension of the element.
    CoordinateDimensionMismatch { expected: usize, actual: usize },
    /// A collection of nodal coordinates does not have one entry per node of the element.
    NodeCountMismatch { expected: usize, actual: usize },
    /// A dynamically typed element was converted to a concrete element of a different shape.
    ElementKindMismatch { expected: ElementKind, actual: ElementKind },
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use KinematicsError::*;
        match self {
            NonPositiveJacobian {
                configuration,
                quadrature_point,
                determinant,
            } => write!(
                f,
                "non-positive Jacobian determinant {determinant:e} at quadrature point {quadrature_point} \
                 in {configuration} configuration (degenerate or inverted element)"
            ),
            GradientsNotComputed { configuration } => {
                write!(f, "gradients in {configuration} configuration have not been computed")
            }
            ReferenceCoordinatesNotSet { node } => {
                write!(f, "reference coordinates of node {node} have not been set")
            }
            NodeIndexOutOfBounds { node, num_nodes } => {
                write!(f, "node index {node} out of bounds for element with {num_nodes} nodes")
            }
            QuadraturePointOutOfBounds { index, num_points } => write!(
                f,
                "quadrature point index {index} out of bounds for element with {num_points} quadrature points"
            ),
            DimensionOutOfBounds { dim, geometry_dim } => {
                write!(f, "dimension {dim} out of bounds for {geometry_dim}-dimensional element")
            }
            VertexIndexOutOfBounds { index, num_vertices } => {
                write!(f, "vertex index {index} out of bounds for {num_vertices} vertices")
            }
            CoordinateDimensionMismatch { expected, actual } => write!(
                f,
                "coordinate vector has dimension {actual}, but the element is {expected}-dimensional"
            ),
            NodeCountMismatch { expected, actual } => {
                write!(f, "got coordinates for {actual} nodes, but the element has {expected} nodes")
            }
            ElementKindMismatch { expected, actual } => {
                write!(f, "expected element of kind {expected:?}, got {actual:?}")
            }
        }
    }
}

impl Error for KinematicsError {}
