//! Isoparametric element shapes.
//!
//! An element shape fixes the number of nodes, the node ordering, the natural-coordinate shape
//! functions and the quadrature rule of an element. Shapes carry no data; the nodal
//! coordinates of an actual element live in [`ElementGeometry`](crate::kinematics::ElementGeometry).
use std::fmt::Debug;

use nalgebra::{DefaultAllocator, DimName, OMatrix, OPoint, U1};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

use crate::allocators::BiDimAllocator;
use crate::quadrature::QuadraturePair;
use crate::{Real, SmallDim};

mod hexahedron;
mod quadrilateral;
mod tetrahedron;
mod triangle;

pub use hexahedron::*;
pub use quadrilateral::*;
pub use tetrahedron::*;
pub use triangle::*;

/// The closed set of element shapes supported by `isokin`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// 3-node linear triangle.
    Tri3,
    /// 6-node quadratic triangle.
    Tri6,
    /// 4-node bilinear quadrilateral.
    Quad4,
    /// 4-node linear tetrahedron.
    Tet4,
    /// 8-node trilinear hexahedron.
    Hex8,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Tri3,
        ElementKind::Tri6,
        ElementKind::Quad4,
        ElementKind::Tet4,
        ElementKind::Hex8,
    ];

    pub fn num_nodes(&self) -> usize {
        match self {
            ElementKind::Tri3 => 3,
            ElementKind::Tri6 => 6,
            ElementKind::Quad4 => 4,
            ElementKind::Tet4 => 4,
            ElementKind::Hex8 => 8,
        }
    }

    pub fn geometry_dim(&self) -> usize {
        match self {
            ElementKind::Tri3 | ElementKind::Tri6 | ElementKind::Quad4 => 2,
            ElementKind::Tet4 | ElementKind::Hex8 => 3,
        }
    }

    pub fn num_quadrature_points(&self) -> usize {
        match self {
            ElementKind::Tri3 => 1,
            ElementKind::Tri6 => 3,
            ElementKind::Quad4 => 4,
            ElementKind::Tet4 => 1,
            ElementKind::Hex8 => 8,
        }
    }
}

/// An isoparametric element shape.
///
/// Basis gradients are returned as a `GeometryDim x NodalDim` matrix whose column `i` holds the
/// derivatives of the `i`-th shape function with respect to the natural coordinates.
pub trait ElementShape<T>: Copy + Debug + Default + Send + Sync + 'static
where
    T: Real,
    DefaultAllocator: BiDimAllocator<T, Self::GeometryDim, Self::NodalDim>,
{
    type GeometryDim: SmallDim;
    type NodalDim: DimName;

    fn kind(&self) -> ElementKind;

    fn num_nodes(&self) -> usize {
        Self::NodalDim::dim()
    }

    /// The natural coordinates of the nodes, in node order.
    fn reference_nodes(&self) -> Vec<OPoint<T, Self::GeometryDim>>;

    /// Evaluates each shape function at the given natural coordinates.
    ///
    /// The result is a row vector where each entry is the value of the corresponding shape
    /// function.
    fn evaluate_basis(&self, xi: &OPoint<T, Self::GeometryDim>) -> OMatrix<T, U1, Self::NodalDim>;

    /// Evaluates the natural-coordinate derivatives of each shape function at the given
    /// natural coordinates.
    fn gradients(&self, xi: &OPoint<T, Self::GeometryDim>) -> OMatrix<T, Self::GeometryDim, Self::NodalDim>;

    /// The quadrature rule used for elements of this shape.
    fn quadrature(&self) -> QuadraturePair<T, Self::GeometryDim>;
}

pub type ShapeGeometryDim<T, Shape> = <Shape as ElementShape<T>>::GeometryDim;
pub type ShapeNodalDim<T, Shape> = <Shape as ElementShape<T>>::NodalDim;

/// Linear Lagrange polynomial on `[-1, 1]` which is `1` at `alpha` and `0` at `-alpha`.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub(crate) fn phi_linear_1d<T: Real>(alpha: T, xi: T) -> T {
    (1.0 + alpha * xi) / 2.0
}

#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub(crate) fn phi_linear_1d_grad<T: Real>(alpha: T) -> T {
    alpha / 2.0
}
