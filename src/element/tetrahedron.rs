use numeric_literals::replace_float_literals;

use crate::element::{ElementKind, ElementShape};
use crate::nalgebra::{Matrix1x4, Matrix3x4, Point3, Vector3, U3, U4};
use crate::quadrature::{self, QuadraturePair3d};
use crate::Real;

/// The 4-node linear tetrahedron.
///
/// The natural coordinates live on the unit tetrahedron with vertices `(0, 0, 0)`, `(1, 0, 0)`,
/// `(0, 1, 0)` and `(0, 0, 1)`. The first three vertices are counter-clockwise when seen from
/// the fourth.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Tet4;

impl<T> ElementShape<T> for Tet4
where
    T: Real,
{
    type GeometryDim = U3;
    type NodalDim = U4;

    fn kind(&self) -> ElementKind {
        ElementKind::Tet4
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn reference_nodes(&self) -> Vec<Point3<T>> {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
        .to_vec()
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate_basis(&self, xi: &Point3<T>) -> Matrix1x4<T> {
        Matrix1x4::new(
            1.0 - xi.x - xi.y - xi.z,
            xi.x,
            xi.y,
            xi.z
        )
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn gradients(&self, _: &Point3<T>) -> Matrix3x4<T> {
        Matrix3x4::from_columns(&[
            Vector3::new(-1.0, -1.0, -1.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0)
        ])
    }

    fn quadrature(&self) -> QuadraturePair3d<T> {
        quadrature::tetrahedron_centroid()
    }
}
