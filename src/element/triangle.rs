use numeric_literals::replace_float_literals;

use crate::element::{ElementKind, ElementShape};
use crate::nalgebra::{Matrix1x3, Matrix2x3, OMatrix, Point2, Vector2, U1, U2, U3, U6};
use crate::quadrature::{self, QuadraturePair2d};
use crate::Real;

/// The 3-node linear triangle.
///
/// The natural coordinates live on the unit triangle with vertices `(0, 0)`, `(1, 0)` and
/// `(0, 1)`, in that (counter-clockwise) order. The shape functions are the barycentric
/// coordinates
///
/// ```text
/// N_0 = 1 - ξ - η,    N_1 = ξ,    N_2 = η,
/// ```
///
/// so their derivatives are constant over the element, and a single quadrature point suffices.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Tri3;

impl<T> ElementShape<T> for Tri3
where
    T: Real,
{
    type GeometryDim = U2;
    type NodalDim = U3;

    fn kind(&self) -> ElementKind {
        ElementKind::Tri3
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn reference_nodes(&self) -> Vec<Point2<T>> {
        [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)].to_vec()
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate_basis(&self, xi: &Point2<T>) -> Matrix1x3<T> {
        Matrix1x3::new(
            1.0 - xi.x - xi.y,
            xi.x,
            xi.y
        )
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn gradients(&self, _: &Point2<T>) -> Matrix2x3<T> {
        Matrix2x3::from_columns(&[
            Vector2::new(-1.0, -1.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0)
        ])
    }

    fn quadrature(&self) -> QuadraturePair2d<T> {
        quadrature::triangle_centroid()
    }
}

/// The 6-node quadratic triangle.
///
/// Nodes 0, 1 and 2 are the vertices of the unit triangle as for [`Tri3`]. Nodes 3, 4 and 5
/// are the midpoints of the edges (0, 1), (1, 2) and (2, 0) respectively.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Tri6;

impl<T> ElementShape<T> for Tri6
where
    T: Real,
{
    type GeometryDim = U2;
    type NodalDim = U6;

    fn kind(&self) -> ElementKind {
        ElementKind::Tri6
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn reference_nodes(&self) -> Vec<Point2<T>> {
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.5, 0.0),
            Point2::new(0.5, 0.5),
            Point2::new(0.0, 0.5),
        ]
        .to_vec()
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate_basis(&self, xi: &Point2<T>) -> OMatrix<T, U1, U6> {
        // We express the basis functions of Tri6 as products of
        // the Tri3 basis functions.
        let psi = <Tri3 as ElementShape<T>>::evaluate_basis(&Tri3, xi);
        OMatrix::<T, U1, U6>::from_row_slice(&[
            psi[0] * (2.0 * psi[0] - 1.0),
            psi[1] * (2.0 * psi[1] - 1.0),
            psi[2] * (2.0 * psi[2] - 1.0),
            4.0 * psi[0] * psi[1],
            4.0 * psi[1] * psi[2],
            4.0 * psi[2] * psi[0],
        ])
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn gradients(&self, xi: &Point2<T>) -> OMatrix<T, U2, U6> {
        let psi = <Tri3 as ElementShape<T>>::evaluate_basis(&Tri3, xi);
        let g = <Tri3 as ElementShape<T>>::gradients(&Tri3, xi);

        let vertex_gradient = |i: usize| g.column(i) * (4.0 * psi[i] - 1.0);
        let edge_gradient = |i: usize, j: usize|
            g.column(i) * (4.0 * psi[j]) + g.column(j) * (4.0 * psi[i]);

        OMatrix::<T, U2, U6>::from_columns(&[
            vertex_gradient(0),
            vertex_gradient(1),
            vertex_gradient(2),
            edge_gradient(0, 1),
            edge_gradient(1, 2),
            edge_gradient(2, 0)
        ])
    }

    fn quadrature(&self) -> QuadraturePair2d<T> {
        quadrature::triangle_three_point()
    }
}
