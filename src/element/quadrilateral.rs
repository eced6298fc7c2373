use numeric_literals::replace_float_literals;

use crate::element::{ElementKind, ElementShape};
use crate::nalgebra::{Matrix1x4, Matrix2x4, Point2, Vector2, U2, U4};
use crate::quadrature::{self, QuadraturePair2d};
use crate::Real;

/// The 4-node bilinear quadrilateral.
///
/// The natural coordinates live on `[-1, 1]^2`, and the nodes are the corners
/// `(-1, -1)`, `(1, -1)`, `(1, 1)`, `(-1, 1)` in that (counter-clockwise) order.
/// Integration uses the 2x2 Gauss rule.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Quad4;

impl<T> ElementShape<T> for Quad4
where
    T: Real,
{
    type GeometryDim = U2;
    type NodalDim = U4;

    fn kind(&self) -> ElementKind {
        ElementKind::Quad4
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn reference_nodes(&self) -> Vec<Point2<T>> {
        [
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
        ]
        .to_vec()
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate_basis(&self, xi: &Point2<T>) -> Matrix1x4<T> {
        // We define the shape functions as N_{alpha, beta} evaluated at xi such that
        //  N_{alpha, beta}([alpha, beta]) = 1
        // with alpha, beta = 1 or -1
        let phi = |alpha, beta, xi: &Point2<T>| (1.0 + alpha * xi[0]) * (1.0 + beta * xi[1]) / 4.0;
        Matrix1x4::from_row_slice(&[
            phi(-1.0, -1.0, xi),
            phi( 1.0, -1.0, xi),
            phi( 1.0,  1.0, xi),
            phi(-1.0,  1.0, xi),
        ])
    }

    /// Bilinear derivatives, e.g. `dN_0/dξ = -(1 - η)/4` and `dN_0/dη = -(1 - ξ)/4`.
    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn gradients(&self, xi: &Point2<T>) -> Matrix2x4<T> {
        let phi_grad = |alpha, beta, xi: &Point2<T>|
            Vector2::new(
                alpha * (1.0 + beta * xi[1]) / 4.0,
                beta * (1.0 + alpha * xi[0]) / 4.0,
            );

        Matrix2x4::from_columns(&[
            phi_grad(-1.0, -1.0, xi),
            phi_grad( 1.0, -1.0, xi),
            phi_grad( 1.0,  1.0, xi),
            phi_grad(-1.0,  1.0, xi),
        ])
    }

    fn quadrature(&self) -> QuadraturePair2d<T> {
        quadrature::quadrilateral_gauss_2x2()
    }
}
