use numeric_literals::replace_float_literals;

use crate::element::{phi_linear_1d, phi_linear_1d_grad, ElementKind, ElementShape};
use crate::nalgebra::{OMatrix, Point3, Vector3, U1, U3, U8};
use crate::quadrature::{self, QuadraturePair3d};
use crate::Real;

/// The 8-node trilinear hexahedron.
///
/// The natural coordinates live on `[-1, 1]^3`. Nodes 0-3 are the corners of the bottom face
/// `ζ = -1` and nodes 4-7 the corners of the top face `ζ = 1`, each face ordered like
/// [`Quad4`](crate::element::Quad4).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Hex8;

impl<T> ElementShape<T> for Hex8
where
    T: Real,
{
    type GeometryDim = U3;
    type NodalDim = U8;

    fn kind(&self) -> ElementKind {
        ElementKind::Hex8
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn reference_nodes(&self) -> Vec<Point3<T>> {
        [
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new( 1.0, -1.0, -1.0),
            Point3::new( 1.0,  1.0, -1.0),
            Point3::new(-1.0,  1.0, -1.0),
            Point3::new(-1.0, -1.0,  1.0),
            Point3::new( 1.0, -1.0,  1.0),
            Point3::new( 1.0,  1.0,  1.0),
            Point3::new(-1.0,  1.0,  1.0),
        ]
        .to_vec()
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate_basis(&self, xi: &Point3<T>) -> OMatrix<T, U1, U8> {
        // We define the shape functions as N_{alpha, beta, gamma} evaluated at xi such that
        //  N_{alpha, beta, gamma}([alpha, beta, gamma]) = 1,
        let phi_1d = phi_linear_1d;
        let phi = |alpha, beta, gamma, xi: &Point3<T>|
            phi_1d(alpha, xi[0]) * phi_1d(beta, xi[1]) * phi_1d(gamma, xi[2]);
        OMatrix::<_, U1, U8>::from_row_slice(&[
            phi(-1.0, -1.0, -1.0, xi),
            phi( 1.0, -1.0, -1.0, xi),
            phi( 1.0,  1.0, -1.0, xi),
            phi(-1.0,  1.0, -1.0, xi),
            phi(-1.0, -1.0,  1.0, xi),
            phi( 1.0, -1.0,  1.0, xi),
            phi( 1.0,  1.0,  1.0, xi),
            phi(-1.0,  1.0,  1.0, xi),
        ])
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn gradients(&self, xi: &Point3<T>) -> OMatrix<T, U3, U8> {
        let phi_1d = phi_linear_1d;
        let grad_1d = phi_linear_1d_grad;
        let phi_grad = |alpha, beta, gamma, xi: &Point3<T>|
            Vector3::new(
                grad_1d(alpha) * phi_1d(beta, xi[1]) * phi_1d(gamma, xi[2]),
                phi_1d(alpha, xi[0]) * grad_1d(beta) * phi_1d(gamma, xi[2]),
                phi_1d(alpha, xi[0]) * phi_1d(beta, xi[1]) * grad_1d(gamma)
            );

        OMatrix::from_columns(&[
            phi_grad(-1.0, -1.0, -1.0, xi),
            phi_grad( 1.0, -1.0, -1.0, xi),
            phi_grad( 1.0,  1.0, -1.0, xi),
            phi_grad(-1.0,  1.0, -1.0, xi),
            phi_grad(-1.0, -1.0,  1.0, xi),
            phi_grad( 1.0, -1.0,  1.0, xi),
            phi_grad( 1.0,  1.0,  1.0, xi),
            phi_grad(-1.0,  1.0,  1.0, xi),
        ])
    }

    fn quadrature(&self) -> QuadraturePair3d<T> {
        quadrature::hexahedron_gauss_2x2x2()
    }
}
