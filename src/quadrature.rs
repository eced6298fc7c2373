//! Fixed quadrature rules for the supported element shapes.
//!
//! The rules are part of the public contract of the element shapes: downstream code indexes
//! quadrature points by position, so both the locations and the order of the points are fixed.
//!
//! Simplex rules (triangle, tetrahedron) are defined on the unit simplex with one vertex at the
//! origin. Tensor-product rules (quadrilateral, hexahedron) are defined on `[-1, 1]^d`.
use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, DimName, OPoint, Point2, Point3, Scalar, U1, U2, U3};
use numeric_literals::replace_float_literals;
use std::ops::{AddAssign, Mul};

use crate::Real;

pub type QuadraturePair<T, D> = (Vec<T>, Vec<OPoint<T, D>>);
pub type QuadraturePair1d<T> = QuadraturePair<T, U1>;
pub type QuadraturePair2d<T> = QuadraturePair<T, U2>;
pub type QuadraturePair3d<T> = QuadraturePair<T, U3>;

/// A quadrature rule consisting of weights and points.
pub trait Quadrature<T, D>
where
    T: Scalar,
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    fn weights(&self) -> &[T];
    fn points(&self) -> &[OPoint<T, D>];

    fn num_points(&self) -> usize {
        self.weights().len()
    }

    /// Approximates the integral of the given function over the reference domain.
    fn integrate<U, Function>(&self, f: Function) -> U
    where
        Function: Fn(&OPoint<T, D>) -> U,
        U: Default + Mul<T, Output = U> + AddAssign<U>,
    {
        let mut integral = U::default();
        for (w, p) in self.weights().iter().zip(self.points()) {
            integral += f(p) * w.clone();
        }
        integral
    }
}

impl<T, D> Quadrature<T, D> for QuadraturePair<T, D>
where
    T: Scalar,
    D: DimName,
    DefaultAllocator: Allocator<T, D>,
{
    fn weights(&self) -> &[T] {
        &self.0
    }

    fn points(&self) -> &[OPoint<T, D>] {
        &self.1
    }
}

/// The two-point Gauss-Legendre rule on `[-1, 1]`, exact for cubic polynomials.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn gauss_2<T: Real>() -> QuadraturePair1d<T> {
    let a = 1.0 / T::sqrt(3.0);
    let w = 1.0;
    (vec![w, w], vec![OPoint::from([-a]), OPoint::from([a])])
}

/// One-point centroid rule on the unit triangle, exact for linear polynomials.
///
/// The single point is located at `(1/3, 1/3)` with weight `1/2`, the area of the unit triangle.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn triangle_centroid<T: Real>() -> QuadraturePair2d<T> {
    let third = 1.0 / 3.0;
    let area = 0.5;
    (vec![area], vec![Point2::new(third, third)])
}

/// Three-point interior rule on the unit triangle, exact for quadratic polynomials.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn triangle_three_point<T: Real>() -> QuadraturePair2d<T> {
    let sixth = 1.0 / 6.0;
    let two_thirds = 2.0 / 3.0;
    (
        vec![sixth, sixth, sixth],
        vec![
            Point2::new(sixth, sixth),
            Point2::new(two_thirds, sixth),
            Point2::new(sixth, two_thirds),
        ],
    )
}

/// 2x2 Gauss rule on `[-1, 1]^2`.
///
/// The points are `(±1/√3, ±1/√3)`, traversed counter-clockwise starting in the
/// `(-, -)` corner, which matches the node ordering of the bilinear quadrilateral.
/// All weights are `1`.
pub fn quadrilateral_gauss_2x2<T: Real>() -> QuadraturePair2d<T> {
    let (weights_1d, points_1d) = gauss_2::<T>();
    let (lo, hi) = (points_1d[0][0], points_1d[1][0]);
    let w = weights_1d[0] * weights_1d[1];
    let points = vec![
        Point2::new(lo, lo),
        Point2::new(hi, lo),
        Point2::new(hi, hi),
        Point2::new(lo, hi),
    ];
    (vec![w; 4], points)
}

/// One-point centroid rule on the unit tetrahedron, exact for linear polynomials.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn tetrahedron_centroid<T: Real>() -> QuadraturePair3d<T> {
    let quarter = 0.25;
    let volume = 1.0 / 6.0;
    (vec![volume], vec![Point3::new(quarter, quarter, quarter)])
}

/// 2x2x2 Gauss rule on `[-1, 1]^3`.
///
/// The four points on the `ζ = -1/√3` layer come first, followed by the four points on the
/// `ζ = +1/√3` layer. Each layer is traversed in the order of [`quadrilateral_gauss_2x2`].
pub fn hexahedron_gauss_2x2x2<T: Real>() -> QuadraturePair3d<T> {
    let (face_weights, face_points) = quadrilateral_gauss_2x2::<T>();
    let (layer_weights, layer_points) = gauss_2::<T>();

    let mut weights = Vec::with_capacity(8);
    let mut points = Vec::with_capacity(8);
    for (w_z, z) in layer_weights.iter().zip(&layer_points) {
        for (w_xy, xy) in face_weights.iter().zip(&face_points) {
            weights.push(*w_xy * *w_z);
            points.push(Point3::new(xy.x, xy.y, z[0]));
        }
    }
    (weights, points)
}
