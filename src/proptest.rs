//! Strategies for generating valid elements in property-based tests.
use std::f64::consts::PI;

use ::proptest::prelude::*;
use nalgebra::{Point2, Point3, Rotation2, Vector2};

use crate::element::{Quad4, Tet4, Tri3};
use crate::kinematics::ElementGeometry;

pub fn point2() -> impl Strategy<Value = Point2<f64>> {
    // Keep coordinates moderate so that determinants stay well within floating point range
    let range = -10.0..10.0;
    [range.clone(), range].prop_map(|[x, y]| Point2::new(x, y))
}

pub fn point3() -> impl Strategy<Value = Point3<f64>> {
    let range = -10.0..10.0;
    [range.clone(), range.clone(), range].prop_map(|[x, y, z]| Point3::new(x, y, z))
}

pub fn rotation_angle() -> impl Strategy<Value = f64> {
    -PI..PI
}

fn cross2(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Whether the polygon turns left by a clear margin at every corner.
fn is_strictly_convex_ccw(vertices: &[Point2<f64>], tolerance: f64) -> bool {
    let n = vertices.len();
    (0..n).all(|i| {
        let a = vertices[(i + 1) % n] - vertices[i];
        let b = vertices[(i + 2) % n] - vertices[(i + 1) % n];
        cross2(&a, &b) > tolerance
    })
}

/// Counter-clockwise triangles with area bounded away from zero.
pub fn ccw_triangle() -> impl Strategy<Value = [Point2<f64>; 3]> {
    [point2(), point2(), point2()].prop_filter_map("triangle is nearly degenerate", |[a, b, c]| {
        let doubled_area = cross2(&(b - a), &(c - a));
        if doubled_area > 0.1 {
            Some([a, b, c])
        } else if doubled_area < -0.1 {
            Some([a, c, b])
        } else {
            None
        }
    })
}

/// Parallelograms `(p, p + u, p + u + v, p + v)` with positive orientation.
pub fn parallelogram() -> impl Strategy<Value = [Point2<f64>; 4]> {
    (point2(), 0.1..5.0, -5.0..5.0, 0.1..5.0, rotation_angle()).prop_map(|(p, u_len, v_x, v_y, theta)| {
        let rotation = Rotation2::new(theta);
        let u = rotation * Vector2::new(u_len, 0.0);
        let v = rotation * Vector2::new(v_x, v_y);
        [p, p + u, p + u + v, p + v]
    })
}

/// Convex, counter-clockwise quadrilaterals obtained by perturbing, scaling, rotating and
/// translating the unit square.
pub fn convex_quadrilateral() -> impl Strategy<Value = [Point2<f64>; 4]> {
    let perturbation = -0.2..0.2;
    let perturbations = [
        perturbation.clone(),
        perturbation.clone(),
        perturbation.clone(),
        perturbation.clone(),
        perturbation.clone(),
        perturbation.clone(),
        perturbation.clone(),
        perturbation,
    ];
    (perturbations, 0.1..10.0, rotation_angle(), point2()).prop_filter_map(
        "quadrilateral is not strictly convex",
        |(delta, scale, theta, translation)| {
            let rotation = Rotation2::new(theta);
            let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
            let vertices: Vec<_> = corners
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| {
                    let local = Vector2::new(x + delta[2 * i], y + delta[2 * i + 1]);
                    translation + rotation * (scale * local)
                })
                .collect();
            is_strictly_convex_ccw(&vertices, 1e-3 * scale * scale)
                .then(|| [vertices[0], vertices[1], vertices[2], vertices[3]])
        },
    )
}

/// Positively oriented tetrahedra with volume bounded away from zero.
pub fn positive_tetrahedron() -> impl Strategy<Value = [Point3<f64>; 4]> {
    [point3(), point3(), point3(), point3()].prop_filter_map("tetrahedron is nearly degenerate", |[a, b, c, d]| {
        let six_volume = (b - a).cross(&(c - a)).dot(&(d - a));
        if six_volume > 0.1 {
            Some([a, b, c, d])
        } else if six_volume < -0.1 {
            Some([a, c, b, d])
        } else {
            None
        }
    })
}

impl Arbitrary for ElementGeometry<f64, Tri3> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        ccw_triangle()
            .prop_filter_map("invalid element", |vertices| {
                ElementGeometry::from_reference_vertices(Tri3, &vertices).ok()
            })
            .boxed()
    }
}

impl Arbitrary for ElementGeometry<f64, Quad4> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        convex_quadrilateral()
            .prop_filter_map("invalid element", |vertices| {
                ElementGeometry::from_reference_vertices(Quad4, &vertices).ok()
            })
            .boxed()
    }
}

impl Arbitrary for ElementGeometry<f64, Tet4> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        positive_tetrahedron()
            .prop_filter_map("invalid element", |vertices| {
                ElementGeometry::from_reference_vertices(Tet4, &vertices).ok()
            })
            .boxed()
    }
}
