use isokin::allocators::BiDimAllocator;
use isokin::element::{ElementKind, ElementShape, Hex8, Quad4, Tet4, Tri3, Tri6};
use isokin::nalgebra::{DMatrix, DefaultAllocator, OPoint, Point2, Point3};
use proptest::prelude::*;
use util::assert_approx_matrix_eq;

mod hexahedron;

fn point_in_tri_ref_domain() -> impl Strategy<Value = Point2<f64>> {
    // Generate points x, y in [0, 1]^2 such that x + y <= 1
    (0.0..=1.0)
        .prop_flat_map(|x: f64| (Just(x), 0.0..=1.0 - x))
        .prop_map(|(x, y)| Point2::new(x, y))
}

fn point_in_quad_ref_domain() -> impl Strategy<Value = Point2<f64>> {
    let r = -1.0..=1.0;
    [r.clone(), r].prop_map(|[x, y]| Point2::new(x, y))
}

fn point_in_tet_ref_domain() -> impl Strategy<Value = Point3<f64>> {
    // Sorted samples s1 <= s2 <= s3 in [0, 1] give non-negative increments summing to at most 1
    let r = 0.0..=1.0;
    [r.clone(), r.clone(), r].prop_map(|mut s: [f64; 3]| {
        s.sort_by(f64::total_cmp);
        Point3::new(s[0], s[1] - s[0], s[2] - s[1])
    })
}

fn point_in_hex_ref_domain() -> impl Strategy<Value = Point3<f64>> {
    let r = -1.0..=1.0;
    [r.clone(), r.clone(), r].prop_map(|[x, y, z]| Point3::new(x, y, z))
}

macro_rules! partition_of_unity_test {
    ($test_name:ident, $ref_domain_strategy:expr, $shape:expr) => {
        proptest! {
            #[test]
            fn $test_name(xi in $ref_domain_strategy) {
                let phi = ElementShape::<f64>::evaluate_basis(&$shape, &xi);
                let phi_sum: f64 = phi.sum();

                prop_assert!((phi_sum - 1.0f64).abs() <= 1e-12);
            }
        }
    };
}

macro_rules! partition_of_unity_gradient_test {
    ($test_name:ident, $ref_domain_strategy:expr, $shape:expr) => {
        proptest! {
            #[test]
            fn $test_name(xi in $ref_domain_strategy) {
                // Since the sum of basis functions is 1, the sum of the gradients must be 0
                let grad = ElementShape::<f64>::gradients(&$shape, &xi);
                let grad_sum = grad.column_sum();

                let mut zero = grad_sum.clone();
                zero.fill(0.0);

                assert_approx_matrix_eq!(grad_sum, zero, abstol = 1e-12);
            }
        }
    };
}

/// Checks that the shape function of node `i` is 1 at node `i` and 0 at every other node.
fn assert_lagrange_property<Shape>(shape: Shape)
where
    Shape: ElementShape<f64>,
    DefaultAllocator: BiDimAllocator<f64, Shape::GeometryDim, Shape::NodalDim>,
{
    let nodes = shape.reference_nodes();
    let n = nodes.len();
    assert_eq!(n, shape.num_nodes());

    let mut values = DMatrix::zeros(n, n);
    for (j, xi) in nodes.iter().enumerate() {
        let phi = shape.evaluate_basis(xi);
        for i in 0..n {
            values[(i, j)] = phi[i];
        }
    }
    assert_approx_matrix_eq!(&values, &DMatrix::<f64>::identity(n, n), abstol = 1e-12);
}

/// Compares analytic gradients against central differences of the basis functions.
fn assert_gradients_match_finite_differences<Shape>(shape: Shape, xi: &OPoint<f64, Shape::GeometryDim>)
where
    Shape: ElementShape<f64>,
    DefaultAllocator: BiDimAllocator<f64, Shape::GeometryDim, Shape::NodalDim>,
{
    let h = 1e-6;
    let grad = shape.gradients(xi);
    let mut grad_fd = grad.clone();
    for k in 0..xi.coords.len() {
        let mut xi_plus = xi.clone();
        let mut xi_minus = xi.clone();
        xi_plus[k] += h;
        xi_minus[k] -= h;
        let dphi = (shape.evaluate_basis(&xi_plus) - shape.evaluate_basis(&xi_minus)) / (2.0 * h);
        grad_fd.row_mut(k).copy_from(&dphi);
    }
    assert_approx_matrix_eq!(&grad, &grad_fd, abstol = 1e-7);
}

macro_rules! finite_difference_gradient_test {
    ($test_name:ident, $ref_domain_strategy:expr, $shape:expr) => {
        proptest! {
            #[test]
            fn $test_name(xi in $ref_domain_strategy) {
                assert_gradients_match_finite_differences($shape, &xi);
            }
        }
    };
}

partition_of_unity_test!(tri3_partition_of_unity, point_in_tri_ref_domain(), Tri3);
partition_of_unity_test!(tri6_partition_of_unity, point_in_tri_ref_domain(), Tri6);
partition_of_unity_test!(quad4_partition_of_unity, point_in_quad_ref_domain(), Quad4);
partition_of_unity_test!(tet4_partition_of_unity, point_in_tet_ref_domain(), Tet4);
partition_of_unity_test!(hex8_partition_of_unity, point_in_hex_ref_domain(), Hex8);

partition_of_unity_gradient_test!(tri3_partition_of_unity_gradient, point_in_tri_ref_domain(), Tri3);
partition_of_unity_gradient_test!(tri6_partition_of_unity_gradient, point_in_tri_ref_domain(), Tri6);
partition_of_unity_gradient_test!(quad4_partition_of_unity_gradient, point_in_quad_ref_domain(), Quad4);
partition_of_unity_gradient_test!(tet4_partition_of_unity_gradient, point_in_tet_ref_domain(), Tet4);
partition_of_unity_gradient_test!(hex8_partition_of_unity_gradient, point_in_hex_ref_domain(), Hex8);

finite_difference_gradient_test!(tri3_gradients_match_finite_differences, point_in_tri_ref_domain(), Tri3);
finite_difference_gradient_test!(tri6_gradients_match_finite_differences, point_in_tri_ref_domain(), Tri6);
finite_difference_gradient_test!(quad4_gradients_match_finite_differences, point_in_quad_ref_domain(), Quad4);
finite_difference_gradient_test!(tet4_gradients_match_finite_differences, point_in_tet_ref_domain(), Tet4);
finite_difference_gradient_test!(hex8_gradients_match_finite_differences, point_in_hex_ref_domain(), Hex8);

#[test]
fn lagrange_property() {
    assert_lagrange_property(Tri3);
    assert_lagrange_property(Tri6);
    assert_lagrange_property(Quad4);
    assert_lagrange_property(Tet4);
    assert_lagrange_property(Hex8);
}

#[test]
fn element_kind_matches_shape() {
    assert_eq!(ElementShape::<f64>::kind(&Tri3), ElementKind::Tri3);
    assert_eq!(ElementShape::<f64>::kind(&Tri6), ElementKind::Tri6);
    assert_eq!(ElementShape::<f64>::kind(&Quad4), ElementKind::Quad4);
    assert_eq!(ElementShape::<f64>::kind(&Tet4), ElementKind::Tet4);
    assert_eq!(ElementShape::<f64>::kind(&Hex8), ElementKind::Hex8);

    fn check<Shape>(shape: Shape)
    where
        Shape: ElementShape<f64>,
        DefaultAllocator: BiDimAllocator<f64, Shape::GeometryDim, Shape::NodalDim>,
    {
        let kind = shape.kind();
        assert_eq!(kind.num_nodes(), shape.num_nodes());
        assert_eq!(kind.num_nodes(), shape.reference_nodes().len());
        assert_eq!(kind.num_quadrature_points(), shape.quadrature().0.len());
        assert_eq!(kind.geometry_dim(), shape.reference_nodes()[0].coords.len());
    }
    check(Tri3);
    check(Tri6);
    check(Quad4);
    check(Tet4);
    check(Hex8);
}

#[test]
fn element_kind_all_is_exhaustive_and_distinct() {
    let kinds = ElementKind::ALL;
    for (i, a) in kinds.iter().enumerate() {
        for b in &kinds[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(kinds.len(), 5);
}
