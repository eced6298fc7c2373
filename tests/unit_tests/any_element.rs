use isokin::any_element::AnyElementGeometry;
use isokin::element::{ElementKind, Quad4, Tri3};
use isokin::error::KinematicsError;
use isokin::kinematics::{Configuration, ElementGeometry, GradientMode};
use isokin::nalgebra::Point2;
use matrixcompare::assert_scalar_eq;

#[test]
fn new_allocates_requested_kind() {
    for kind in ElementKind::ALL {
        let element = AnyElementGeometry::<f64>::new(kind);
        assert_eq!(element.kind(), kind);
        assert_eq!(element.num_nodes(), kind.num_nodes());
        assert_eq!(element.geometry_dim(), kind.geometry_dim());
        assert_eq!(element.num_quadrature_points(), kind.num_quadrature_points());
        assert!(!element.is_computed(Configuration::Reference));
    }
}

#[test]
fn flat_coordinates_hex8_unit_cube() {
    let mut element = AnyElementGeometry::new(ElementKind::Hex8);
    #[rustfmt::skip]
    let coords = [
        0.0, 0.0, 0.0,
        1.0, 0.0, 0.0,
        1.0, 1.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 1.0,
        0.0, 1.0, 1.0,
    ];
    element.set_reference_coordinates_flat(&coords).unwrap();
    element.compute_gradients(GradientMode::Nonlinear).unwrap();

    assert_scalar_eq!(element.measure(Configuration::Reference).unwrap(), 1.0, comp = abs, tol = 1e-14);
    for q in 0..8 {
        assert_scalar_eq!(element.reference_jacobian_determinant(q).unwrap(), 0.125, comp = abs, tol = 1e-15);
        assert_eq!(element.volume_ratio(q).unwrap(), 1.0);
    }

    element.set_current_coordinates_flat(&coords.map(|x| 3.0 * x)).unwrap();
    element.compute_gradients_nonlinear().unwrap();
    assert_scalar_eq!(element.measure(Configuration::Current).unwrap(), 27.0, comp = abs, tol = 1e-12);
    assert_scalar_eq!(
        element.current_gradient(6, 0, 2).unwrap(),
        element.gradient(6, 0, 2).unwrap() / 3.0,
        comp = abs,
        tol = 1e-14
    );
}

#[test]
fn flat_coordinates_length_is_checked() {
    let mut element = AnyElementGeometry::<f64>::new(ElementKind::Tri3);
    assert_eq!(
        element.set_reference_coordinates_flat(&[0.0; 8]),
        Err(KinematicsError::NodeCountMismatch { expected: 3, actual: 4 })
    );
    assert_eq!(
        element.set_reference_coordinates_flat(&[0.0; 7]),
        Err(KinematicsError::CoordinateDimensionMismatch { expected: 2, actual: 1 })
    );
    assert_eq!(
        element.compute_gradients_linear(),
        Err(KinematicsError::ReferenceCoordinatesNotSet { node: 0 })
    );
}

#[test]
fn conversions() {
    let vertices = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
    let triangle = ElementGeometry::from_reference_vertices(Tri3, &vertices).unwrap();
    let any = AnyElementGeometry::from(triangle.clone());
    assert_eq!(any.kind(), ElementKind::Tri3);

    assert_eq!(
        ElementGeometry::<f64, Quad4>::try_from(any.clone()),
        Err(KinematicsError::ElementKindMismatch {
            expected: ElementKind::Quad4,
            actual: ElementKind::Tri3
        })
    );
    assert_eq!(ElementGeometry::<f64, Tri3>::try_from(any), Ok(triangle));
}

#[test]
fn matches_statically_typed_element() {
    let vertices = [
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 0.5),
        Point2::new(2.5, 2.0),
        Point2::new(-0.5, 1.5),
    ];
    let mut typed = ElementGeometry::from_reference_vertices(Quad4, &vertices).unwrap();
    let mut any = AnyElementGeometry::new(ElementKind::Quad4);
    for (node, x) in vertices.iter().enumerate() {
        any.set_reference_coordinates(node, x.coords.as_slice()).unwrap();
    }
    typed.compute_gradients_linear().unwrap();
    any.compute_gradients_linear().unwrap();

    for q in 0..4 {
        assert_eq!(any.weight(q).unwrap(), typed.weight(q).unwrap());
        assert_eq!(
            any.jacobian_determinant(Configuration::Reference, q).unwrap(),
            typed.reference_jacobian_determinant(q).unwrap()
        );
        for node in 0..4 {
            for dim in 0..2 {
                assert_eq!(
                    any.gradient_in(Configuration::Reference, node, q, dim).unwrap(),
                    typed.gradient(node, q, dim).unwrap()
                );
            }
        }
    }
    assert!(any.current_jacobian_determinant(0).is_err());

    any.reset_current_coordinates();
    assert_eq!(AnyElementGeometry::from(typed), any);
}
