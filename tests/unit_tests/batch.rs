use isokin::any_element::AnyElementGeometry;
use isokin::batch::{compute_gradients_par, compute_gradients_seq};
use isokin::element::{ElementKind, Quad4};
use isokin::kinematics::{Configuration, ElementGeometry, GradientMode};
use isokin::nalgebra::Point2;

/// A row of unit squares, with one inverted element if requested.
fn quad_strip(num_elements: usize, inverted: Option<usize>) -> Vec<ElementGeometry<f64, Quad4>> {
    (0..num_elements)
        .map(|i| {
            let x0 = i as f64;
            let mut vertices = [
                Point2::new(x0, 0.0),
                Point2::new(x0 + 1.0, 0.0),
                Point2::new(x0 + 1.0, 1.0),
                Point2::new(x0, 1.0),
            ];
            if inverted == Some(i) {
                vertices.swap(1, 3);
            }
            ElementGeometry::from_reference_vertices(Quad4, &vertices).unwrap()
        })
        .collect()
}

#[test]
fn parallel_matches_sequential() {
    let mut par = quad_strip(500, None);
    let mut seq = par.clone();
    compute_gradients_par(&mut par, GradientMode::Nonlinear).unwrap();
    compute_gradients_seq(&mut seq, GradientMode::Nonlinear).unwrap();
    assert_eq!(par, seq);
    assert!(par.iter().all(|e| e.is_computed(Configuration::Current)));
}

#[test]
fn parallel_reports_failing_element() {
    let mut elements = quad_strip(300, Some(217));
    let err = compute_gradients_par(&mut elements, GradientMode::Linear).unwrap_err();
    assert!(format!("{err:#}").contains("element 217"));

    assert!(!elements[217].is_computed(Configuration::Reference));
}

#[test]
fn sequential_stops_at_first_failure() {
    let mut elements = quad_strip(10, Some(4));
    let err = compute_gradients_seq(&mut elements, GradientMode::Linear).unwrap_err();
    assert!(err.to_string().contains("element 4"));
    assert!(elements[..4].iter().all(|e| e.is_computed(Configuration::Reference)));
    assert!(elements[4..].iter().all(|e| !e.is_computed(Configuration::Reference)));
}

#[test]
fn mixed_element_kinds() {
    let mut elements: Vec<_> = ElementKind::ALL
        .iter()
        .map(|&kind| AnyElementGeometry::<f64>::new(kind))
        .collect();
    // Without coordinates every element fails
    assert!(compute_gradients_par(&mut elements, GradientMode::Linear).is_err());

    let mut triangle = AnyElementGeometry::new(ElementKind::Tri3);
    triangle
        .set_reference_coordinates_flat(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0])
        .unwrap();
    let mut tet = AnyElementGeometry::new(ElementKind::Tet4);
    tet.set_reference_coordinates_flat(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
        .unwrap();
    let mut elements = vec![triangle, tet];
    compute_gradients_par(&mut elements, GradientMode::Nonlinear).unwrap();
    assert_eq!(elements[0].measure(Configuration::Current).unwrap(), 0.5);
    assert_eq!(elements[1].measure(Configuration::Reference).unwrap(), 1.0 / 6.0);
}
