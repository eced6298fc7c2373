use isokin::element::{ElementShape, Hex8};
use isokin::nalgebra::Point3;
use matrixcompare::assert_scalar_eq;

#[test]
fn hex8_basis_at_center() {
    let phi = ElementShape::<f64>::evaluate_basis(&Hex8, &Point3::origin());
    for i in 0..8 {
        assert_scalar_eq!(phi[i], 0.125, comp = abs, tol = 1e-15);
    }
}

#[test]
fn hex8_gradients_point_away_from_center() {
    // At the center, the gradient of each shape function is its node position divided by 8
    let grad = ElementShape::<f64>::gradients(&Hex8, &Point3::origin());
    let nodes = ElementShape::<f64>::reference_nodes(&Hex8);
    for (i, node) in nodes.iter().enumerate() {
        for k in 0..3 {
            assert_scalar_eq!(grad[(k, i)], node[k] / 8.0, comp = abs, tol = 1e-15);
        }
    }
}
