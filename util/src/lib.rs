//! Test helpers shared by the `isokin` crates.

/// Asserts that two matrices agree entrywise up to an absolute tolerance.
///
/// Both operands must support subtraction by reference or by value, i.e. pass
/// references when the matrices are used afterwards.
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $x - $y;

        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

/// Asserts that two scalars agree up to an absolute tolerance, or up to a tolerance relative
/// to the larger magnitude of the two.
#[macro_export]
macro_rules! assert_approx_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let (x, y) = ($x, $y);
        let absdiff = (x - y).abs();
        if !(absdiff <= $tol) {
            panic!(
                "assert_approx_eq!({}, {}) failed: left = {:e}, right = {:e}, abstol = {:e}",
                stringify!($x),
                stringify!($y),
                x,
                y,
                $tol
            );
        }
    }};
    ($x:expr, $y:expr, reltol = $tol:expr) => {{
        let (x, y) = ($x, $y);
        let absdiff = (x - y).abs();
        let scale = x.abs().max(y.abs());
        if !(absdiff <= $tol * scale) {
            panic!(
                "assert_approx_eq!({}, {}) failed: left = {:e}, right = {:e}, reltol = {:e}",
                stringify!($x),
                stringify!($y),
                x,
                y,
                $tol
            );
        }
    }};
}

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}
