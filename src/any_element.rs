//! Runtime selection of the element shape.
use crate::element::{ElementKind, Hex8, Quad4, Tet4, Tri3, Tri6};
use crate::error::KinematicsError;
use crate::kinematics::{Configuration, ElementGeometry, GradientMode};
use crate::Real;

/// An element geometry whose shape is only known at runtime.
///
/// Offers the dimension-independent subset of the [`ElementGeometry`] API. Match on the enum
/// (or use `TryFrom`) to get at the statically typed element.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyElementGeometry<T: Real> {
    Tri3(ElementGeometry<T, Tri3>),
    Tri6(ElementGeometry<T, Tri6>),
    Quad4(ElementGeometry<T, Quad4>),
    Tet4(ElementGeometry<T, Tet4>),
    Hex8(ElementGeometry<T, Hex8>),
}

macro_rules! dispatch {
    ($self:expr, $element:ident => $body:expr) => {
        match $self {
            AnyElementGeometry::Tri3($element) => $body,
            AnyElementGeometry::Tri6($element) => $body,
            AnyElementGeometry::Quad4($element) => $body,
            AnyElementGeometry::Tet4($element) => $body,
            AnyElementGeometry::Hex8($element) => $body,
        }
    };
}

impl<T: Real> AnyElementGeometry<T> {
    /// Allocates an element of the given kind with no coordinates set.
    pub fn new(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Tri3 => Self::Tri3(ElementGeometry::new(Tri3)),
            ElementKind::Tri6 => Self::Tri6(ElementGeometry::new(Tri6)),
            ElementKind::Quad4 => Self::Quad4(ElementGeometry::new(Quad4)),
            ElementKind::Tet4 => Self::Tet4(ElementGeometry::new(Tet4)),
            ElementKind::Hex8 => Self::Hex8(ElementGeometry::new(Hex8)),
        }
    }

    pub fn kind(&self) -> ElementKind {
        dispatch!(self, element => element.kind())
    }

    pub fn num_nodes(&self) -> usize {
        dispatch!(self, element => element.num_nodes())
    }

    pub fn geometry_dim(&self) -> usize {
        dispatch!(self, element => element.geometry_dim())
    }

    pub fn num_quadrature_points(&self) -> usize {
        dispatch!(self, element => element.num_quadrature_points())
    }

    pub fn set_reference_coordinates(&mut self, node: usize, coords: &[T]) -> Result<(), KinematicsError> {
        dispatch!(self, element => element.set_reference_coordinates(node, coords))
    }

    pub fn set_current_coordinates(&mut self, node: usize, coords: &[T]) -> Result<(), KinematicsError> {
        dispatch!(self, element => element.set_current_coordinates(node, coords))
    }

    /// Sets all reference coordinates from a flat, node-major slice of length
    /// `num_nodes * geometry_dim`.
    pub fn set_reference_coordinates_flat(&mut self, coords: &[T]) -> Result<(), KinematicsError> {
        let d = self.geometry_dim();
        self.check_flat_len(coords.len())?;
        for (node, x) in coords.chunks_exact(d).enumerate() {
            self.set_reference_coordinates(node, x)?;
        }
        Ok(())
    }

    /// Sets all current coordinates from a flat, node-major slice of length
    /// `num_nodes * geometry_dim`.
    pub fn set_current_coordinates_flat(&mut self, coords: &[T]) -> Result<(), KinematicsError> {
        let d = self.geometry_dim();
        self.check_flat_len(coords.len())?;
        for (node, x) in coords.chunks_exact(d).enumerate() {
            self.set_current_coordinates(node, x)?;
        }
        Ok(())
    }

    pub fn reset_current_coordinates(&mut self) {
        dispatch!(self, element => element.reset_current_coordinates())
    }

    pub fn compute_gradients(&mut self, mode: GradientMode) -> Result<(), KinematicsError> {
        dispatch!(self, element => element.compute_gradients(mode))
    }

    pub fn compute_gradients_linear(&mut self) -> Result<(), KinematicsError> {
        self.compute_gradients(GradientMode::Linear)
    }

    pub fn compute_gradients_nonlinear(&mut self) -> Result<(), KinematicsError> {
        self.compute_gradients(GradientMode::Nonlinear)
    }

    pub fn is_computed(&self, configuration: Configuration) -> bool {
        dispatch!(self, element => element.is_computed(configuration))
    }

    pub fn weight(&self, quadrature_point: usize) -> Result<T, KinematicsError> {
        dispatch!(self, element => element.weight(quadrature_point))
    }

    pub fn gradient(&self, node: usize, quadrature_point: usize, dim: usize) -> Result<T, KinematicsError> {
        dispatch!(self, element => element.gradient(node, quadrature_point, dim))
    }

    pub fn current_gradient(&self, node: usize, quadrature_point: usize, dim: usize) -> Result<T, KinematicsError> {
        dispatch!(self, element => element.current_gradient(node, quadrature_point, dim))
    }

    pub fn gradient_in(
        &self,
        configuration: Configuration,
        node: usize,
        quadrature_point: usize,
        dim: usize,
    ) -> Result<T, KinematicsError> {
        dispatch!(self, element => element.gradient_in(configuration, node, quadrature_point, dim))
    }

    pub fn jacobian_determinant(&self, configuration: Configuration, quadrature_point: usize) -> Result<T, KinematicsError> {
        dispatch!(self, element => element.jacobian_determinant(configuration, quadrature_point))
    }

    pub fn reference_jacobian_determinant(&self, quadrature_point: usize) -> Result<T, KinematicsError> {
        self.jacobian_determinant(Configuration::Reference, quadrature_point)
    }

    pub fn current_jacobian_determinant(&self, quadrature_point: usize) -> Result<T, KinematicsError> {
        self.jacobian_determinant(Configuration::Current, quadrature_point)
    }

    pub fn volume_ratio(&self, quadrature_point: usize) -> Result<T, KinematicsError> {
        dispatch!(self, element => element.volume_ratio(quadrature_point))
    }

    pub fn measure(&self, configuration: Configuration) -> Result<T, KinematicsError> {
        dispatch!(self, element => element.measure(configuration))
    }

    fn check_flat_len(&self, len: usize) -> Result<(), KinematicsError> {
        let (n, d) = (self.num_nodes(), self.geometry_dim());
        if len == n * d {
            Ok(())
        } else if len % d == 0 {
            Err(KinematicsError::NodeCountMismatch {
                expected: n,
                actual: len / d,
            })
        } else {
            Err(KinematicsError::CoordinateDimensionMismatch {
                expected: d,
                actual: len % d,
            })
        }
    }
}

macro_rules! impl_any_element_conversions {
    ($shape:ident) => {
        impl<T: Real> From<ElementGeometry<T, $shape>> for AnyElementGeometry<T> {
            fn from(element: ElementGeometry<T, $shape>) -> Self {
                Self::$shape(element)
            }
        }

        impl<T: Real> TryFrom<AnyElementGeometry<T>> for ElementGeometry<T, $shape> {
            type Error = KinematicsError;

            fn try_from(element: AnyElementGeometry<T>) -> Result<Self, Self::Error> {
                match element {
                    AnyElementGeometry::$shape(element) => Ok(element),
                    other => Err(KinematicsError::ElementKindMismatch {
                        expected: ElementKind::$shape,
                        actual: other.kind(),
                    }),
                }
            }
        }
    };
}

impl_any_element_conversions!(Tri3);
impl_any_element_conversions!(Tri6);
impl_any_element_conversions!(Quad4);
impl_any_element_conversions!(Tet4);
impl_any_element_conversions!(Hex8);
