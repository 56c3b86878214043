use nalgebra::Vector2;

use crate::error::{PhysicsError, Result};

// Remainders shorter than this fraction of the input are rounding noise.
const PARALLEL_TOLERANCE: f64 = 1e-12;

/// A point or displacement in the plane.
///
/// Arithmetic (`+`, `-`, `* f64`, `/ f64`), `dot` and `norm` come from
/// nalgebra and never mutate their operands. Only the checked operations in
/// [`VectorExt`] can fail.
pub type Vector = Vector2<f64>;

pub trait VectorExt: Sized {
    /// Divides both components by `k`, refusing an exact zero.
    fn checked_div(&self, k: f64) -> Result<Self>;
    /// The vector scaled to unit length.
    fn unit(&self) -> Result<Self>;
}

impl VectorExt for Vector {
    fn checked_div(&self, k: f64) -> Result<Vector> {
        if k == 0. {
            return Err(PhysicsError::DivisionByZero);
        }
        Ok(self / k)
    }

    fn unit(&self) -> Result<Vector> {
        self.checked_div(self.norm())
    }
}

pub fn add(a: &Vector, b: &Vector) -> Vector {
    a + b
}

pub fn subtract(a: &Vector, b: &Vector) -> Vector {
    a - b
}

pub fn scale(v: &Vector, k: f64) -> Vector {
    v * k
}

pub fn divide(v: &Vector, k: f64) -> Result<Vector> {
    v.checked_div(k)
}

pub fn dot(a: &Vector, b: &Vector) -> f64 {
    a.dot(b)
}

pub fn norm(v: &Vector) -> f64 {
    v.norm()
}

/// A vector split into its part along a direction and the orthogonal rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition {
    pub normal: Vector,
    pub normal_component: f64,
    pub along: Vector,
    pub remainder: Vector,
    /// Unit vector along `remainder`; `None` when the input is parallel to
    /// the direction, up to rounding.
    pub tangent: Option<Vector>,
}

pub fn decompose(v: &Vector, direction: &Vector) -> Result<Decomposition> {
    let normal = direction.unit()?;
    let normal_component = v.dot(&normal);
    let along = normal * normal_component;
    let remainder = v - along;
    let tangent = if remainder.norm() <= PARALLEL_TOLERANCE * v.norm() {
        None
    } else {
        remainder.unit().ok()
    };
    Ok(Decomposition {
        normal,
        normal_component,
        along,
        remainder,
        tangent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn close(a: &Vector, b: &Vector) -> bool {
        (a - b).norm() < EPS
    }

    #[test]
    fn add_commutes() {
        let a = Vector::new(1.5, -2.);
        let b = Vector::new(-0.25, 7.);
        assert_eq!(add(&a, &b), add(&b, &a));
        assert_eq!(add(&a, &b), Vector::new(1.25, 5.));
    }

    #[test]
    fn subtract_is_antisymmetric() {
        let a = Vector::new(3., 4.);
        let b = Vector::new(-1., 2.5);
        assert_eq!(subtract(&a, &b), scale(&subtract(&b, &a), -1.));
    }

    #[test]
    fn divide_undoes_scale() {
        let v = Vector::new(0.3, -11.7);
        for k in [0.1, -3., 1e-3, 250.].iter() {
            let back = divide(&scale(&v, *k), *k).unwrap();
            assert!(close(&back, &v), "{:?} != {:?} for k={}", back, v, k);
        }
    }

    #[test]
    fn divide_by_zero_fails() {
        let v = Vector::new(1., 1.);
        assert_eq!(divide(&v, 0.), Err(PhysicsError::DivisionByZero));
        assert_eq!(v.checked_div(-0.), Err(PhysicsError::DivisionByZero));
    }

    #[test]
    fn operations_leave_operands_alone() {
        let a = Vector::new(1., 2.);
        let b = Vector::new(3., 4.);
        let _ = add(&a, &b);
        let _ = scale(&a, 5.);
        let _ = divide(&b, 2.);
        assert_eq!(a, Vector::new(1., 2.));
        assert_eq!(b, Vector::new(3., 4.));
    }

    #[test]
    fn norm_and_dot() {
        assert_eq!(norm(&Vector::new(0., 0.)), 0.);
        assert_eq!(norm(&Vector::new(3., -4.)), 5.);
        assert!(norm(&Vector::new(-1e-3, -2.)) >= 0.);

        let a = Vector::new(2., -1.);
        let b = Vector::new(0.5, 4.);
        assert_eq!(dot(&a, &b), dot(&b, &a));
        assert_eq!(dot(&a, &b), -3.);
    }

    #[test]
    fn unit_of_zero_vector_fails() {
        assert_eq!(Vector::zeros().unit(), Err(PhysicsError::DivisionByZero));
        assert!(close(&Vector::new(0., -2.).unit().unwrap(), &Vector::new(0., -1.)));
    }

    #[test]
    fn decompose_along_x() {
        let d = decompose(&Vector::new(3., 2.), &Vector::new(1., 0.)).unwrap();
        assert_eq!(d.normal, Vector::new(1., 0.));
        assert_eq!(d.normal_component, 3.);
        assert_eq!(d.along, Vector::new(3., 0.));
        assert_eq!(d.remainder, Vector::new(0., 2.));
        assert_eq!(d.tangent, Some(Vector::new(0., 1.)));
    }

    #[test]
    fn decompose_parts_are_orthogonal_and_sum_back() {
        let v = Vector::new(3., 2.);
        let d = decompose(&v, &Vector::new(-0.4, 0.7)).unwrap();
        assert!(close(&(d.along + d.remainder), &v));
        assert!(d.along.dot(&d.remainder).abs() < EPS);
        assert!((d.normal.norm() - 1.).abs() < EPS);
    }

    #[test]
    fn decompose_parallel_has_no_tangent() {
        let exact = decompose(&Vector::new(0., 5.), &Vector::new(0., 1.)).unwrap();
        assert_eq!(exact.remainder, Vector::zeros());
        assert_eq!(exact.tangent, None);

        // Both leave a remainder of a few ulps after rounding.
        for (v, direction) in [
            (Vector::new(2., 2.), Vector::new(1., 1.)),
            (Vector::new(3., 2.), Vector::new(1.5, 1.)),
        ]
        .iter()
        {
            let d = decompose(v, direction).unwrap();
            assert!(d.remainder.norm() < EPS);
            assert_eq!(d.tangent, None, "{:?} along {:?}", v, direction);
        }

        let zero = decompose(&Vector::zeros(), &Vector::new(1., 0.)).unwrap();
        assert_eq!(zero.tangent, None);
    }

    #[test]
    fn decompose_nearly_parallel_keeps_tangent() {
        let d = decompose(&Vector::new(3., 2.), &Vector::new(1.5, 1.001)).unwrap();
        let t = d.tangent.unwrap();
        assert!((t.norm() - 1.).abs() < EPS);
        assert!(t.dot(&d.normal).abs() < 1e-9);
    }

    #[test]
    fn decompose_zero_direction_fails() {
        assert_eq!(
            decompose(&Vector::new(3., 2.), &Vector::zeros()),
            Err(PhysicsError::DivisionByZero)
        );
    }
}
