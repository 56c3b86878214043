use crate::error::{PhysicsError, Result};
use crate::vector::{Vector, VectorExt};

/// One simulated body.
///
/// A plain record: `new` stores whatever it is given, so a zero mass or a
/// negative radius only surfaces later (as `DivisionByZero` from
/// [`Particle::velocity`], or as a meaningless [`Particle::overlap`]). Use
/// [`Particle::validated`] to reject such values up front.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector,
    pub momentum: Vector,
    pub radius: f64,
    pub mass: f64,
}

impl Particle {
    pub fn new(position: Vector, momentum: Vector, radius: f64, mass: f64) -> Particle {
        Particle {
            position,
            momentum,
            radius,
            mass,
        }
    }

    pub fn validated(
        position: Vector,
        momentum: Vector,
        radius: f64,
        mass: f64,
    ) -> Result<Particle> {
        let finite = |v: &Vector| v.x.is_finite() && v.y.is_finite();
        if !finite(&position) || !finite(&momentum) {
            return Err(PhysicsError::InvalidConfiguration(
                "position and momentum must be finite".to_string(),
            ));
        }
        if !(mass.is_finite() && mass > 0.) {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "mass must be positive, got {}",
                mass
            )));
        }
        if !(radius.is_finite() && radius >= 0.) {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "radius must be non-negative, got {}",
                radius
            )));
        }
        Ok(Particle::new(position, momentum, radius, mass))
    }

    pub fn velocity(&self) -> Result<Vector> {
        self.momentum.checked_div(self.mass)
    }

    pub fn speed(&self) -> Result<f64> {
        Ok(self.velocity()?.norm())
    }

    pub fn displacement_to(&self, other: &Particle) -> Vector {
        other.position - self.position
    }

    /// Whether the two discs intersect. Touching discs do not overlap.
    pub fn overlap(&self, other: &Particle) -> bool {
        (self.position - other.position).norm() < self.radius + other.radius
    }
}
