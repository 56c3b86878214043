use crate::error::{PhysicsError, Result};
use crate::particle::Particle;
use crate::vector::Vector;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::Deserialize;

// Redraws allowed per particle before overlap rejection gives up.
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

fn default_radius() -> f64 {
    1.
}

fn default_mass() -> f64 {
    1.
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GenerationConfig {
    pub count: usize,
    pub box_length: f64,
    /// Shared by every particle when set; drawn per particle otherwise.
    #[serde(default)]
    pub initial_momentum: Option<Vector>,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub reject_overlaps: bool,
    #[serde(default)]
    pub validate: bool,
}

impl GenerationConfig {
    pub fn new(count: usize, box_length: f64) -> GenerationConfig {
        GenerationConfig {
            count,
            box_length,
            initial_momentum: None,
            radius: default_radius(),
            mass: default_mass(),
            seed: None,
            reject_overlaps: false,
            validate: false,
        }
    }
}

/// `count` unit particles uniformly placed in `[0, box_length)²`.
///
/// Without `initial_momentum` each particle gets its own momentum, uniform
/// in `[-box_length/200, box_length/200)` per axis.
pub fn generate_particles(
    count: usize,
    box_length: f64,
    initial_momentum: Option<Vector>,
) -> Vec<Particle> {
    let config = GenerationConfig {
        initial_momentum,
        ..GenerationConfig::new(count, box_length)
    };
    // Default config neither validates nor rejects, so this cannot fail.
    generate_with(&config, &mut rand::thread_rng()).unwrap_or_default()
}

/// Like [`generate_particles`], honouring the seed when one is configured.
pub fn generate_from_config(config: &GenerationConfig) -> Result<Vec<Particle>> {
    match config.seed {
        Some(seed) => generate_with(config, &mut Pcg64::seed_from_u64(seed)),
        None => generate_with(config, &mut rand::thread_rng()),
    }
}

pub fn generate_with<R: Rng + ?Sized>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<Particle>> {
    let mut particles = std::vec::Vec::<Particle>::new();
    particles.reserve(config.count);

    let mut attempts = 0;
    while particles.len() < config.count {
        let position = Vector::new(
            rng.gen::<f64>() * config.box_length,
            rng.gen::<f64>() * config.box_length,
        );
        let momentum = match config.initial_momentum {
            Some(momentum) => momentum,
            None => Vector::new(
                (rng.gen::<f64>() - 0.5) * config.box_length / 100.,
                (rng.gen::<f64>() - 0.5) * config.box_length / 100.,
            ),
        };
        let particle = if config.validate {
            Particle::validated(position, momentum, config.radius, config.mass)?
        } else {
            Particle::new(position, momentum, config.radius, config.mass)
        };

        if config.reject_overlaps && particles.iter().any(|other| other.overlap(&particle)) {
            attempts += 1;
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                return Err(PhysicsError::InvalidConfiguration(format!(
                    "could not place particle {} of {} without overlap in a box of length {}",
                    particles.len() + 1,
                    config.count,
                    config.box_length
                )));
            }
            continue;
        }
        if attempts > 0 {
            debug!("Placed particle {} after {} redraws", particles.len(), attempts);
        }
        attempts = 0;
        particles.push(particle);
    }

    info!(
        "Generated {} particles in a box of length {}",
        particles.len(),
        config.box_length
    );
    Ok(particles)
}
