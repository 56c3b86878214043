use crate::error::{PhysicsError, Result};
use crate::particle::Particle;
use crate::vector::Vector;
use crate::world_gen::{generate_from_config, GenerationConfig};
use log::{debug, warn};
use ordered_float::OrderedFloat;
use rayon::prelude::*;

// Plot extent used when the simulation carries no box length.
const DEFAULT_BOX_LENGTH: f64 = 100.;
const PLOT_PADDING: f64 = 2.;
const DEFAULT_FIGURE_SIZE: f64 = 10.;
const MARKER_SCALE: f64 = 12.;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub figure_size: f64,
}

impl PlotBounds {
    pub fn for_box(box_length: Option<f64>) -> PlotBounds {
        match box_length {
            Some(length) => PlotBounds {
                x: (-PLOT_PADDING, length + PLOT_PADDING),
                y: (-PLOT_PADDING, length + PLOT_PADDING),
                figure_size: length / 10.,
            },
            None => PlotBounds {
                x: (-PLOT_PADDING, DEFAULT_BOX_LENGTH + PLOT_PADDING),
                y: (-PLOT_PADDING, DEFAULT_BOX_LENGTH + PLOT_PADDING),
                figure_size: DEFAULT_FIGURE_SIZE,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Equal-width bins over the data range; the last bin includes its
    /// upper edge.
    pub fn new(values: &[f64], bins: usize) -> Result<Histogram> {
        if bins == 0 {
            return Err(PhysicsError::InvalidConfiguration(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "cannot bin non-finite value {}",
                bad
            )));
        }
        let (mut lo, mut hi) = match (
            values.iter().copied().map(OrderedFloat).min(),
            values.iter().copied().map(OrderedFloat).max(),
        ) {
            (Some(lo), Some(hi)) => (lo.0, hi.0),
            _ => (0., 1.),
        };
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0; bins];
        for v in values {
            let index = ((v - lo) / width).floor() as usize;
            counts[index.min(bins - 1)] += 1;
        }
        Ok(Histogram { edges, counts })
    }
}

/// Particles plus the frames an external stepper has recorded for them.
#[derive(Clone, Debug, Default)]
pub struct Simulation {
    pub particles: Vec<Particle>,
    pub trajectory: Vec<Vec<Vector>>,
    pub box_length: Option<f64>,
}

impl Simulation {
    pub fn new(particles: Vec<Particle>, box_length: Option<f64>) -> Simulation {
        Simulation {
            particles,
            trajectory: Vec::new(),
            box_length,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Result<Simulation> {
        Ok(Simulation::new(
            generate_from_config(config)?,
            Some(config.box_length),
        ))
    }

    pub fn positions(&self) -> Vec<Vector> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn record_frame(&mut self) {
        let frame = self.positions();
        self.trajectory.push(frame);
        debug!("Recorded frame {}", self.trajectory.len() - 1);
    }

    /// One particle's recorded positions, or its current position when no
    /// frames have been recorded.
    pub fn particle_path(&self, index: usize) -> Option<Vec<Vector>> {
        let particle = self.particles.get(index)?;
        if self.trajectory.is_empty() {
            return Some(vec![particle.position]);
        }
        Some(
            self.trajectory
                .iter()
                .filter_map(|frame| frame.get(index).copied())
                .collect(),
        )
    }

    pub fn speeds(&self) -> Result<Vec<f64>> {
        self.particles.iter().map(Particle::speed).collect()
    }

    pub fn speed_histogram(&self, bins: usize) -> Result<Histogram> {
        Histogram::new(&self.speeds()?, bins)
    }

    /// Index pairs `(i, j)`, `i < j`, whose particles overlap.
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let particles = &self.particles;
        let pairs: Vec<(usize, usize)> = (0..particles.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                ((i + 1)..particles.len())
                    .filter(move |&j| particles[i].overlap(&particles[j]))
                    .map(move |j| (i, j))
            })
            .collect();
        if !pairs.is_empty() {
            warn!("{} overlapping particle pairs", pairs.len());
        }
        pairs
    }

    pub fn plot_bounds(&self) -> PlotBounds {
        PlotBounds::for_box(self.box_length)
    }

    pub fn marker_size(&self) -> f64 {
        self.particles
            .first()
            .map_or(MARKER_SCALE, |p| p.radius * MARKER_SCALE)
    }
}
