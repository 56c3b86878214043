pub mod config;
pub mod error;
pub mod particle;
pub mod render;
pub mod simulation;
pub mod vector;
pub mod world_gen;

pub use error::PhysicsError;
pub use particle::Particle;
pub use simulation::{Histogram, PlotBounds, Simulation};
pub use vector::{decompose, Decomposition, Vector, VectorExt};
pub use world_gen::{generate_particles, GenerationConfig};
