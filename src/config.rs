//! YAML run configuration for the `particles` binary.
//!
//! ```yaml
//! particles:
//!   count: 20
//!   box_length: 100.0
//!   initial_momentum: [2.0, 3.0]   # omit to draw momenta per particle
//!   seed: 7
//! display:
//!   box_length: 100.0              # omit for the default plot extent
//!   bins: 10
//! trajectory:                      # frames recorded by an external stepper
//!   - [[1.0, 2.0], [3.0, 4.0]]
//!   - [[1.5, 2.0], [3.0, 3.5]]
//! ```

use crate::vector::Vector;
use crate::world_gen::GenerationConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

fn default_bins() -> usize {
    10
}

fn default_width() -> usize {
    60
}

fn default_height() -> usize {
    30
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub box_length: Option<f64>,
    #[serde(default = "default_bins")]
    pub bins: usize,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        DisplayConfig {
            box_length: None,
            bins: default_bins(),
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RunConfig {
    pub particles: GenerationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub trajectory: Vec<Vec<Vector>>,
}

impl RunConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<RunConfig> {
        let config: RunConfig =
            serde_yaml::from_reader(reader).context("malformed run configuration")?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<RunConfig> {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        RunConfig::from_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let yaml = "particles:\n  count: 3\n  box_length: 10.0\n";
        let config = RunConfig::from_reader(yaml.as_bytes()).unwrap();
        assert_eq!(config.particles, GenerationConfig::new(3, 10.));
        assert_eq!(config.display, DisplayConfig::default());
        assert!(config.trajectory.is_empty());
    }

    #[test]
    fn full_config() {
        let yaml = "
particles:
  count: 4
  box_length: 50.0
  initial_momentum: [2.0, 3.0]
  radius: 0.5
  seed: 9
  reject_overlaps: true
display:
  box_length: 40.0
  bins: 5
trajectory:
  - [[1.0, 2.0], [3.0, 4.0]]
  - [[1.5, 2.0], [3.0, 3.5]]
";
        let config = RunConfig::from_reader(yaml.as_bytes()).unwrap();
        assert_eq!(config.particles.initial_momentum, Some(Vector::new(2., 3.)));
        assert_eq!(config.particles.radius, 0.5);
        assert_eq!(config.particles.mass, 1.);
        assert_eq!(config.particles.seed, Some(9));
        assert!(config.particles.reject_overlaps);
        assert_eq!(config.display.box_length, Some(40.));
        assert_eq!(config.display.bins, 5);
        assert_eq!(config.display.width, 60);
        assert_eq!(config.trajectory.len(), 2);
        assert_eq!(config.trajectory[1][1], Vector::new(3., 3.5));
    }

    #[test]
    fn from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("particles-run-{}.yaml", std::process::id()));
        std::fs::write(&path, "particles:\n  count: 2\n  box_length: 5.0\n  seed: 1\n").unwrap();
        let config = RunConfig::from_path(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.particles.count, 2);
        assert_eq!(config.particles.seed, Some(1));

        let missing = std::env::temp_dir().join("particles-no-such-run.yaml");
        let err = RunConfig::from_path(&missing).unwrap_err();
        assert!(format!("{}", err).contains("cannot open"));
    }

    #[test]
    fn missing_particles_section_is_an_error() {
        assert!(RunConfig::from_reader("display:\n  bins: 3\n".as_bytes()).is_err());
    }
}
