//! Configuration management for Monte Carlo runs
//!
//! This module handles the YAML configuration structures, their defaults
//! and validation, and the command-line overrides.

mod args;

pub use args::Args;

use color_eyre::eyre::{ensure, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration structure for a Monte Carlo run
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Random seed (system entropy when absent)
    pub seed: Option<u64>,
    /// Ising temperature scan
    pub ising: Option<IsingConfig>,
    /// Random-walk experiments, run in order
    #[serde(default)]
    pub walks: Vec<WalkConfig>,
}

/// Ising temperature scan parameters
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IsingConfig {
    /// Lattice side length L
    #[serde(default = "default_size")]
    pub size: usize,
    /// Sweeps discarded before measuring
    #[serde(default = "default_warmup_sweeps")]
    pub warmup_sweeps: usize,
    /// Sweeps accumulated into the observables
    #[serde(default = "default_measurement_sweeps")]
    pub measurement_sweeps: usize,
    /// Temperatures to scan (units of J/k_B)
    #[serde(default = "default_temperatures")]
    pub temperatures: Vec<f64>,
}

impl Default for IsingConfig {
    fn default() -> Self {
        IsingConfig {
            size: default_size(),
            warmup_sweeps: default_warmup_sweeps(),
            measurement_sweeps: default_measurement_sweeps(),
            temperatures: default_temperatures(),
        }
    }
}

/// One random-walk experiment
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WalkConfig {
    /// Label used in the report
    pub name: String,
    /// Steps per trial
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Number of independent trials
    #[serde(default = "default_trials")]
    pub trials: usize,
    pub model: WalkModelConfig,
}

/// Walk variant and its parameters
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum WalkModelConfig {
    /// Right with probability p, left otherwise
    #[serde(rename = "simple_1d")]
    Simple1D {
        #[serde(default = "default_p")]
        p: f64,
    },
    /// Keep the previous direction with probability p
    #[serde(rename = "persistent_1d")]
    Persistent1D {
        #[serde(default = "default_p")]
        p: f64,
    },
    /// Confined to [-half_width, half_width] with reflecting ends
    #[serde(rename = "reflecting_1d")]
    Reflecting1D {
        #[serde(default = "default_p")]
        p: f64,
        half_width: i64,
    },
    /// Sites 0..=length, absorbed at both ends
    #[serde(rename = "absorbing_1d")]
    Absorbing1D {
        #[serde(default = "default_p")]
        p: f64,
        length: i64,
    },
    /// Periodic ring with randomly placed traps
    #[serde(rename = "random_traps_1d")]
    RandomTraps1D {
        #[serde(default = "default_p")]
        p: f64,
        trap_density: f64,
        length: usize,
    },
    /// Steps biased away from frequently visited sites
    #[serde(rename = "true_self_avoiding_1d")]
    TrueSelfAvoiding1D {
        #[serde(default = "default_g")]
        g: f64,
    },
    /// Uniform among the four square-lattice neighbours
    #[serde(rename = "simple_2d")]
    Simple2D,
    /// Uniform among unvisited neighbours
    #[serde(rename = "self_avoiding_2d")]
    SelfAvoiding2D,
}

// Default value functions
fn default_size() -> usize {
    16
}
fn default_warmup_sweeps() -> usize {
    500
}
fn default_measurement_sweeps() -> usize {
    2000
}
fn default_temperatures() -> Vec<f64> {
    vec![1.5, 2.0, 2.269, 2.5, 3.0]
}
fn default_steps() -> usize {
    100
}
fn default_trials() -> usize {
    1000
}
fn default_p() -> f64 {
    0.5
}
fn default_g() -> f64 {
    1.0
}

impl Config {
    /// Load and validate configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML file without validating it
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Unable to read configuration file: {}", path.display()))?;
        serde_yml::from_str::<Config>(&content).wrap_err("Failed to parse configuration file")
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yml::to_string(self)?;
        fs::write(path.as_ref(), content).wrap_err_with(|| {
            format!("Unable to write configuration file: {}", path.as_ref().display())
        })?;
        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, args: &Args) -> Self {
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if let Some(ising) = self.ising.as_mut() {
            if let Some(size) = args.size {
                ising.size = size;
            }
            if let Some(n) = args.warmup_sweeps {
                ising.warmup_sweeps = n;
            }
            if let Some(n) = args.measurement_sweeps {
                ising.measurement_sweeps = n;
            }
        }
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if let Some(ising) = &self.ising {
            // A 1x1 lattice makes a spin its own neighbour
            ensure!(ising.size >= 2, "Ising lattice size must be at least 2");
            ensure!(
                !ising.temperatures.is_empty(),
                "At least one temperature is required"
            );
            for &t in &ising.temperatures {
                ensure!(
                    t.is_finite() && t > 0.0,
                    "Temperature must be positive, got {}",
                    t
                );
            }
        }

        for walk in &self.walks {
            walk.validate()
                .wrap_err_with(|| format!("Invalid walk '{}'", walk.name))?;
        }

        Ok(())
    }
}

impl WalkConfig {
    fn validate(&self) -> Result<()> {
        ensure!(self.steps > 0, "Number of steps must be positive");
        ensure!(self.trials > 0, "Number of trials must be positive");

        match &self.model {
            WalkModelConfig::Simple1D { p } | WalkModelConfig::Persistent1D { p } => {
                check_probability("p", *p)?;
            }
            WalkModelConfig::Reflecting1D { p, half_width } => {
                check_probability("p", *p)?;
                ensure!(*half_width > 0, "Half width must be positive");
            }
            WalkModelConfig::Absorbing1D { p, length } => {
                check_probability("p", *p)?;
                ensure!(*length > 0, "Length must be positive");
            }
            WalkModelConfig::RandomTraps1D {
                p,
                trap_density,
                length,
            } => {
                check_probability("p", *p)?;
                check_probability("trap_density", *trap_density)?;
                ensure!(*length > 0, "Length must be positive");
            }
            WalkModelConfig::TrueSelfAvoiding1D { g } => {
                ensure!(
                    g.is_finite() && *g >= 0.0,
                    "Repulsion strength g must be finite and non-negative, got {}",
                    g
                );
            }
            WalkModelConfig::Simple2D | WalkModelConfig::SelfAvoiding2D => {}
        }

        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&value),
        "{} must lie in [0, 1], got {}",
        name,
        value
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
seed: 42
ising:
  size: 8
  temperatures: [1.0, 2.0]
walks:
  - name: symmetric
    steps: 50
    trials: 200
    model: { type: simple_1d, p: 0.5 }
  - name: restricted
    model:
      type: absorbing_1d
      length: 10
  - name: saw
    model: { type: self_avoiding_2d }
"#;

    #[test]
    fn test_parse_with_defaults() {
        let config: Config = serde_yml::from_str(SAMPLE).unwrap();
        config.validate().unwrap();

        assert_eq!(config.seed, Some(42));
        let ising = config.ising.as_ref().unwrap();
        assert_eq!(ising.size, 8);
        assert_eq!(ising.warmup_sweeps, 500);
        assert_eq!(ising.measurement_sweeps, 2000);
        assert_eq!(ising.temperatures, vec![1.0, 2.0]);

        assert_eq!(config.walks.len(), 3);
        assert_eq!(config.walks[0].model, WalkModelConfig::Simple1D { p: 0.5 });
        assert_eq!(config.walks[1].steps, 100);
        assert_eq!(config.walks[1].trials, 1000);
        assert_eq!(
            config.walks[1].model,
            WalkModelConfig::Absorbing1D { p: 0.5, length: 10 }
        );
        assert_eq!(config.walks[2].model, WalkModelConfig::SelfAvoiding2D);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = serde_yml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_file_round_trip() {
        let config: Config = serde_yml::from_str(SAMPLE).unwrap();
        let file = NamedTempFile::new().unwrap();
        config.to_file(file.path()).unwrap();
        let loaded = Config::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ising:\n  size: 1").unwrap();
        assert!(Config::from_file(file.path()).is_err());

        assert!(Config::from_file("/nonexistent/monte_carlo.yaml").is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = Config {
            ising: Some(IsingConfig::default()),
            ..Config::default()
        };
        config.validate().unwrap();

        config.ising.as_mut().unwrap().temperatures = vec![2.0, 0.0];
        assert!(config.validate().is_err());
        config.ising.as_mut().unwrap().temperatures = vec![];
        assert!(config.validate().is_err());
        config.ising = None;

        let walk = |model| WalkConfig {
            name: "w".to_string(),
            steps: 10,
            trials: 10,
            model,
        };
        config.walks = vec![walk(WalkModelConfig::Simple1D { p: 1.5 })];
        assert!(config.validate().is_err());
        config.walks = vec![walk(WalkModelConfig::RandomTraps1D {
            p: 0.5,
            trap_density: -0.1,
            length: 10,
        })];
        assert!(config.validate().is_err());
        config.walks = vec![walk(WalkModelConfig::Absorbing1D { p: 0.5, length: 0 })];
        assert!(config.validate().is_err());
        config.walks = vec![walk(WalkModelConfig::Reflecting1D {
            p: 0.5,
            half_width: 3,
        })];
        config.validate().unwrap();

        config.walks[0].trials = 0;
        assert!(config.validate().is_err());

        config.walks = vec![walk(WalkModelConfig::TrueSelfAvoiding1D { g: 800.0 })];
        config.validate().unwrap();
        config.walks = vec![walk(WalkModelConfig::TrueSelfAvoiding1D { g: -800.0 })];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_file_skips_validation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ising:\n  size: 1").unwrap();
        let config = Config::parse_file(file.path()).unwrap();
        assert_eq!(config.ising.unwrap().size, 1);
    }

    #[test]
    fn test_overrides() {
        let config: Config = serde_yml::from_str(SAMPLE).unwrap();
        let args = Args {
            seed: Some(7),
            size: Some(4),
            measurement_sweeps: Some(3),
            ..Args::default()
        };
        let config = config.with_overrides(&args);
        assert_eq!(config.seed, Some(7));
        let ising = config.ising.unwrap();
        assert_eq!(ising.size, 4);
        assert_eq!(ising.warmup_sweeps, 500);
        assert_eq!(ising.measurement_sweeps, 3);
    }
}
