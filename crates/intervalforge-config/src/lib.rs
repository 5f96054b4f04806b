//! Configuration system for IntervalForge.
//!
//! Load contractor configuration from TOML or YAML to tune shaving,
//! constructive disjunction and adaptive tuning without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use intervalforge_config::{ContractorConfig, WindowSize};
//!
//! let config = ContractorConfig::from_toml_str(r#"
//!     [shaving]
//!     max_slices = 20
//!     cid_slices = 2
//!     window = { count = 4 }
//!
//!     [adaptive]
//!     gain_threshold = 0.01
//! "#).unwrap();
//!
//! assert_eq!(config.shaving.max_slices, 20);
//! assert_eq!(config.shaving.window, WindowSize::Count(4));
//! assert_eq!(config.adaptive.tuning_period, 50);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use intervalforge_config::ContractorConfig;
//!
//! let config = ContractorConfig::load("contractor.toml").unwrap_or_default();
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main contractor configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContractorConfig {
    /// Shaving and constructive disjunction parameters.
    #[serde(default)]
    pub shaving: ShavingConfig,

    /// Adaptive (ACID) tuning parameters.
    #[serde(default)]
    pub adaptive: AdaptiveConfig,

    /// Plain 3B bound shaving parameters.
    #[serde(default)]
    pub bound_shaving: BoundShavingConfig,
}

impl ContractorConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the maximum number of shaving slices.
    pub fn with_max_slices(mut self, max_slices: usize) -> Self {
        self.shaving.max_slices = max_slices;
        self
    }

    /// Sets the number of constructive disjunction slices.
    pub fn with_cid_slices(mut self, cid_slices: usize) -> Self {
        self.shaving.cid_slices = cid_slices;
        self
    }

    /// Sets the number of variables handled per call.
    pub fn with_window(mut self, window: WindowSize) -> Self {
        self.shaving.window = window;
        self
    }

    /// Sets the minimum width of a shaved variable.
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.shaving.min_width = min_width;
        self
    }

    /// Sets the slice count above which shaving is dichotomic.
    pub fn with_dichotomy_threshold(mut self, threshold: usize) -> Self {
        self.shaving.dichotomy_threshold = threshold;
        self
    }

    /// Sets the adaptive tuning parameters.
    pub fn with_adaptive(mut self, adaptive: AdaptiveConfig) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shaving.validate()?;
        self.adaptive.validate()?;
        self.bound_shaving.validate()
    }
}

/// Number of variables handled in one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSize {
    /// Every handled variable.
    #[default]
    All,

    /// A fixed number of variables, wrapping around the handled set.
    Count(usize),
}

impl WindowSize {
    /// Resolves the window against `handled` variables.
    pub fn resolve(&self, handled: usize) -> usize {
        match *self {
            WindowSize::All => handled,
            WindowSize::Count(n) => n,
        }
    }
}

/// Shaving (3B) and constructive disjunction (CID) parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ShavingConfig {
    /// Ceiling on the number of slices a variable is split into.
    pub max_slices: usize,

    /// Number of slices of the constructive disjunction; 0 disables it.
    pub cid_slices: usize,

    /// Variables handled per call: `"all"` or `{ count = n }`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub window: WindowSize,

    /// Variables narrower than this are not shaved.
    pub min_width: f64,

    /// Slice count above which dichotomic shaving replaces linear shaving.
    pub dichotomy_threshold: usize,
}

impl ShavingConfig {
    pub const DEFAULT_MAX_SLICES: usize = 10;
    pub const DEFAULT_CID_SLICES: usize = 1;
    pub const DEFAULT_MIN_WIDTH: f64 = 1e-11;
    pub const DEFAULT_DICHOTOMY_THRESHOLD: usize = 16;

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_slices < 1 {
            return Err(invalid("shaving.max_slices must be at least 1"));
        }
        if self.dichotomy_threshold < 1 {
            return Err(invalid("shaving.dichotomy_threshold must be at least 1"));
        }
        if self.window == WindowSize::Count(0) {
            return Err(invalid("shaving.window must handle at least 1 variable"));
        }
        if !self.min_width.is_finite() || self.min_width < 0.0 {
            return Err(invalid(format!(
                "shaving.min_width must be finite and non-negative, got {}",
                self.min_width
            )));
        }
        Ok(())
    }
}

impl Default for ShavingConfig {
    fn default() -> Self {
        Self {
            max_slices: Self::DEFAULT_MAX_SLICES,
            cid_slices: Self::DEFAULT_CID_SLICES,
            window: WindowSize::All,
            min_width: Self::DEFAULT_MIN_WIDTH,
            dichotomy_threshold: Self::DEFAULT_DICHOTOMY_THRESHOLD,
        }
    }
}

/// Adaptive CID (ACID) tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AdaptiveConfig {
    /// Minimum average relative gain for a variable to count as useful.
    pub gain_threshold: f64,

    /// Number of calls in a tuning phase.
    pub tuning_period: u64,

    /// A tuning phase starts every `tuning_period * phase_factor` calls.
    pub phase_factor: u64,

    /// Shave the last variable (the objective of an optimization
    /// system) first.
    pub objective_first: bool,
}

impl AdaptiveConfig {
    pub const DEFAULT_GAIN_THRESHOLD: f64 = 0.005;
    pub const DEFAULT_TUNING_PERIOD: u64 = 50;
    pub const DEFAULT_PHASE_FACTOR: u64 = 20;

    /// Length of a full tuning + running cycle, in calls.
    pub fn cycle_length(&self) -> u64 {
        self.tuning_period.saturating_mul(self.phase_factor)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.gain_threshold) {
            return Err(invalid(format!(
                "adaptive.gain_threshold must lie in [0, 1), got {}",
                self.gain_threshold
            )));
        }
        if self.tuning_period < 1 {
            return Err(invalid("adaptive.tuning_period must be at least 1"));
        }
        if self.phase_factor < 1 {
            return Err(invalid("adaptive.phase_factor must be at least 1"));
        }
        Ok(())
    }
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            gain_threshold: Self::DEFAULT_GAIN_THRESHOLD,
            tuning_period: Self::DEFAULT_TUNING_PERIOD,
            phase_factor: Self::DEFAULT_PHASE_FACTOR,
            objective_first: false,
        }
    }
}

/// Plain 3B bound shaving parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BoundShavingConfig {
    /// Width of a shaved slice, as a fraction of the variable diameter.
    pub var_ratio: f64,

    /// The sweep over variables repeats while some variable shrinks by at
    /// least this relative amount. Infinity means a single sweep.
    pub fixpoint_ratio: f64,
}

impl BoundShavingConfig {
    pub const DEFAULT_VAR_RATIO: f64 = 0.1;

    fn validate(&self) -> Result<(), ConfigError> {
        if self.var_ratio.is_nan() || self.var_ratio <= 0.0 || self.var_ratio > 1.0 {
            return Err(invalid(format!(
                "bound_shaving.var_ratio must lie in (0, 1], got {}",
                self.var_ratio
            )));
        }
        if self.fixpoint_ratio.is_nan() || self.fixpoint_ratio <= 0.0 {
            return Err(invalid(format!(
                "bound_shaving.fixpoint_ratio must be positive, got {}",
                self.fixpoint_ratio
            )));
        }
        Ok(())
    }
}

impl Default for BoundShavingConfig {
    fn default() -> Self {
        Self {
            var_ratio: Self::DEFAULT_VAR_RATIO,
            fixpoint_ratio: f64::INFINITY,
        }
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
