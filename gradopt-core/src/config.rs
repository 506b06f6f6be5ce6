//! Solver configuration loaded from JSON.
//!
//! Every field is optional; missing ones take the solver defaults.
//!
//! ```json
//! {
//!   "batch": { "tolerance": 1e-8, "step_sizes": [1.0, 0.1, 0.01] },
//!   "stochastic": { "alpha_0": 0.05, "patience": 50, "seed": 42 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::solvers::common::step::{validate_learning_rate, validate_tolerance};
use crate::solvers::common::step_policy::{validate_schedule, DEFAULT_STEP_SIZES};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    pub batch: BatchConfig,
    pub stochastic: StochasticConfig,
}

/// Settings for [`crate::solvers::batch::GradientDescent`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub step_sizes: Vec<f64>,
    pub tolerance: f64,
    pub max_iters: usize,
    pub verbose: bool,
    pub collect_trace: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            step_sizes: DEFAULT_STEP_SIZES.to_vec(),
            tolerance: 1e-6,
            max_iters: 100_000,
            verbose: false,
            collect_trace: false,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        validate_schedule(&self.step_sizes)?;
        validate_tolerance(self.tolerance)
    }
}

/// Settings for [`crate::solvers::stochastic::StochasticGradientDescent`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StochasticConfig {
    pub alpha_0: f64,
    pub decay: f64,
    pub patience: usize,
    pub max_epochs: usize,
    pub seed: Option<u64>,
    pub verbose: bool,
    pub collect_trace: bool,
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self {
            alpha_0: 0.01,
            decay: 0.9,
            patience: 100,
            max_epochs: 100_000,
            seed: None,
            verbose: false,
            collect_trace: false,
        }
    }
}

impl StochasticConfig {
    pub fn validate(&self) -> Result<()> {
        validate_learning_rate(self.alpha_0, self.decay, self.patience)
    }
}

impl OptimizerConfig {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: OptimizerConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.batch.validate()?;
        self.stochastic.validate()
    }
}

/// Read and validate a JSON configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<OptimizerConfig> {
    let contents = fs::read_to_string(path)?;
    OptimizerConfig::from_json_str(&contents)
}
