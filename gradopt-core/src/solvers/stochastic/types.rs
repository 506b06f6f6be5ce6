use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::StochasticConfig;
use crate::error::Result;
use crate::solvers::SolverTraceRecord;
use crate::spaces::{EuclideanSpace, Space};

/// Configuration for stochastic gradient descent over a data set.
///
/// Each outer iteration scores the full data set, then takes one gradient
/// step per sample in a freshly shuffled order.
#[derive(Clone, Debug)]
pub struct StochasticGradientDescent<S: Space = EuclideanSpace> {
    pub space: S,
    /// Initial learning rate, restored whenever the best value improves.
    pub alpha_0: f64,
    /// Learning-rate multiplier applied after a non-improving iteration.
    pub decay: f64,
    /// Stop after this many consecutive non-improving iterations.
    pub patience: usize,
    /// Safety ceiling on the number of outer iterations.
    pub max_epochs: usize,
    /// Seed for the sample order. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub verbose: bool,
    pub collect_trace: bool,
}

impl<S: Space> StochasticGradientDescent<S> {
    pub fn with_space(space: S) -> Self {
        Self {
            space,
            alpha_0: 0.01,
            decay: 0.9,
            patience: 100,
            max_epochs: 100_000,
            seed: None,
            verbose: false,
            collect_trace: false,
        }
    }

    pub(crate) fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl StochasticGradientDescent<EuclideanSpace> {
    pub fn new() -> Self {
        Self::with_space(EuclideanSpace)
    }

    pub fn from_config(config: &StochasticConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            space: EuclideanSpace,
            alpha_0: config.alpha_0,
            decay: config.decay,
            patience: config.patience,
            max_epochs: config.max_epochs,
            seed: config.seed,
            verbose: config.verbose,
            collect_trace: config.collect_trace,
        })
    }
}

impl Default for StochasticGradientDescent<EuclideanSpace> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a stochastic run.
///
/// `x` is the best parameter vector seen, which is generally not the last
/// one visited. `f` is its cumulative objective over all samples.
#[derive(Clone, Debug)]
pub struct StochasticResult<P> {
    pub x: P,
    pub f: f64,
    /// Outer iterations performed (each scores the whole data set once).
    pub iters: usize,
    /// Learning rate when the run stopped.
    pub alpha: f64,
    /// True when the run ended on stagnation rather than `max_epochs`.
    pub converged: bool,
    pub trace: Option<Vec<SolverTraceRecord>>,
}
