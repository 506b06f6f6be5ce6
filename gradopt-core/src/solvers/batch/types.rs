use crate::config::BatchConfig;
use crate::error::Result;
use crate::solvers::common::step_policy::DEFAULT_STEP_SIZES;
use crate::solvers::SolverTraceRecord;
use crate::spaces::{EuclideanSpace, Space};

/// Configuration for batch gradient descent over a step-size schedule.
#[derive(Clone, Debug)]
pub struct GradientDescent<S: Space = EuclideanSpace> {
    /// Space to operate on.
    pub space: S,
    /// Step sizes tried at every iteration, in order.
    pub step_sizes: Vec<f64>,
    /// Stop once the objective changes by less than this between iterations.
    pub tolerance: f64,
    /// Safety ceiling on the number of iterations.
    pub max_iters: usize,
    /// If true, prints per-iteration diagnostics (f, |grad|, chosen step).
    pub verbose: bool,
    /// If true, stores per-iteration trace rows into the result.
    pub collect_trace: bool,
}

impl<S: Space> GradientDescent<S> {
    /// Build a solver on an explicitly provided space.
    pub fn with_space(space: S) -> Self {
        Self {
            space,
            step_sizes: DEFAULT_STEP_SIZES.to_vec(),
            tolerance: 1e-6,
            max_iters: 100_000,
            verbose: false,
            collect_trace: false,
        }
    }
}

impl GradientDescent<EuclideanSpace> {
    /// Build a solver with Euclidean space defaults.
    pub fn new() -> Self {
        Self::with_space(EuclideanSpace)
    }

    pub fn from_config(config: &BatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            space: EuclideanSpace,
            step_sizes: config.step_sizes.clone(),
            tolerance: config.tolerance,
            max_iters: config.max_iters,
            verbose: config.verbose,
            collect_trace: config.collect_trace,
        })
    }
}

impl Default for GradientDescent<EuclideanSpace> {
    fn default() -> Self {
        Self::new()
    }
}

/// Struct that holds the optimization result.
///
/// `f` is the objective at `x` (`+inf` if it could not be evaluated there).
#[derive(Clone, Debug)]
pub struct OptimizeResult<P> {
    pub x: P,
    pub f: f64,
    pub iters: usize,
    pub grad_norm: f64,
    pub converged: bool,
    pub trace: Option<Vec<SolverTraceRecord>>,
}
