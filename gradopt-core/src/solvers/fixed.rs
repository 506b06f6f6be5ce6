//! Plain gradient descent with a constant step size.
//!
//! Stops when successive iterates are closer than `tolerance`, which needs
//! no objective evaluations inside the loop.

use crate::error::{OptimError, Result};
use crate::problems::evaluation::{safe, IntoEvaluation};
use crate::problems::Objective;
use crate::solvers::batch::OptimizeResult;
use crate::solvers::common::step::{check_gradient_dim, validate_tolerance};
use crate::solvers::common::trace::{SolverTracer, TraceRow};
use crate::spaces::{EuclideanSpace, Space};

#[derive(Clone, Debug)]
pub struct FixedStepDescent<S: Space = EuclideanSpace> {
    pub space: S,
    /// Learning rate / step size.
    pub step_size: f64,
    /// Considered converged when a step moves the point less than this.
    pub tolerance: f64,
    pub max_iters: usize,
    pub verbose: bool,
    pub collect_trace: bool,
}

impl<S: Space> FixedStepDescent<S> {
    pub fn with_space(space: S) -> Self {
        Self {
            space,
            step_size: 0.01,
            tolerance: 1e-7,
            max_iters: 100_000,
            verbose: false,
            collect_trace: false,
        }
    }

    pub fn minimize<O>(&self, obj: &O, x: S::Point) -> Result<OptimizeResult<S::Point>>
    where
        O: Objective<S>,
    {
        self.minimize_with_fn(x, |p| obj.value(p), |p, g| obj.gradient(p, g))
    }

    pub fn minimize_with_fn<F, R, G>(
        &self,
        mut x: S::Point,
        value_fn: F,
        grad_fn: G,
    ) -> Result<OptimizeResult<S::Point>>
    where
        F: Fn(&S::Point) -> R,
        R: IntoEvaluation,
        G: Fn(&S::Point, &mut S::Tangent),
    {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(OptimError::InvalidStepSize(self.step_size));
        }
        validate_tolerance(self.tolerance)?;

        let value_fn = safe(value_fn);
        let trace = SolverTracer::fixed(self.verbose, self.collect_trace);

        let mut grad = self.space.zero_tangent_like(&x);
        let mut direction = self.space.zero_tangent_like(&x);
        let mut x_next = self.space.zero_like(&x);
        let mut tmp = self.space.zero_tangent_like(&x);

        for k in 0..self.max_iters {
            self.space.zero_tangent_into(&mut grad, &x);
            grad_fn(&x, &mut grad);
            check_gradient_dim(&self.space, &x, &grad)?;
            let grad_norm = self.space.tangent_norm(&grad);

            // direction = -grad
            self.space.scale_into(&mut direction, &grad, -1.0);
            self.space
                .retract_into(&mut x_next, &x, &direction, self.step_size, &mut tmp);

            let moved = self.space.distance(&x_next, &x);
            if trace.is_active() {
                trace.emit(
                    TraceRow::iter(k)
                        .f(value_fn(&x))
                        .grad_norm(grad_norm)
                        .step_size(self.step_size),
                );
            }
            if moved < self.tolerance {
                let f = value_fn(&x);
                trace.emit(TraceRow::iter(k).f(f).note("converged"));
                return Ok(OptimizeResult {
                    x,
                    f,
                    iters: k,
                    grad_norm,
                    converged: true,
                    trace: trace.into_history(),
                });
            }

            std::mem::swap(&mut x, &mut x_next);
        }

        let f = value_fn(&x);
        let grad_norm = self.space.tangent_norm(&grad);
        Ok(OptimizeResult {
            x,
            f,
            iters: self.max_iters,
            grad_norm,
            converged: false,
            trace: trace.into_history(),
        })
    }
}

impl FixedStepDescent<EuclideanSpace> {
    pub fn new() -> Self {
        Self::with_space(EuclideanSpace)
    }
}

impl Default for FixedStepDescent<EuclideanSpace> {
    fn default() -> Self {
        Self::new()
    }
}
