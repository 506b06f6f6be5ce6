use crate::error::{OptimError, Result};
use crate::problems::evaluation::{negate, safe, IntoEvaluation};
use crate::problems::Objective;
use crate::solvers::common::step::{
    check_gradient_dim, improvement, restore_sign, validate_tolerance,
};
use crate::solvers::common::step_policy::{
    validate_schedule, BestOfSchedule, StepContext, StepPolicy,
};
use crate::solvers::common::trace::{SolverTracer, TraceRow};
use crate::spaces::Space;

use super::types::{GradientDescent, OptimizeResult};

impl<S: Space> GradientDescent<S> {
    fn make_tracer(&self) -> SolverTracer {
        SolverTracer::batch(self.verbose, self.collect_trace)
    }

    fn attach_trace(
        &self,
        mut result: OptimizeResult<S::Point>,
        trace: SolverTracer,
    ) -> OptimizeResult<S::Point> {
        result.trace = trace.into_history();
        result
    }

    /// Core loop. `value_fn` must already be total (see `safe`).
    fn run_with_fn<F, G, P>(
        &self,
        mut x: S::Point,
        value_fn: F,
        mut grad_fn: G,
        policy: &mut P,
        trace: &SolverTracer,
    ) -> Result<OptimizeResult<S::Point>>
    where
        F: Fn(&S::Point) -> f64,
        G: FnMut(&S::Point, &mut S::Tangent),
        P: StepPolicy + ?Sized,
    {
        validate_schedule(&self.step_sizes)?;
        validate_tolerance(self.tolerance)?;

        let mut grad = self.space.zero_tangent_like(&x);
        let mut direction = self.space.zero_tangent_like(&x);
        let mut x_trial = self.space.zero_like(&x);
        let mut tmp = self.space.zero_tangent_like(&x);

        let mut value = value_fn(&x);

        for k in 0..self.max_iters {
            self.space.zero_tangent_into(&mut grad, &x);
            grad_fn(&x, &mut grad);
            check_gradient_dim(&self.space, &x, &grad)?;
            let grad_norm = self.space.tangent_norm(&grad);

            // direction = -grad
            self.space.scale_into(&mut direction, &grad, -1.0);

            let ctx = StepContext {
                iter: k,
                cost0: value,
                schedule: &self.step_sizes,
            };
            let mut eval_cost = |alpha: f64| {
                self.space
                    .retract_into(&mut x_trial, &x, &direction, alpha, &mut tmp);
                value_fn(&x_trial)
            };
            let choice = policy
                .select(&ctx, &mut eval_cost)
                .ok_or(OptimError::EmptySchedule)?;

            trace.emit(
                TraceRow::iter(k)
                    .f(value)
                    .grad_norm(grad_norm)
                    .step_size(choice.alpha),
            );

            // Stalled: keep the point we were comparing against.
            if improvement(value, choice.cost) < self.tolerance {
                trace.emit(TraceRow::iter(k).f(value).note("converged"));
                return Ok(OptimizeResult {
                    x,
                    f: value,
                    iters: k,
                    grad_norm,
                    converged: true,
                    trace: None,
                });
            }

            self.space
                .retract_step_into(&mut x, &direction, choice.alpha, &mut x_trial, &mut tmp);
            value = choice.cost;
        }

        trace.emit(TraceRow::iter(self.max_iters).f(value).note("max_iters"));
        let grad_norm = self.space.tangent_norm(&grad);
        Ok(OptimizeResult {
            x,
            f: value,
            iters: self.max_iters,
            grad_norm,
            converged: false,
            trace: None,
        })
    }

    pub fn minimize<O>(&self, obj: &O, x: S::Point) -> Result<OptimizeResult<S::Point>>
    where
        O: Objective<S>,
    {
        self.minimize_with_fn(x, |p| obj.value(p), |p, g| obj.gradient(p, g))
    }

    /// Minimize using user-provided value and gradient functions.
    ///
    /// `value_fn` may report failure (NaN, `None`, `Err`); such points score
    /// `+inf`.
    pub fn minimize_with_fn<F, R, G>(
        &self,
        x: S::Point,
        value_fn: F,
        grad_fn: G,
    ) -> Result<OptimizeResult<S::Point>>
    where
        F: Fn(&S::Point) -> R,
        R: IntoEvaluation,
        G: Fn(&S::Point, &mut S::Tangent),
    {
        self.minimize_with_fn_and_step_policy(x, value_fn, grad_fn, &mut BestOfSchedule)
    }

    /// Minimize using an explicit step policy.
    pub fn minimize_with_step_policy<O, P>(
        &self,
        obj: &O,
        x: S::Point,
        policy: &mut P,
    ) -> Result<OptimizeResult<S::Point>>
    where
        O: Objective<S>,
        P: StepPolicy + ?Sized,
    {
        self.minimize_with_fn_and_step_policy(
            x,
            |p| obj.value(p),
            |p, g| obj.gradient(p, g),
            policy,
        )
    }

    /// Minimize callbacks using an explicit step policy.
    pub fn minimize_with_fn_and_step_policy<F, R, G, P>(
        &self,
        x: S::Point,
        value_fn: F,
        grad_fn: G,
        policy: &mut P,
    ) -> Result<OptimizeResult<S::Point>>
    where
        F: Fn(&S::Point) -> R,
        R: IntoEvaluation,
        G: Fn(&S::Point, &mut S::Tangent),
        P: StepPolicy + ?Sized,
    {
        let trace = self.make_tracer();
        let result = self.run_with_fn(x, safe(value_fn), grad_fn, policy, &trace)?;
        Ok(self.attach_trace(result, trace))
    }

    pub fn maximize<O>(&self, obj: &O, x: S::Point) -> Result<OptimizeResult<S::Point>>
    where
        O: Objective<S>,
    {
        self.maximize_with_fn(x, |p| obj.value(p), |p, g| obj.gradient(p, g))
    }

    /// Maximize by minimizing the negated objective and gradient.
    ///
    /// The reported `f` is in terms of the original objective, except that an
    /// unevaluable end point still reports `+inf`.
    pub fn maximize_with_fn<F, R, G>(
        &self,
        x: S::Point,
        value_fn: F,
        grad_fn: G,
    ) -> Result<OptimizeResult<S::Point>>
    where
        F: Fn(&S::Point) -> R,
        R: IntoEvaluation,
        G: Fn(&S::Point, &mut S::Tangent),
    {
        let neg_grad = |p: &S::Point, g: &mut S::Tangent| {
            grad_fn(p, g);
            self.space.negate_in_place(g);
        };
        let mut result = self.minimize_with_fn(x, negate(value_fn), neg_grad)?;
        result.f = restore_sign(result.f);
        Ok(result)
    }
}

/// Minimize `value_fn` from `theta_0` with the default schedule.
///
/// Returns the point reached when successive objective values differ by
/// less than `tolerance`.
pub fn minimize_batch<F, R, G>(
    value_fn: F,
    grad_fn: G,
    theta_0: Vec<f64>,
    tolerance: f64,
) -> Result<Vec<f64>>
where
    F: Fn(&Vec<f64>) -> R,
    R: IntoEvaluation,
    G: Fn(&Vec<f64>, &mut Vec<f64>),
{
    let solver = GradientDescent {
        tolerance,
        ..GradientDescent::new()
    };
    Ok(solver.minimize_with_fn(theta_0, value_fn, grad_fn)?.x)
}

/// Maximize `value_fn` from `theta_0` with the default schedule.
pub fn maximize_batch<F, R, G>(
    value_fn: F,
    grad_fn: G,
    theta_0: Vec<f64>,
    tolerance: f64,
) -> Result<Vec<f64>>
where
    F: Fn(&Vec<f64>) -> R,
    R: IntoEvaluation,
    G: Fn(&Vec<f64>, &mut Vec<f64>),
{
    let solver = GradientDescent {
        tolerance,
        ..GradientDescent::new()
    };
    Ok(solver.maximize_with_fn(theta_0, value_fn, grad_fn)?.x)
}
