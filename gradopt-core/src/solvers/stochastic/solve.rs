use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{OptimError, Result};
use crate::problems::evaluation::{negate_sample, safe_sample, IntoEvaluation};
use crate::problems::SampleObjective;
use crate::solvers::common::step::{check_gradient_dim, restore_sign, validate_learning_rate};
use crate::solvers::common::trace::{SolverTracer, TraceRow};
use crate::spaces::Space;

use super::types::{StochasticGradientDescent, StochasticResult};

/// Indices `0..n` in a random order.
pub fn shuffled_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

impl<S: Space> StochasticGradientDescent<S> {
    fn make_tracer(&self) -> SolverTracer {
        SolverTracer::sgd(self.verbose, self.collect_trace)
    }

    /// Core loop. `value_fn` must already be total (see `safe_sample`).
    #[allow(clippy::too_many_arguments)]
    fn run_with_fn<X, Y, F, G, R>(
        &self,
        xs: &[X],
        ys: &[Y],
        mut theta: S::Point,
        value_fn: F,
        mut grad_fn: G,
        rng: &mut R,
        trace: &SolverTracer,
    ) -> Result<StochasticResult<S::Point>>
    where
        F: Fn(&X, &Y, &S::Point) -> f64,
        G: FnMut(&X, &Y, &S::Point, &mut S::Tangent),
        R: Rng + ?Sized,
    {
        validate_learning_rate(self.alpha_0, self.decay, self.patience)?;
        if xs.len() != ys.len() {
            return Err(OptimError::SampleCountMismatch {
                inputs: xs.len(),
                targets: ys.len(),
            });
        }

        let mut grad = self.space.zero_tangent_like(&theta);
        let mut theta_next = self.space.zero_like(&theta);
        let mut tmp = self.space.zero_tangent_like(&theta);

        let mut alpha = self.alpha_0;
        let mut best_theta = theta.clone();
        let mut best_value = f64::INFINITY;
        let mut stagnant = 0usize;
        let mut epoch = 0usize;

        let converged = loop {
            if epoch == self.max_epochs {
                trace.emit(TraceRow::iter(epoch).best(best_value).note("max_epochs"));
                break false;
            }

            let value: f64 = xs
                .iter()
                .zip(ys)
                .map(|(x_i, y_i)| value_fn(x_i, y_i, &theta))
                .sum();

            if value < best_value {
                // new best: remember it and go back to the initial rate
                best_theta = theta.clone();
                best_value = value;
                stagnant = 0;
                alpha = self.alpha_0;
            } else {
                stagnant += 1;
                alpha *= self.decay;
            }
            epoch += 1;

            trace.emit(
                TraceRow::iter(epoch - 1)
                    .f(value)
                    .best(best_value)
                    .alpha(alpha)
                    .stagnant(stagnant),
            );

            if stagnant >= self.patience {
                trace.emit(TraceRow::iter(epoch - 1).best(best_value).note("stagnated"));
                break true;
            }

            for i in shuffled_indices(xs.len(), rng) {
                self.space.zero_tangent_into(&mut grad, &theta);
                grad_fn(&xs[i], &ys[i], &theta, &mut grad);
                check_gradient_dim(&self.space, &theta, &grad)?;
                // theta <- theta - alpha * grad_i
                self.space
                    .retract_step_into(&mut theta, &grad, -alpha, &mut theta_next, &mut tmp);
            }
        };

        Ok(StochasticResult {
            x: best_theta,
            f: best_value,
            iters: epoch,
            alpha,
            converged,
            trace: None,
        })
    }

    pub fn minimize<O, X, Y>(
        &self,
        obj: &O,
        xs: &[X],
        ys: &[Y],
        theta: S::Point,
    ) -> Result<StochasticResult<S::Point>>
    where
        O: SampleObjective<S, X, Y>,
    {
        self.minimize_with_rng(obj, xs, ys, theta, &mut self.make_rng())
    }

    pub fn minimize_with_rng<O, X, Y, R>(
        &self,
        obj: &O,
        xs: &[X],
        ys: &[Y],
        theta: S::Point,
        rng: &mut R,
    ) -> Result<StochasticResult<S::Point>>
    where
        O: SampleObjective<S, X, Y>,
        R: Rng + ?Sized,
    {
        self.minimize_with_fn_and_rng(
            xs,
            ys,
            theta,
            |x, y, p| obj.value(x, y, p),
            |x, y, p, g| obj.gradient(x, y, p, g),
            rng,
        )
    }

    /// Minimize the sum of `value_fn` over the paired samples `(xs[i], ys[i])`.
    pub fn minimize_with_fn<X, Y, F, V, G>(
        &self,
        xs: &[X],
        ys: &[Y],
        theta: S::Point,
        value_fn: F,
        grad_fn: G,
    ) -> Result<StochasticResult<S::Point>>
    where
        F: Fn(&X, &Y, &S::Point) -> V,
        V: IntoEvaluation,
        G: Fn(&X, &Y, &S::Point, &mut S::Tangent),
    {
        self.minimize_with_fn_and_rng(xs, ys, theta, value_fn, grad_fn, &mut self.make_rng())
    }

    /// Same as `minimize_with_fn`, drawing the sample order from `rng`.
    pub fn minimize_with_fn_and_rng<X, Y, F, V, G, R>(
        &self,
        xs: &[X],
        ys: &[Y],
        theta: S::Point,
        value_fn: F,
        grad_fn: G,
        rng: &mut R,
    ) -> Result<StochasticResult<S::Point>>
    where
        F: Fn(&X, &Y, &S::Point) -> V,
        V: IntoEvaluation,
        G: Fn(&X, &Y, &S::Point, &mut S::Tangent),
        R: Rng + ?Sized,
    {
        let trace = self.make_tracer();
        let mut result =
            self.run_with_fn(xs, ys, theta, safe_sample(value_fn), grad_fn, rng, &trace)?;
        result.trace = trace.into_history();
        Ok(result)
    }

    pub fn maximize<O, X, Y>(
        &self,
        obj: &O,
        xs: &[X],
        ys: &[Y],
        theta: S::Point,
    ) -> Result<StochasticResult<S::Point>>
    where
        O: SampleObjective<S, X, Y>,
    {
        self.maximize_with_fn(
            xs,
            ys,
            theta,
            |x, y, p| obj.value(x, y, p),
            |x, y, p, g| obj.gradient(x, y, p, g),
        )
    }

    pub fn maximize_with_fn<X, Y, F, V, G>(
        &self,
        xs: &[X],
        ys: &[Y],
        theta: S::Point,
        value_fn: F,
        grad_fn: G,
    ) -> Result<StochasticResult<S::Point>>
    where
        F: Fn(&X, &Y, &S::Point) -> V,
        V: IntoEvaluation,
        G: Fn(&X, &Y, &S::Point, &mut S::Tangent),
    {
        self.maximize_with_fn_and_rng(xs, ys, theta, value_fn, grad_fn, &mut self.make_rng())
    }

    /// Maximize by minimizing the negated per-sample objective and gradient.
    ///
    /// The reported `f` is in terms of the original objective, except that an
    /// unevaluable best still reports `+inf`.
    pub fn maximize_with_fn_and_rng<X, Y, F, V, G, R>(
        &self,
        xs: &[X],
        ys: &[Y],
        theta: S::Point,
        value_fn: F,
        grad_fn: G,
        rng: &mut R,
    ) -> Result<StochasticResult<S::Point>>
    where
        F: Fn(&X, &Y, &S::Point) -> V,
        V: IntoEvaluation,
        G: Fn(&X, &Y, &S::Point, &mut S::Tangent),
        R: Rng + ?Sized,
    {
        let neg_grad = |x: &X, y: &Y, p: &S::Point, g: &mut S::Tangent| {
            grad_fn(x, y, p, g);
            self.space.negate_in_place(g);
        };
        let mut result = self.minimize_with_fn_and_rng(
            xs,
            ys,
            theta,
            negate_sample(value_fn),
            neg_grad,
            rng,
        )?;
        result.f = restore_sign(result.f);
        Ok(result)
    }
}

/// Minimize the sum of `value_fn(x_i, y_i, theta)` with default settings and
/// initial learning rate `alpha_0`.
pub fn minimize_stochastic<X, Y, F, V, G>(
    value_fn: F,
    grad_fn: G,
    x: &[X],
    y: &[Y],
    theta_0: Vec<f64>,
    alpha_0: f64,
) -> Result<Vec<f64>>
where
    F: Fn(&X, &Y, &Vec<f64>) -> V,
    V: IntoEvaluation,
    G: Fn(&X, &Y, &Vec<f64>, &mut Vec<f64>),
{
    let solver = StochasticGradientDescent {
        alpha_0,
        ..StochasticGradientDescent::new()
    };
    Ok(solver.minimize_with_fn(x, y, theta_0, value_fn, grad_fn)?.x)
}

/// Maximize the sum of `value_fn(x_i, y_i, theta)`.
pub fn maximize_stochastic<X, Y, F, V, G>(
    value_fn: F,
    grad_fn: G,
    x: &[X],
    y: &[Y],
    theta_0: Vec<f64>,
    alpha_0: f64,
) -> Result<Vec<f64>>
where
    F: Fn(&X, &Y, &Vec<f64>) -> V,
    V: IntoEvaluation,
    G: Fn(&X, &Y, &Vec<f64>, &mut Vec<f64>),
{
    let solver = StochasticGradientDescent {
        alpha_0,
        ..StochasticGradientDescent::new()
    };
    Ok(solver.maximize_with_fn(x, y, theta_0, value_fn, grad_fn)?.x)
}
