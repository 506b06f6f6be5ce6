use crate::error::{OptimError, Result};

/// Step sizes tried at every batch iteration, largest first.
pub const DEFAULT_STEP_SIZES: [f64; 8] = [100.0, 10.0, 1.0, 0.1, 0.01, 0.001, 0.0001, 0.00001];

/// Outcome of a step selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepChoice {
    pub alpha: f64,
    pub cost: f64,
}

/// Per-iteration context passed to a step policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepContext<'a> {
    pub iter: usize,
    /// Cost at the current point (alpha = 0).
    pub cost0: f64,
    /// Candidate step sizes, in the order they should be tried.
    pub schedule: &'a [f64],
}

/// Policy interface for picking a step size out of a schedule.
///
/// `eval_cost(alpha)` returns the cost at `x + alpha * direction`. It is
/// total: unevaluable points come back as `+inf`, never NaN.
pub trait StepPolicy {
    /// Pick a step size. `None` only for an empty schedule.
    fn select(
        &mut self,
        ctx: &StepContext<'_>,
        eval_cost: &mut dyn FnMut(f64) -> f64,
    ) -> Option<StepChoice>;
}

/// Evaluate every step size and keep the cheapest.
///
/// Ties keep the earliest entry, so with the default schedule the largest
/// of several equally good steps wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestOfSchedule;

impl StepPolicy for BestOfSchedule {
    fn select(
        &mut self,
        ctx: &StepContext<'_>,
        eval_cost: &mut dyn FnMut(f64) -> f64,
    ) -> Option<StepChoice> {
        let mut best: Option<StepChoice> = None;
        for &alpha in ctx.schedule {
            let cost = eval_cost(alpha);
            match best {
                Some(b) if !(cost < b.cost) => {}
                _ => best = Some(StepChoice { alpha, cost }),
            }
        }
        best
    }
}

/// Accept the first step size that strictly lowers the cost.
///
/// Falls back to the cheapest entry when nothing improves, which lets the
/// batch stopping rule see a zero or negative improvement and stop.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstDecrease;

impl StepPolicy for FirstDecrease {
    fn select(
        &mut self,
        ctx: &StepContext<'_>,
        eval_cost: &mut dyn FnMut(f64) -> f64,
    ) -> Option<StepChoice> {
        let mut best: Option<StepChoice> = None;
        for &alpha in ctx.schedule {
            let cost = eval_cost(alpha);
            if cost < ctx.cost0 {
                return Some(StepChoice { alpha, cost });
            }
            match best {
                Some(b) if !(cost < b.cost) => {}
                _ => best = Some(StepChoice { alpha, cost }),
            }
        }
        best
    }
}

/// A schedule must be non-empty with positive, finite entries.
pub fn validate_schedule(schedule: &[f64]) -> Result<()> {
    if schedule.is_empty() {
        return Err(OptimError::EmptySchedule);
    }
    match schedule.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
        Some(&bad) => Err(OptimError::InvalidStepSize(bad)),
        None => Ok(()),
    }
}
