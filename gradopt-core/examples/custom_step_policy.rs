use gradopt::{
    problems::test_functions::Rosenbrock,
    solvers::batch::{GradientDescent, StepChoice, StepContext, StepPolicy},
};

/// Tries the schedule from the step that won last time, largest first.
#[derive(Clone, Copy, Debug, Default)]
struct WarmStart {
    last: usize,
}

impl StepPolicy for WarmStart {
    fn select(
        &mut self,
        ctx: &StepContext<'_>,
        eval_cost: &mut dyn FnMut(f64) -> f64,
    ) -> Option<StepChoice> {
        let start = self.last.saturating_sub(1).min(ctx.schedule.len().checked_sub(1)?);
        let mut best: Option<(usize, StepChoice)> = None;
        for (i, &alpha) in ctx.schedule.iter().enumerate().skip(start) {
            let cost = eval_cost(alpha);
            if best.map_or(true, |(_, b)| cost < b.cost) {
                best = Some((i, StepChoice { alpha, cost }));
            }
            if cost < ctx.cost0 {
                break;
            }
        }
        let (i, choice) = best?;
        self.last = i;
        Some(choice)
    }
}

fn main() -> gradopt::Result<()> {
    let solver = GradientDescent {
        tolerance: 1e-10,
        max_iters: 200_000,
        ..GradientDescent::new()
    };
    let mut policy = WarmStart::default();
    let result = solver
        .minimize_with_step_policy(&Rosenbrock { a: 1.0, b: 100.0 }, vec![-1.2, 1.0], &mut policy)?;

    println!(
        "converged={} iters={} x={:?} f={:.3e}",
        result.converged, result.iters, result.x, result.f
    );
    Ok(())
}
