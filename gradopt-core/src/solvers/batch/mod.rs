mod solve;
mod types;

pub use crate::solvers::common::step_policy::{
    BestOfSchedule, FirstDecrease, StepChoice, StepContext, StepPolicy, DEFAULT_STEP_SIZES,
};
pub use solve::{maximize_batch, minimize_batch};
pub use types::{GradientDescent, OptimizeResult};
