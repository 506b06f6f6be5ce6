pub mod step;
pub mod step_policy;
pub mod trace;
