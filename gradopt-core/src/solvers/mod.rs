pub mod batch;
pub mod common;
pub mod fixed;
pub mod stochastic;

pub use common::trace::SolverTraceRecord;
