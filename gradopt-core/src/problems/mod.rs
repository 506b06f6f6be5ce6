pub mod evaluation;
pub mod objective;
pub mod test_functions;

pub use evaluation::{Evaluation, IntoEvaluation};
pub use objective::{Objective, SampleObjective};
