mod solve;
mod types;

pub use solve::{maximize_stochastic, minimize_stochastic, shuffled_indices};
pub use types::{StochasticGradientDescent, StochasticResult};
