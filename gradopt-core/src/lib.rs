//! gradopt: a tiny gradient descent toolbox
//!
//! - `Space`: an abstraction of vector spaces, `EuclideanSpace` (`Vec<f64>`)
//!   is the concrete one
//! - `Objective` / `SampleObjective`: whole-data and per-sample objectives
//! - `GradientDescent`: batch descent picking the best step from a schedule
//! - `StochasticGradientDescent`: per-sample steps in random order with a
//!   decaying learning rate
//! - `FixedStepDescent`: constant-step descent
//!
//! Objectives may fail to evaluate (NaN, `None`, `Err`); solvers score such
//! points as `+inf` so candidate comparison stays total. Maximization negates
//! the objective and gradient and minimizes.
//!
//! ```
//! use gradopt::solvers::batch::minimize_batch;
//!
//! let x = minimize_batch(
//!     |v: &Vec<f64>| v.iter().map(|vi| vi * vi).sum::<f64>(),
//!     |v: &Vec<f64>, g: &mut Vec<f64>| {
//!         for (gi, vi) in g.iter_mut().zip(v) {
//!             *gi = 2.0 * vi;
//!         }
//!     },
//!     vec![10.0, -10.0, 5.0],
//!     1e-9,
//! )
//! .unwrap();
//! assert!(x.iter().all(|xi| xi.abs() < 1e-3));
//! ```

pub mod config;
pub mod error;
pub mod numerics;
pub mod problems;
pub mod solvers;
pub mod spaces;

pub use error::{OptimError, Result};
pub use problems::{Evaluation, IntoEvaluation, Objective, SampleObjective};
pub use solvers::batch::{maximize_batch, minimize_batch, GradientDescent, OptimizeResult};
pub use solvers::fixed::FixedStepDescent;
pub use solvers::stochastic::{
    maximize_stochastic, minimize_stochastic, StochasticGradientDescent, StochasticResult,
};
pub use spaces::{EuclideanSpace, Space};
