use crate::spaces::Space;

/// Objective function to be minimized.
///
/// - `S::Point` represents points on the space
/// - In `gradient` the user computes a local gradient/update vector and writes
///   it into the buffer (compatible with `Space::retract_into`)
///
/// `value` may return NaN for points where the objective is undefined; solvers
/// score such points as `+inf`.
pub trait Objective<S: Space> {
    /// Function value f(x) at x.
    fn value(&self, x: &S::Point) -> f64;

    /// Write the gradient ∇f(x) at x into grad.
    ///
    /// grad is reset to zero via `Space::zero_tangent_into` before every
    /// call, so only nonzero entries need to be written.
    fn gradient(&self, x: &S::Point, grad: &mut S::Tangent);
}

/// Additive objective over a data set, evaluated one sample at a time.
///
/// The total objective is the sum of `value(x_i, y_i, theta)` over all
/// samples. Stochastic solvers step along one sample's gradient at a time.
pub trait SampleObjective<S: Space, X, Y> {
    /// Error contributed by one (input, target) pair at parameters `theta`.
    fn value(&self, x: &X, y: &Y, theta: &S::Point) -> f64;

    /// Gradient of the single-sample error with respect to `theta`.
    fn gradient(&self, x: &X, y: &Y, theta: &S::Point, grad: &mut S::Tangent);
}
