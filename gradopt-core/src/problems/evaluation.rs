//! Total evaluation of objectives that may fail.
//!
//! Solvers compare candidate points with `<`, so every evaluation has to
//! produce a number. A failed evaluation becomes `+inf`, which loses every
//! comparison against a finite value.

use crate::numerics::vector;

/// Outcome of evaluating an objective at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Evaluation {
    Value(f64),
    Unevaluable,
}

impl Evaluation {
    /// Collapse to a number, `+inf` for an unevaluable point.
    pub fn or_infinity(self) -> f64 {
        match self {
            Evaluation::Value(v) => v,
            Evaluation::Unevaluable => f64::INFINITY,
        }
    }

    pub fn negate(self) -> Self {
        match self {
            Evaluation::Value(v) => Evaluation::Value(-v),
            Evaluation::Unevaluable => Evaluation::Unevaluable,
        }
    }

    pub fn is_unevaluable(&self) -> bool {
        matches!(self, Evaluation::Unevaluable)
    }
}

/// Conversion from an objective's return type into an [`Evaluation`].
///
/// - `f64`: NaN is unevaluable
/// - `Option<f64>`: `None` is unevaluable
/// - `Result<f64, E>`: any `Err` is unevaluable
pub trait IntoEvaluation {
    fn into_evaluation(self) -> Evaluation;
}

impl IntoEvaluation for Evaluation {
    fn into_evaluation(self) -> Evaluation {
        self
    }
}

impl IntoEvaluation for f64 {
    fn into_evaluation(self) -> Evaluation {
        if self.is_nan() {
            Evaluation::Unevaluable
        } else {
            Evaluation::Value(self)
        }
    }
}

impl IntoEvaluation for Option<f64> {
    fn into_evaluation(self) -> Evaluation {
        self.map_or(Evaluation::Unevaluable, IntoEvaluation::into_evaluation)
    }
}

impl<E> IntoEvaluation for Result<f64, E> {
    fn into_evaluation(self) -> Evaluation {
        self.ok().into_evaluation()
    }
}

/// Same function as `f`, except it returns `+inf` whenever `f` fails.
pub fn safe<P, R, F>(f: F) -> impl Fn(&P) -> f64
where
    P: ?Sized,
    R: IntoEvaluation,
    F: Fn(&P) -> R,
{
    move |x| f(x).into_evaluation().or_infinity()
}

/// Per-sample counterpart of [`safe`].
pub fn safe_sample<X, Y, P, R, F>(f: F) -> impl Fn(&X, &Y, &P) -> f64
where
    P: ?Sized,
    R: IntoEvaluation,
    F: Fn(&X, &Y, &P) -> R,
{
    move |x, y, theta| f(x, y, theta).into_evaluation().or_infinity()
}

/// `-f(x)`. Failures stay failures.
pub fn negate<P, R, F>(f: F) -> impl Fn(&P) -> Evaluation
where
    P: ?Sized,
    R: IntoEvaluation,
    F: Fn(&P) -> R,
{
    move |x| f(x).into_evaluation().negate()
}

/// Per-sample counterpart of [`negate`].
pub fn negate_sample<X, Y, P, R, F>(f: F) -> impl Fn(&X, &Y, &P) -> Evaluation
where
    P: ?Sized,
    R: IntoEvaluation,
    F: Fn(&X, &Y, &P) -> R,
{
    move |x, y, theta| f(x, y, theta).into_evaluation().negate()
}

/// Gradient counterpart of [`negate`]: flips every entry `f` writes.
pub fn negate_all<P, F>(f: F) -> impl Fn(&P, &mut Vec<f64>)
where
    P: ?Sized,
    F: Fn(&P, &mut Vec<f64>),
{
    move |x, grad| {
        f(x, grad);
        *grad = vector::negate(grad);
    }
}
