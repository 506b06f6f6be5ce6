//! Forward-difference gradient estimates.
//!
//! These produce the same buffer layout as an analytic gradient, so a
//! [`NumericGradient`] can stand in wherever a solver expects `grad_fn`.

use crate::problems::Objective;
use crate::spaces::EuclideanSpace;

pub const DEFAULT_STEP: f64 = 1e-5;

/// Slope estimate of a scalar function: (f(x + h) - f(x)) / h.
pub fn difference_quotient<F>(f: F, x: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + h) - f(x)) / h
}

/// i-th partial difference quotient of `f` at `v`.
pub fn partial_difference_quotient<F>(f: F, v: &[f64], i: usize, h: f64) -> f64
where
    F: Fn(&Vec<f64>) -> f64,
{
    let base = v.to_vec();
    let mut w = base.clone();
    w[i] += h;
    (f(&w) - f(&base)) / h
}

/// Write the forward-difference gradient of `f` at `v` into `out`.
///
/// `f(v)` is evaluated once; each coordinate costs one more evaluation.
pub fn estimate_gradient_into<F>(f: F, v: &[f64], h: f64, out: &mut Vec<f64>)
where
    F: Fn(&Vec<f64>) -> f64,
{
    out.resize(v.len(), 0.0);
    let mut w = v.to_vec();
    let f0 = f(&w);
    for i in 0..v.len() {
        w[i] = v[i] + h;
        out[i] = (f(&w) - f0) / h;
        w[i] = v[i];
    }
}

pub fn estimate_gradient<F>(f: F, v: &[f64], h: f64) -> Vec<f64>
where
    F: Fn(&Vec<f64>) -> f64,
{
    let mut out = Vec::with_capacity(v.len());
    estimate_gradient_into(f, v, h, &mut out);
    out
}

/// Objective whose gradient is estimated by forward differences.
#[derive(Clone, Copy, Debug)]
pub struct NumericGradient<F> {
    pub f: F,
    pub h: f64,
}

impl<F> NumericGradient<F>
where
    F: Fn(&Vec<f64>) -> f64,
{
    pub fn new(f: F) -> Self {
        Self { f, h: DEFAULT_STEP }
    }

    pub fn with_step(f: F, h: f64) -> Self {
        Self { f, h }
    }

    pub fn gradient_into(&self, x: &Vec<f64>, grad: &mut Vec<f64>) {
        estimate_gradient_into(&self.f, x, self.h, grad);
    }
}

impl<F> Objective<EuclideanSpace> for NumericGradient<F>
where
    F: Fn(&Vec<f64>) -> f64,
{
    fn value(&self, x: &Vec<f64>) -> f64 {
        (self.f)(x)
    }

    fn gradient(&self, x: &Vec<f64>, grad: &mut Vec<f64>) {
        self.gradient_into(x, grad);
    }
}
