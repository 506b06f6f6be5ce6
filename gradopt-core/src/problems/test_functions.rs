//! Reference problems for tests and examples.

use super::objective::{Objective, SampleObjective};
use crate::numerics::vector;
use crate::spaces::EuclideanSpace;

/// f(v) = v_1^2 + ... + v_n^2, minimized at the origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct SumOfSquares;

impl Objective<EuclideanSpace> for SumOfSquares {
    fn value(&self, x: &Vec<f64>) -> f64 {
        vector::sum_of_squares(x)
    }

    fn gradient(&self, x: &Vec<f64>, grad: &mut Vec<f64>) {
        for (g, xi) in grad.iter_mut().zip(x) {
            *g = 2.0 * xi;
        }
    }
}

/// 1-D quadratic f(x) = 0.5 * a * x^2 - b * x, minimized at x* = b / a.
#[derive(Clone, Copy, Debug)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
}

impl Objective<EuclideanSpace> for Quadratic {
    fn value(&self, x: &Vec<f64>) -> f64 {
        let x0 = x[0];
        0.5 * self.a * x0 * x0 - self.b * x0
    }

    fn gradient(&self, x: &Vec<f64>, grad: &mut Vec<f64>) {
        grad[0] = self.a * x[0] - self.b;
    }
}

/// f(x, y) = (a - x)^2 + b (y - x^2)^2, minimized at (a, a^2).
#[derive(Clone, Copy, Debug)]
pub struct Rosenbrock {
    pub a: f64,
    pub b: f64,
}

impl Objective<EuclideanSpace> for Rosenbrock {
    fn value(&self, x: &Vec<f64>) -> f64 {
        let x0 = x[0];
        let x1 = x[1];
        (self.a - x0).powi(2) + self.b * (x1 - x0 * x0).powi(2)
    }

    fn gradient(&self, x: &Vec<f64>, grad: &mut Vec<f64>) {
        let x0 = x[0];
        let x1 = x[1];
        grad[0] = -2.0 * (self.a - x0) - 4.0 * self.b * x0 * (x1 - x0 * x0);
        grad[1] = 2.0 * self.b * (x1 - x0 * x0);
    }
}

/// Squared error of the line `y ~ theta[0] + theta[1] * x` on one sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearRegression;

impl LinearRegression {
    pub fn predict(theta: &[f64], x: f64) -> f64 {
        theta[0] + theta[1] * x
    }

    pub fn error(theta: &[f64], x: f64, y: f64) -> f64 {
        y - Self::predict(theta, x)
    }
}

impl SampleObjective<EuclideanSpace, f64, f64> for LinearRegression {
    fn value(&self, x: &f64, y: &f64, theta: &Vec<f64>) -> f64 {
        Self::error(theta, *x, *y).powi(2)
    }

    fn gradient(&self, x: &f64, y: &f64, theta: &Vec<f64>, grad: &mut Vec<f64>) {
        let e = Self::error(theta, *x, *y);
        grad[0] = -2.0 * e;
        grad[1] = -2.0 * e * x;
    }
}
