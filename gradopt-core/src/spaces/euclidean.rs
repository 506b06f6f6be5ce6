use super::space::Space;
use crate::numerics::vector;

/// R^n represented as `Vec<f64>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanSpace;

impl Space for EuclideanSpace {
    type Point = Vec<f64>;
    type Tangent = Vec<f64>;

    fn zero_like(&self, x: &Vec<f64>) -> Vec<f64> {
        vec![0.0; x.len()]
    }

    fn zero_tangent_like(&self, x: &Vec<f64>) -> Vec<f64> {
        vec![0.0; x.len()]
    }

    fn zero_tangent_into(&self, v: &mut Vec<f64>, x: &Vec<f64>) {
        v.clear();
        v.resize(x.len(), 0.0);
    }

    fn dim(&self, x: &Vec<f64>) -> usize {
        x.len()
    }

    fn tangent_dim(&self, v: &Vec<f64>) -> usize {
        v.len()
    }

    fn tangent_norm(&self, v: &Vec<f64>) -> f64 {
        vector::magnitude(v)
    }

    fn distance(&self, x: &Vec<f64>, y: &Vec<f64>) -> f64 {
        vector::distance(x, y)
    }

    fn scale_into(&self, out: &mut Vec<f64>, v: &Vec<f64>, alpha: f64) {
        out.resize(v.len(), 0.0);
        for (o, vi) in out.iter_mut().zip(v) {
            *o = alpha * vi;
        }
    }

    fn add_into(&self, out: &mut Vec<f64>, x: &Vec<f64>, v: &Vec<f64>) {
        out.resize(x.len(), 0.0);
        for i in 0..x.len() {
            out[i] = x[i] + v[i];
        }
    }

    fn negate_in_place(&self, v: &mut Vec<f64>) {
        for vi in v.iter_mut() {
            *vi = -*vi;
        }
    }

    // Same formula as `vector::step`, without the temporary.
    fn retract_into(
        &self,
        out: &mut Vec<f64>,
        x: &Vec<f64>,
        direction: &Vec<f64>,
        alpha: f64,
        _tmp: &mut Vec<f64>,
    ) {
        out.resize(x.len(), 0.0);
        for i in 0..x.len() {
            out[i] = x[i] + alpha * direction[i];
        }
    }
}
