use gradopt::{solvers::batch::GradientDescent, spaces::Space};

/// Points are angles wrapped to [-pi, pi).
#[derive(Clone, Copy, Debug, Default)]
struct AngleSpace;

fn wrap_angle(theta: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    (theta + std::f64::consts::PI).rem_euclid(two_pi) - std::f64::consts::PI
}

impl Space for AngleSpace {
    type Point = Vec<f64>;
    type Tangent = Vec<f64>;

    fn zero_like(&self, x: &Self::Point) -> Self::Point {
        vec![0.0; x.len()]
    }

    fn zero_tangent_like(&self, x: &Self::Point) -> Self::Tangent {
        vec![0.0; x.len()]
    }

    fn dim(&self, x: &Self::Point) -> usize {
        x.len()
    }

    fn tangent_dim(&self, v: &Self::Tangent) -> usize {
        v.len()
    }

    fn tangent_norm(&self, v: &Self::Tangent) -> f64 {
        v.iter().map(|vi| vi * vi).sum::<f64>().sqrt()
    }

    fn distance(&self, x: &Self::Point, y: &Self::Point) -> f64 {
        x.iter()
            .zip(y)
            .map(|(a, b)| wrap_angle(b - a).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    fn scale_into(&self, out: &mut Self::Tangent, v: &Self::Tangent, alpha: f64) {
        out.resize(v.len(), 0.0);
        for i in 0..v.len() {
            out[i] = alpha * v[i];
        }
    }

    fn add_into(&self, out: &mut Self::Point, x: &Self::Point, v: &Self::Tangent) {
        out.resize(x.len(), 0.0);
        for i in 0..x.len() {
            out[i] = wrap_angle(x[i] + v[i]);
        }
    }
}

fn main() -> gradopt::Result<()> {
    let solver = GradientDescent {
        tolerance: 1e-12,
        ..GradientDescent::with_space(AngleSpace)
    };

    // 1 - cos(theta - target), minimized at the target heading
    let target = 2.8;
    let result = solver
        .minimize_with_fn(
            vec![3.0 * std::f64::consts::PI],
            |x: &Vec<f64>| 1.0 - (x[0] - target).cos(),
            |x: &Vec<f64>, g: &mut Vec<f64>| g[0] = (x[0] - target).sin(),
        )?;

    println!(
        "converged={} theta={:.6} f={:.3e}",
        result.converged, result.x[0], result.f
    );
    Ok(())
}
