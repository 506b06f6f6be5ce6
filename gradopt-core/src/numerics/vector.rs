//! Small dependency-free helpers on `&[f64]`.

/// Move `step_size` units along `direction` starting from `v`.
///
/// `new[i] = v[i] + step_size * direction[i]`. Neither input is touched.
pub fn step(v: &[f64], direction: &[f64], step_size: f64) -> Vec<f64> {
    v.iter()
        .zip(direction)
        .map(|(vi, di)| vi + step_size * di)
        .collect()
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// v_1 * v_1 + ... + v_n * v_n
pub fn sum_of_squares(v: &[f64]) -> f64 {
    dot(v, v)
}

pub fn magnitude(v: &[f64]) -> f64 {
    sum_of_squares(v).sqrt()
}

pub fn distance(v: &[f64], w: &[f64]) -> f64 {
    v.iter()
        .zip(w)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

pub fn negate(v: &[f64]) -> Vec<f64> {
    v.iter().map(|vi| -vi).collect()
}
