use gradopt::{
    config::StochasticConfig, problems::test_functions::LinearRegression,
    solvers::stochastic::StochasticGradientDescent,
};

fn main() -> gradopt::Result<()> {
    // noisy samples around y = 1.5 + 0.75 x
    let xs: Vec<f64> = (0..50).map(|i| i as f64 / 10.0).collect();
    let ys: Vec<f64> = xs
        .iter()
        .enumerate()
        .map(|(i, x)| 1.5 + 0.75 * x + 0.05 * ((i * 7919) % 13) as f64 / 13.0 - 0.025)
        .collect();

    let config = StochasticConfig {
        alpha_0: 0.005,
        seed: Some(0),
        ..StochasticConfig::default()
    };
    let solver = StochasticGradientDescent::from_config(&config)?;
    let result = solver
        .minimize(&LinearRegression, &xs, &ys, vec![0.0, 0.0])?;

    println!(
        "converged={} epochs={} alpha={:.6} beta={:.6} sse={:.3e}",
        result.converged, result.iters, result.x[0], result.x[1], result.f
    );
    Ok(())
}
