use approx::{assert_abs_diff_eq, assert_relative_eq};
use gradopt::{
    config::StochasticConfig,
    problems::{
        evaluation::negate_sample,
        test_functions::LinearRegression,
    },
    solvers::stochastic::{maximize_stochastic, minimize_stochastic, StochasticGradientDescent},
    OptimError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Samples on the line y = 1 + 2x.
fn line_samples() -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..20).map(|i| i as f64 / 10.0).collect();
    let ys = xs.iter().map(|x| 1.0 + 2.0 * x).collect();
    (xs, ys)
}

fn seeded(seed: u64) -> StochasticGradientDescent {
    StochasticGradientDescent {
        seed: Some(seed),
        ..StochasticGradientDescent::new()
    }
}

#[test]
fn linear_regression_recovers_line() {
    let (xs, ys) = line_samples();
    let result = seeded(0)
        .minimize(&LinearRegression, &xs, &ys, vec![0.0, 0.0])
        .unwrap();

    assert!(result.converged);
    assert_abs_diff_eq!(result.x[0], 1.0, epsilon = 1e-2);
    assert_abs_diff_eq!(result.x[1], 2.0, epsilon = 1e-2);
    assert!(result.f < 1e-4);
}

#[test]
fn free_function_fits_the_line() {
    let (xs, ys) = line_samples();
    let theta = minimize_stochastic(
        |x: &f64, y: &f64, theta: &Vec<f64>| (y - theta[0] - theta[1] * x).powi(2),
        |x: &f64, y: &f64, theta: &Vec<f64>, g: &mut Vec<f64>| {
            let e = y - theta[0] - theta[1] * x;
            g[0] = -2.0 * e;
            g[1] = -2.0 * e * x;
        },
        &xs,
        &ys,
        vec![0.0, 0.0],
        0.01,
    )
    .unwrap();

    assert_abs_diff_eq!(theta[0], 1.0, epsilon = 1e-2);
    assert_abs_diff_eq!(theta[1], 2.0, epsilon = 1e-2);
}

#[test]
fn constant_objective_stops_on_stagnation_cap() {
    let xs = [0.0, 1.0, 2.0];
    let ys = [0.0, 1.0, 2.0];
    let theta_0 = vec![0.5, -0.5];
    let solver = StochasticGradientDescent {
        collect_trace: true,
        ..seeded(5)
    };

    // the gradient keeps moving theta, but nothing ever improves on epoch 0
    let result = solver
        .minimize_with_fn(
            &xs,
            &ys,
            theta_0.clone(),
            |_x: &f64, _y: &f64, _theta: &Vec<f64>| 1.0,
            |_x: &f64, _y: &f64, _theta: &Vec<f64>, g: &mut Vec<f64>| g.fill(1.0),
        )
        .unwrap();

    assert!(result.converged);
    assert_eq!(result.x, theta_0);
    assert_eq!(result.f, 3.0);
    // one recording epoch, then exactly `patience` stagnant ones
    assert_eq!(result.iters, 1 + 100);
    assert_relative_eq!(result.alpha, 0.01 * 0.9f64.powi(100), max_relative = 1e-12);

    let trace = result.trace.expect("trace requested");
    let stagnant: Vec<usize> = trace.iter().filter_map(|row| row.stagnant).collect();
    assert_eq!(stagnant.len(), 101);
    assert_eq!(stagnant[0], 0);
    assert_eq!(*stagnant.last().unwrap(), 100);
    assert_eq!(trace.last().and_then(|row| row.note), Some("stagnated"));
}

#[test]
fn patience_is_configurable() {
    let solver = StochasticGradientDescent {
        patience: 5,
        ..seeded(1)
    };
    let result = solver
        .minimize_with_fn(
            &[1.0],
            &[1.0],
            vec![0.0],
            |_x: &f64, _y: &f64, _theta: &Vec<f64>| 0.0,
            |_x: &f64, _y: &f64, _theta: &Vec<f64>, g: &mut Vec<f64>| g[0] = 0.0,
        )
        .unwrap();
    assert_eq!(result.iters, 6);
}

#[test]
fn best_value_never_increases() {
    let (xs, ys) = line_samples();
    let solver = StochasticGradientDescent {
        collect_trace: true,
        ..seeded(3)
    };
    let result = solver
        .minimize(&LinearRegression, &xs, &ys, vec![0.0, 0.0])
        .unwrap();
    let trace = result.trace.expect("trace requested");

    let best: Vec<f64> = trace.iter().filter_map(|row| row.best).collect();
    assert!(best.len() > 100);
    assert!(best.windows(2).all(|w| w[1] <= w[0]));
    for row in &trace {
        if let (Some(f), Some(b)) = (row.f, row.best) {
            assert!(b <= f);
        }
    }
    assert_eq!(best.last().copied(), Some(result.f));
}

#[test]
fn returns_recorded_best_not_last_iterate() {
    // objective improves only while theta[0] < 1, the gradient keeps pushing past it
    let xs = [0.0];
    let ys = [0.0];
    let result = StochasticGradientDescent {
        alpha_0: 0.5,
        ..seeded(2)
    }
    .minimize_with_fn(
        &xs,
        &ys,
        vec![0.0],
        |_x: &f64, _y: &f64, theta: &Vec<f64>| (theta[0] - 1.0).abs(),
        |_x: &f64, _y: &f64, _theta: &Vec<f64>, g: &mut Vec<f64>| g[0] = -1.0,
    )
    .unwrap();

    // theta visits 0, 0.5, 1.0 (best), then only moves further away
    assert_eq!(result.x, vec![1.0]);
    assert_eq!(result.f, 0.0);
}

#[test]
fn seeded_runs_are_reproducible() {
    let (xs, ys) = line_samples();
    let a = seeded(11)
        .minimize(&LinearRegression, &xs, &ys, vec![0.0, 0.0])
        .unwrap();
    let b = seeded(11)
        .minimize(&LinearRegression, &xs, &ys, vec![0.0, 0.0])
        .unwrap();
    let c = StochasticGradientDescent::new()
        .minimize_with_rng(
            &LinearRegression,
            &xs,
            &ys,
            vec![0.0, 0.0],
            &mut StdRng::seed_from_u64(11),
        )
        .unwrap();

    assert_eq!(a.x, b.x);
    assert_eq!(a.iters, b.iters);
    assert_eq!(a.x, c.x);
}

#[test]
fn maximize_equals_minimize_of_negation() {
    let (xs, ys) = line_samples();
    let neg_err = |x: &f64, y: &f64, theta: &Vec<f64>| -(y - theta[0] - theta[1] * x).powi(2);
    let neg_grad = |x: &f64, y: &f64, theta: &Vec<f64>, g: &mut Vec<f64>| {
        let e = y - theta[0] - theta[1] * x;
        g[0] = 2.0 * e;
        g[1] = 2.0 * e * x;
    };
    let solver = StochasticGradientDescent::new();

    let maximized = solver
        .maximize_with_fn_and_rng(
            &xs,
            &ys,
            vec![0.0, 0.0],
            neg_err,
            neg_grad,
            &mut StdRng::seed_from_u64(4),
        )
        .unwrap();
    let minimized = solver
        .minimize_with_fn_and_rng(
            &xs,
            &ys,
            vec![0.0, 0.0],
            negate_sample(neg_err),
            |x: &f64, y: &f64, theta: &Vec<f64>, g: &mut Vec<f64>| {
                neg_grad(x, y, theta, g);
                g.iter_mut().for_each(|gi| *gi = -*gi);
            },
            &mut StdRng::seed_from_u64(4),
        )
        .unwrap();

    assert_eq!(maximized.x, minimized.x);
    assert_eq!(maximized.f, -minimized.f);
    assert!(maximized.f <= 0.0);
    assert_abs_diff_eq!(maximized.x[1], 2.0, epsilon = 1e-2);
}

#[test]
fn unevaluable_objective_returns_initial_parameters() {
    let result = seeded(8)
        .minimize_with_fn(
            &[1.0, 2.0],
            &[1.0, 2.0],
            vec![3.0],
            |_x: &f64, _y: &f64, _theta: &Vec<f64>| -> Option<f64> { None },
            |_x: &f64, _y: &f64, _theta: &Vec<f64>, g: &mut Vec<f64>| g[0] = 1.0,
        )
        .unwrap();

    assert_eq!(result.x, vec![3.0]);
    assert_eq!(result.f, f64::INFINITY);
    assert_eq!(result.iters, 100);
}

#[test]
fn epoch_ceiling_stops_the_loop() {
    let (xs, ys) = line_samples();
    let solver = StochasticGradientDescent {
        max_epochs: 3,
        ..seeded(0)
    };
    let result = solver
        .minimize(&LinearRegression, &xs, &ys, vec![0.0, 0.0])
        .unwrap();

    assert!(!result.converged);
    assert_eq!(result.iters, 3);
}

#[test]
fn mismatched_samples_are_rejected() {
    let err = seeded(0)
        .minimize(&LinearRegression, &[1.0, 2.0, 3.0], &[1.0, 2.0], vec![0.0, 0.0])
        .unwrap_err();
    assert!(matches!(
        err,
        OptimError::SampleCountMismatch {
            inputs: 3,
            targets: 2
        }
    ));
}

#[test]
fn wrong_gradient_length_fails_fast() {
    let err = seeded(0)
        .minimize_with_fn(
            &[1.0],
            &[1.0],
            vec![0.0, 0.0],
            |_x: &f64, _y: &f64, _theta: &Vec<f64>| 1.0,
            |_x: &f64, _y: &f64, _theta: &Vec<f64>, g: &mut Vec<f64>| g.truncate(1),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        OptimError::DimensionMismatch {
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn built_from_config() {
    let config = StochasticConfig {
        alpha_0: 0.02,
        seed: Some(21),
        ..StochasticConfig::default()
    };
    let solver = StochasticGradientDescent::from_config(&config).unwrap();
    assert_eq!(solver.alpha_0, 0.02);
    assert_eq!(solver.seed, Some(21));

    let bad = StochasticConfig {
        alpha_0: 0.0,
        ..StochasticConfig::default()
    };
    assert!(matches!(
        StochasticGradientDescent::from_config(&bad),
        Err(OptimError::InvalidConfig(_))
    ));
}

#[test]
fn bad_learning_rate_settings_are_rejected() {
    let (xs, ys) = line_samples();
    let value =
        |x: &f64, y: &f64, theta: &Vec<f64>| LinearRegression::error(theta, *x, *y).powi(2);
    let grad = |x: &f64, y: &f64, theta: &Vec<f64>, g: &mut Vec<f64>| {
        let e = LinearRegression::error(theta, *x, *y);
        g[0] = -2.0 * e;
        g[1] = -2.0 * e * x;
    };

    for alpha_0 in [-0.01, 0.0, f64::NAN] {
        assert!(matches!(
            minimize_stochastic(value, grad, &xs, &ys, vec![0.0, 0.0], alpha_0),
            Err(OptimError::InvalidConfig(_))
        ));
        assert!(matches!(
            maximize_stochastic(value, grad, &xs, &ys, vec![0.0, 0.0], alpha_0),
            Err(OptimError::InvalidConfig(_))
        ));
    }

    for solver in [
        StochasticGradientDescent {
            patience: 0,
            ..seeded(0)
        },
        StochasticGradientDescent {
            decay: 0.0,
            ..seeded(0)
        },
        StochasticGradientDescent {
            decay: 1.5,
            ..seeded(0)
        },
    ] {
        assert!(matches!(
            solver.minimize(&LinearRegression, &xs, &ys, vec![0.0, 0.0]),
            Err(OptimError::InvalidConfig(_))
        ));
    }
}

#[test]
fn unevaluable_maximize_reports_infinity() {
    let result = seeded(6)
        .maximize_with_fn(
            &[1.0],
            &[1.0],
            vec![2.0],
            |_x: &f64, _y: &f64, _theta: &Vec<f64>| f64::NAN,
            |_x: &f64, _y: &f64, _theta: &Vec<f64>, g: &mut Vec<f64>| g[0] = 1.0,
        )
        .unwrap();

    assert_eq!(result.x, vec![2.0]);
    assert_eq!(result.f, f64::INFINITY);
}

#[test]
fn gradient_buffer_is_zeroed_between_samples() {
    // the gradient is only written while theta < 1, zero elsewhere
    let result = StochasticGradientDescent {
        alpha_0: 0.5,
        patience: 3,
        collect_trace: true,
        ..seeded(9)
    }
    .minimize_with_fn(
        &[0.0],
        &[0.0],
        vec![0.0],
        |_x: &f64, _y: &f64, theta: &Vec<f64>| (theta[0] - 1.0).powi(2),
        |_x: &f64, _y: &f64, theta: &Vec<f64>, g: &mut Vec<f64>| {
            if theta[0] < 1.0 {
                g[0] = 2.0 * (theta[0] - 1.0);
            }
        },
    )
    .unwrap();

    // one step of 0.5 lands exactly on 1, where theta must then stay
    assert_eq!(result.x, vec![1.0]);
    assert_eq!(result.iters, 5);
    let values: Vec<f64> = result
        .trace
        .expect("trace requested")
        .iter()
        .filter_map(|row| row.f)
        .collect();
    assert_eq!(values, vec![1.0, 0.0, 0.0, 0.0, 0.0]);
}
