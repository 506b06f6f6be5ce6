use gradopt::{
    numerics::finite_diff::NumericGradient, solvers::batch::GradientDescent, spaces::EuclideanSpace,
};

fn main() -> gradopt::Result<()> {
    let solver = GradientDescent {
        space: EuclideanSpace,
        tolerance: 1e-9,
        verbose: true,
        ..GradientDescent::default()
    };

    let result = solver
        .minimize_with_fn(
            vec![0.0],
            |x: &Vec<f64>| (x[0] - 3.0).powi(2),
            |x: &Vec<f64>, grad: &mut Vec<f64>| {
                grad[0] = 2.0 * (x[0] - 3.0);
            },
        )?;

    println!(
        "converged={} x*={:.6} f(x*)={:.3e}",
        result.converged, result.x[0], result.f
    );

    // same problem, gradient estimated by forward differences
    let numeric = NumericGradient::new(|x: &Vec<f64>| (x[0] - 3.0).powi(2));
    let quiet = GradientDescent {
        verbose: false,
        ..solver
    };
    let result = quiet.minimize(&numeric, vec![0.0])?;
    println!("numeric gradient: x*={:.6}", result.x[0]);
    Ok(())
}
