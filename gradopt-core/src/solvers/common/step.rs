use crate::error::{OptimError, Result};
use crate::spaces::Space;

/// Fail fast when a gradient callback wrote a vector of the wrong length.
pub fn check_gradient_dim<S: Space>(space: &S, x: &S::Point, grad: &S::Tangent) -> Result<()> {
    let expected = space.dim(x);
    let actual = space.tangent_dim(grad);
    if expected == actual {
        Ok(())
    } else {
        Err(OptimError::DimensionMismatch { expected, actual })
    }
}

/// |value - next_value|, defined as 0 when both are equal.
///
/// Two `+inf` values (every candidate unevaluable) therefore count as no
/// improvement instead of producing NaN.
pub fn improvement(value: f64, next_value: f64) -> f64 {
    if value == next_value {
        0.0
    } else {
        (value - next_value).abs()
    }
}

/// Undo the sign flip of a maximization, keeping `+inf` as "unevaluable".
pub fn restore_sign(minimized: f64) -> f64 {
    if minimized == f64::INFINITY {
        minimized
    } else {
        -minimized
    }
}

/// Stopping tolerances must be positive and finite.
pub fn validate_tolerance(tolerance: f64) -> Result<()> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(OptimError::InvalidConfig(format!(
            "tolerance must be positive, got {tolerance}"
        )))
    }
}

/// Learning-rate schedule of the stochastic solver: `alpha_0 > 0`,
/// `decay` in (0, 1] and at least one stagnant epoch before stopping.
pub fn validate_learning_rate(alpha_0: f64, decay: f64, patience: usize) -> Result<()> {
    if !(alpha_0.is_finite() && alpha_0 > 0.0) {
        return Err(OptimError::InvalidConfig(format!(
            "alpha_0 must be positive, got {alpha_0}"
        )));
    }
    if !(decay > 0.0 && decay <= 1.0) {
        return Err(OptimError::InvalidConfig(format!(
            "decay must be in (0, 1], got {decay}"
        )));
    }
    if patience == 0 {
        return Err(OptimError::InvalidConfig(
            "patience must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spaces::EuclideanSpace;

    #[test]
    fn equal_infinities_are_no_improvement() {
        assert_eq!(improvement(f64::INFINITY, f64::INFINITY), 0.0);
        assert_eq!(improvement(f64::INFINITY, 1.0), f64::INFINITY);
        assert_eq!(improvement(2.0, 0.5), 1.5);
        assert_eq!(improvement(0.5, 2.0), 1.5);
    }

    #[test]
    fn gradient_dim_mismatch_is_reported() {
        let space = EuclideanSpace;
        assert!(check_gradient_dim(&space, &vec![0.0; 3], &vec![0.0; 3]).is_ok());
        assert!(matches!(
            check_gradient_dim(&space, &vec![0.0; 3], &vec![0.0; 2]),
            Err(OptimError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn restore_sign_keeps_unevaluable() {
        assert_eq!(restore_sign(-4.0), 4.0);
        assert_eq!(restore_sign(0.5), -0.5);
        assert_eq!(restore_sign(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn parameter_checks() {
        assert!(validate_tolerance(1e-9).is_ok());
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate_tolerance(bad),
                Err(OptimError::InvalidConfig(_))
            ));
        }

        assert!(validate_learning_rate(0.01, 0.9, 100).is_ok());
        assert!(validate_learning_rate(0.01, 1.0, 1).is_ok());
        for (alpha_0, decay, patience) in [
            (-0.01, 0.9, 100),
            (f64::NAN, 0.9, 100),
            (0.01, 0.0, 100),
            (0.01, 1.5, 100),
            (0.01, f64::NAN, 100),
            (0.01, 0.9, 0),
        ] {
            assert!(matches!(
                validate_learning_rate(alpha_0, decay, patience),
                Err(OptimError::InvalidConfig(_))
            ));
        }
    }
}
