use thiserror::Error;

/// Errors reported by solver entry points and configuration loading.
///
/// An objective that cannot be evaluated is *not* an error: it is scored as
/// `+inf` (see [`crate::problems::evaluation`]). Everything here is a usage
/// error the caller has to fix.
#[derive(Debug, Error)]
pub enum OptimError {
    #[error("gradient has length {actual}, expected {expected} (same as the point)")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("sample count mismatch: {inputs} inputs but {targets} targets")]
    SampleCountMismatch { inputs: usize, targets: usize },

    #[error("step size schedule is empty")]
    EmptySchedule,

    #[error("step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = OptimError> = std::result::Result<T, E>;
