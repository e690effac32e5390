use thiserror::Error;

/// Failures raised by training, prediction and evaluation.
///
/// None of these are transient: retrying the same call with the same inputs
/// fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GnbError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("shape mismatch: {what} expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("non-finite value in {what} at index {index}")]
    NonFinite { what: &'static str, index: usize },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("covariance for class {label} is not positive-definite after regularization")]
    SingularCovariance { label: i64 },

    #[error("variance for class {label} is zero and no variance floor is configured")]
    ZeroVariance { label: i64 },

    #[error("invalid label {label}: {reason}")]
    InvalidLabel { label: i64, reason: String },

    #[error("classifier is not trained")]
    NotTrained,
}

impl GnbError {
    pub(crate) fn shape(what: &'static str, expected: usize, found: usize) -> Self {
        GnbError::ShapeMismatch {
            what,
            expected,
            found,
        }
    }
}
