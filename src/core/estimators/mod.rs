pub mod covariance;
mod gaussian_estimator;
mod parameter_estimator;

pub use gaussian_estimator::GaussianEstimator;
pub use parameter_estimator::{
    DEFAULT_COVARIANCE_EPSILON, DEFAULT_VARIANCE_FLOOR, ParameterEstimator,
};
