use crate::core::estimators::GaussianEstimator;
use crate::core::estimators::covariance::{column_means, regularize, sample_covariance};
use crate::distributions::{ClassDistribution, MultivariateGaussian, UnivariateGaussian};
use crate::error::GnbError;
use nalgebra::DMatrix;
use tracing::{debug, warn};

pub const DEFAULT_COVARIANCE_EPSILON: f64 = 1e-6;
pub const DEFAULT_VARIANCE_FLOOR: f64 = 1e-9;

/// Fits the density of a single class from that class's feature rows.
///
/// Univariate models read the first feature column; their variance is
/// clamped up to `variance_floor` (a floor of zero turns a zero variance
/// into [`GnbError::ZeroVariance`]). Multivariate models always add
/// `covariance_epsilon` to the covariance diagonal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterEstimator {
    univariate: bool,
    covariance_epsilon: f64,
    variance_floor: f64,
}

impl ParameterEstimator {
    pub fn new(univariate: bool) -> Self {
        Self {
            univariate,
            covariance_epsilon: DEFAULT_COVARIANCE_EPSILON,
            variance_floor: DEFAULT_VARIANCE_FLOOR,
        }
    }

    pub fn with_covariance_epsilon(mut self, epsilon: f64) -> Self {
        self.covariance_epsilon = epsilon;
        self
    }

    pub fn with_variance_floor(mut self, floor: f64) -> Self {
        self.variance_floor = floor;
        self
    }

    pub fn is_univariate(&self) -> bool {
        self.univariate
    }

    pub fn fit(&self, features: &DMatrix<f64>, label: i64) -> Result<ClassDistribution, GnbError> {
        if features.nrows() == 0 {
            return Err(GnbError::InsufficientData(format!(
                "no samples for class {label}"
            )));
        }

        if self.univariate {
            self.fit_univariate(features, label)
                .map(ClassDistribution::Univariate)
        } else {
            self.fit_multivariate(features, label)
                .map(ClassDistribution::Multivariate)
        }
    }

    fn fit_univariate(
        &self,
        features: &DMatrix<f64>,
        label: i64,
    ) -> Result<UnivariateGaussian, GnbError> {
        if features.ncols() != 1 {
            return Err(GnbError::shape("univariate features", 1, features.ncols()));
        }

        let estimator: GaussianEstimator = features.column(0).iter().copied().collect();
        let mut variance = estimator.variance();
        if variance < self.variance_floor {
            warn!(
                label,
                variance,
                floor = self.variance_floor,
                "class variance below floor, clamping"
            );
            variance = self.variance_floor;
        }

        debug!(
            label,
            samples = estimator.count(),
            mean = estimator.mean(),
            variance,
            "fitted univariate gaussian"
        );

        UnivariateGaussian::new(estimator.mean(), variance.sqrt())
            .ok_or(GnbError::ZeroVariance { label })
    }

    fn fit_multivariate(
        &self,
        features: &DMatrix<f64>,
        label: i64,
    ) -> Result<MultivariateGaussian, GnbError> {
        let mean = column_means(features);
        let covariance = regularize(
            sample_covariance(features, &mean),
            self.covariance_epsilon,
        );

        debug!(
            label,
            samples = features.nrows(),
            dimension = features.ncols(),
            "fitted multivariate gaussian"
        );

        MultivariateGaussian::new(mean, covariance).ok_or(GnbError::SingularCovariance { label })
    }
}
