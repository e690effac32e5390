use crate::distributions::{LogDensity, MultivariateGaussian, UnivariateGaussian};
use crate::error::GnbError;
use nalgebra::DVector;

/// The fitted density of one class; which variant is used follows the
/// classifier's model family.
#[derive(Debug, Clone)]
pub enum ClassDistribution {
    Univariate(UnivariateGaussian),
    Multivariate(MultivariateGaussian),
}

impl LogDensity for ClassDistribution {
    fn dimension(&self) -> usize {
        match self {
            ClassDistribution::Univariate(d) => d.dimension(),
            ClassDistribution::Multivariate(d) => d.dimension(),
        }
    }

    fn log_density(&self, x: &DVector<f64>) -> Result<f64, GnbError> {
        match self {
            ClassDistribution::Univariate(d) => d.log_density(x),
            ClassDistribution::Multivariate(d) => d.log_density(x),
        }
    }
}
