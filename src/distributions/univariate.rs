use crate::distributions::LN_2PI;
use crate::distributions::LogDensity;
use crate::error::GnbError;
use nalgebra::DVector;

/// One-dimensional normal density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnivariateGaussian {
    mean: f64,
    std_dev: f64,
}

impl UnivariateGaussian {
    /// Returns `None` unless `std_dev` is finite and strictly positive.
    pub fn new(mean: f64, std_dev: f64) -> Option<Self> {
        if !mean.is_finite() || !std_dev.is_finite() || std_dev <= 0.0 {
            return None;
        }
        Some(Self { mean, std_dev })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    pub fn log_density_at(&self, value: f64) -> f64 {
        let z = (value - self.mean) / self.std_dev;
        -0.5 * LN_2PI - self.std_dev.ln() - 0.5 * z * z
    }
}

impl LogDensity for UnivariateGaussian {
    fn dimension(&self) -> usize {
        1
    }

    fn log_density(&self, x: &DVector<f64>) -> Result<f64, GnbError> {
        if x.len() != 1 {
            return Err(GnbError::shape("feature dimension", 1, x.len()));
        }
        Ok(self.log_density_at(x[0]))
    }
}
