use crate::distributions::LN_2PI;
use crate::distributions::LogDensity;
use crate::error::GnbError;
use nalgebra::{Cholesky, DMatrix, DVector, Dyn};

/// Multivariate normal density backed by a Cholesky factor of its covariance.
///
/// The log-determinant and the Mahalanobis term both come from the factor, so
/// no explicit inverse or plain determinant is ever formed.
#[derive(Debug, Clone)]
pub struct MultivariateGaussian {
    mean: DVector<f64>,
    covariance: DMatrix<f64>,
    cholesky: Cholesky<f64, Dyn>,
    log_det: f64,
}

impl MultivariateGaussian {
    /// Returns `None` if the shapes disagree or `covariance` is not
    /// positive-definite.
    pub fn new(mean: DVector<f64>, covariance: DMatrix<f64>) -> Option<Self> {
        let d = mean.len();
        if covariance.shape() != (d, d) || d == 0 {
            return None;
        }

        let cholesky = Cholesky::new(covariance.clone())?;
        let log_det = 2.0
            * cholesky
                .l_dirty()
                .diagonal()
                .iter()
                .map(|v| v.ln())
                .sum::<f64>();
        if !log_det.is_finite() {
            return None;
        }

        Some(Self {
            mean,
            covariance,
            cholesky,
            log_det,
        })
    }

    pub fn mean(&self) -> &DVector<f64> {
        &self.mean
    }

    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.covariance
    }

    /// Natural log of the covariance determinant.
    pub fn log_det(&self) -> f64 {
        self.log_det
    }
}

impl LogDensity for MultivariateGaussian {
    fn dimension(&self) -> usize {
        self.mean.len()
    }

    fn log_density(&self, x: &DVector<f64>) -> Result<f64, GnbError> {
        if x.len() != self.mean.len() {
            return Err(GnbError::shape(
                "feature dimension",
                self.mean.len(),
                x.len(),
            ));
        }

        let diff = x - &self.mean;
        let mahalanobis = diff.dot(&self.cholesky.solve(&diff));
        let d = self.mean.len() as f64;
        Ok(-0.5 * (d * LN_2PI + self.log_det + mahalanobis))
    }
}
