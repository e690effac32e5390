use crate::error::GnbError;
use nalgebra::DVector;

/// ln(2π)
pub(crate) const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// A fitted probability density that can be scored in log space.
pub trait LogDensity {
    /// Length of the feature vectors this density is defined over.
    fn dimension(&self) -> usize;

    /// Natural-log density of `x`.
    fn log_density(&self, x: &DVector<f64>) -> Result<f64, GnbError>;
}
