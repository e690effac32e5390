mod class_distribution;
mod log_density;
mod multivariate;
mod univariate;

pub use class_distribution::ClassDistribution;
pub(crate) use log_density::LN_2PI;
pub use log_density::LogDensity;
pub use multivariate::MultivariateGaussian;
pub use univariate::UnivariateGaussian;
