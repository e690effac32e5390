mod dataset;
pub mod estimators;

pub use dataset::Dataset;
