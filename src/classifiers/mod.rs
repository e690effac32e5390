pub mod bayes;
pub mod classifier;
mod label_map;

pub use bayes::GaussianNaiveBayes;
pub use classifier::Classifier;
pub use label_map::LabelMap;
