mod naive_bayes;

pub use naive_bayes::GaussianNaiveBayes;
