use crate::classifiers::Classifier;
use crate::error::GnbError;
use nalgebra::DMatrix;

/// Reads the label straight out of the first value of each sample.
#[derive(Default)]
pub struct OracleClassifier;

impl Classifier for OracleClassifier {
    fn train(&mut self, _observations: &DMatrix<f64>, _labels: &[i64]) -> Result<(), GnbError> {
        Ok(())
    }

    fn is_trained(&self) -> bool {
        true
    }

    fn predict(&self, sample: &[f64]) -> Result<i64, GnbError> {
        sample
            .first()
            .map(|&v| v as i64)
            .ok_or(GnbError::shape("sample dimension", 1, 0))
    }
}
