use crate::classifiers::Classifier;
use crate::error::GnbError;
use nalgebra::DMatrix;

/// Always answers the same label; `untrained()` answers nothing.
pub struct ConstantClassifier {
    label: Option<i64>,
}

impl ConstantClassifier {
    pub fn new(label: i64) -> Self {
        Self { label: Some(label) }
    }

    pub fn untrained() -> Self {
        Self { label: None }
    }
}

impl Classifier for ConstantClassifier {
    fn train(&mut self, _observations: &DMatrix<f64>, labels: &[i64]) -> Result<(), GnbError> {
        self.label = labels.first().copied();
        Ok(())
    }

    fn is_trained(&self) -> bool {
        self.label.is_some()
    }

    fn predict(&self, _sample: &[f64]) -> Result<i64, GnbError> {
        self.label.ok_or(GnbError::NotTrained)
    }
}
