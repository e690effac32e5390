use crate::error::GnbError;
use nalgebra::DMatrix;

/// A batch-trained classifier over fixed-length numeric rows.
pub trait Classifier {
    /// Fits the model on `observations` (one row per sample) and `labels`,
    /// replacing whatever was learned before.
    fn train(&mut self, observations: &DMatrix<f64>, labels: &[i64]) -> Result<(), GnbError>;

    fn is_trained(&self) -> bool;

    /// Predicts the label of a single raw sample.
    fn predict(&self, sample: &[f64]) -> Result<i64, GnbError>;

    fn predict_batch(&self, observations: &DMatrix<f64>) -> Result<Vec<i64>, GnbError> {
        if !self.is_trained() {
            return Err(GnbError::NotTrained);
        }
        observations
            .row_iter()
            .map(|row| {
                let sample: Vec<f64> = row.iter().copied().collect();
                self.predict(&sample)
            })
            .collect()
    }

    /// Fraction of rows whose prediction equals the given label.
    fn evaluate(&self, observations: &DMatrix<f64>, labels: &[i64]) -> Result<f64, GnbError> {
        if !self.is_trained() {
            return Err(GnbError::NotTrained);
        }
        if observations.nrows() != labels.len() {
            return Err(GnbError::shape(
                "label count",
                observations.nrows(),
                labels.len(),
            ));
        }
        if labels.is_empty() {
            return Err(GnbError::InsufficientData(
                "cannot evaluate on an empty set".to_string(),
            ));
        }

        let predictions = self.predict_batch(observations)?;
        let correct = predictions
            .iter()
            .zip(labels)
            .filter(|(predicted, truth)| predicted == truth)
            .count();
        Ok(correct as f64 / labels.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ConstantClassifier, OracleClassifier};

    fn rows(values: &[f64]) -> DMatrix<f64> {
        DMatrix::from_column_slice(values.len(), 1, values)
    }

    #[test]
    fn untrained_evaluate_is_rejected() {
        let c = ConstantClassifier::untrained();
        assert_eq!(
            c.evaluate(&rows(&[1.0]), &[1]).unwrap_err(),
            GnbError::NotTrained
        );
        assert_eq!(
            c.predict_batch(&rows(&[1.0])).unwrap_err(),
            GnbError::NotTrained
        );
    }

    #[test]
    fn all_correct_is_exactly_one() {
        let c = OracleClassifier::default();
        let acc = c.evaluate(&rows(&[0.0, 3.0, 1.0]), &[0, 3, 1]).unwrap();
        assert_eq!(acc, 1.0);
    }

    #[test]
    fn all_wrong_is_exactly_zero() {
        let c = ConstantClassifier::new(9);
        let acc = c.evaluate(&rows(&[0.0, 3.0, 1.0]), &[0, 3, 1]).unwrap();
        assert_eq!(acc, 0.0);
    }

    #[test]
    fn partial_accuracy() {
        let c = ConstantClassifier::new(1);
        let acc = c.evaluate(&rows(&[0.0, 0.0, 0.0, 0.0]), &[1, 0, 1, 1]).unwrap();
        assert!((acc - 0.75).abs() < 1e-12);
    }

    #[test]
    fn evaluate_guards_shapes() {
        let c = ConstantClassifier::new(1);
        assert_eq!(
            c.evaluate(&rows(&[0.0, 0.0]), &[1]).unwrap_err(),
            GnbError::shape("label count", 2, 1)
        );
        assert!(matches!(
            c.evaluate(&DMatrix::zeros(0, 1), &[]),
            Err(GnbError::InsufficientData(_))
        ));
    }
}
