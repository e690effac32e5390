use crate::classifiers::Classifier;
use crate::error::GnbError;
use nalgebra::DMatrix;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

pub struct TrainSpyHandle(Arc<AtomicU64>);
impl TrainSpyHandle {
    pub fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counts `train` calls and then predicts like an oracle.
pub struct TrainSpyClassifier {
    count: Arc<AtomicU64>,
    trained: bool,
}

impl TrainSpyClassifier {
    pub fn new() -> (Self, TrainSpyHandle) {
        let counter = Arc::new(AtomicU64::new(0));
        (
            Self {
                count: counter.clone(),
                trained: false,
            },
            TrainSpyHandle(counter),
        )
    }
}

impl Classifier for TrainSpyClassifier {
    fn train(&mut self, _observations: &DMatrix<f64>, _labels: &[i64]) -> Result<(), GnbError> {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.trained = true;
        Ok(())
    }

    fn is_trained(&self) -> bool {
        self.trained
    }

    fn predict(&self, sample: &[f64]) -> Result<i64, GnbError> {
        sample
            .first()
            .map(|&v| v as i64)
            .ok_or(GnbError::shape("sample dimension", 1, 0))
    }
}
