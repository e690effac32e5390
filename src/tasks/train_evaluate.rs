use crate::classifiers::Classifier;
use crate::core::Dataset;
use crate::error::GnbError;
use crate::evaluation::{ConfusionEvaluator, EvaluationReport, PerformanceEvaluator};
use cpu_time::ThreadTime;
use tracing::info;

/// Result of a [`TrainEvaluateTask`] run.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub train_samples: usize,
    /// CPU seconds spent in `train`.
    pub train_seconds: f64,
    pub reports: Vec<EvaluationReport>,
}

/// Trains a learner once, then scores it on each named split in order.
pub struct TrainEvaluateTask {
    learner: Box<dyn Classifier>,
    train: Dataset,
    splits: Vec<(String, Dataset)>,
}

impl TrainEvaluateTask {
    pub fn new(learner: Box<dyn Classifier>, train: Dataset) -> Self {
        Self {
            learner,
            train,
            splits: Vec::new(),
        }
    }

    pub fn with_split<S: Into<String>>(mut self, name: S, data: Dataset) -> Self {
        self.splits.push((name.into(), data));
        self
    }

    pub fn learner(&self) -> &dyn Classifier {
        self.learner.as_ref()
    }

    pub fn run(&mut self) -> Result<TaskOutcome, GnbError> {
        let start = ThreadTime::now();
        self.learner
            .train(self.train.observations(), self.train.labels())?;
        let train_seconds = start.elapsed().as_secs_f64();
        info!(
            samples = self.train.len(),
            seconds = train_seconds,
            "training finished"
        );

        let mut reports = Vec::with_capacity(self.splits.len());
        for (name, data) in &self.splits {
            if data.is_empty() {
                return Err(GnbError::InsufficientData(format!(
                    "{name} split has no samples"
                )));
            }
            if data.dimension() != self.train.dimension() {
                return Err(GnbError::shape(
                    "split dimension",
                    self.train.dimension(),
                    data.dimension(),
                ));
            }

            let start = ThreadTime::now();
            let predictions = self.learner.predict_batch(data.observations())?;
            let mut evaluator = ConfusionEvaluator::new();
            for (&truth, predicted) in data.labels().iter().zip(predictions) {
                evaluator.add_result(truth, predicted);
            }
            let seconds = start.elapsed().as_secs_f64();
            let report = EvaluationReport::from_evaluator(name.as_str(), &evaluator, seconds);

            info!(
                split = %name,
                samples = report.samples,
                accuracy = report.accuracy,
                "classification accuracy is {:.3}",
                report.accuracy
            );
            reports.push(report);
        }

        Ok(TaskOutcome {
            train_samples: self.train.len(),
            train_seconds,
            reports,
        })
    }
}
