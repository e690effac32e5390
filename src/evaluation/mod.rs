mod evaluators;
mod measurement;
mod report;

pub use evaluators::{ConfusionEvaluator, PerformanceEvaluator, PerformanceEvaluatorExt};
pub use measurement::Measurement;
pub use report::{EvaluationReport, ReportFormat, export_reports};
