mod confusion_evaluator;
mod performance_evaluator;

pub use confusion_evaluator::ConfusionEvaluator;
pub use performance_evaluator::{PerformanceEvaluator, PerformanceEvaluatorExt};
