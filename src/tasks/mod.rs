mod train_evaluate;

pub use train_evaluate::{TaskOutcome, TrainEvaluateTask};
