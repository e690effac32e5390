use crate::evaluation::{Measurement, PerformanceEvaluator};
use std::collections::BTreeMap;

/// Batch classification evaluator backed by a confusion table.
///
/// Reports:
/// - `accuracy`: fraction of exact matches;
/// - `kappa`: Cohen's κ from the true and predicted label marginals;
/// - `precision` / `recall`: macro averages over the labels that were
///   predicted / that occur in the truth, respectively;
/// - `f1`: harmonic mean of the macro precision and recall.
///
/// Every metric is NaN until a result has been added.
#[derive(Debug, Clone, Default)]
pub struct ConfusionEvaluator {
    counts: BTreeMap<(i64, i64), u64>,
    truth_totals: BTreeMap<i64, u64>,
    predicted_totals: BTreeMap<i64, u64>,
    correct: u64,
    total: u64,
}

impl ConfusionEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn correct(&self) -> u64 {
        self.correct
    }

    /// How often `truth` was predicted as `predicted`.
    pub fn count(&self, truth: i64, predicted: i64) -> u64 {
        self.counts.get(&(truth, predicted)).copied().unwrap_or(0)
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return f64::NAN;
        }
        self.correct as f64 / self.total as f64
    }

    pub fn kappa(&self) -> f64 {
        if self.total == 0 {
            return f64::NAN;
        }
        let n = self.total as f64;
        let chance: f64 = self
            .truth_totals
            .iter()
            .map(|(label, &t)| {
                let p = self.predicted_totals.get(label).copied().unwrap_or(0);
                (t as f64 / n) * (p as f64 / n)
            })
            .sum();
        if chance >= 1.0 {
            return f64::NAN;
        }
        (self.accuracy() - chance) / (1.0 - chance)
    }

    pub fn macro_precision(&self) -> f64 {
        Self::macro_average(&self.predicted_totals, |label| self.count(label, label))
    }

    pub fn macro_recall(&self) -> f64 {
        Self::macro_average(&self.truth_totals, |label| self.count(label, label))
    }

    pub fn f1(&self) -> f64 {
        let p = self.macro_precision();
        let r = self.macro_recall();
        if p + r > 0.0 {
            2.0 * p * r / (p + r)
        } else if p.is_nan() || r.is_nan() {
            f64::NAN
        } else {
            0.0
        }
    }

    fn macro_average<F>(totals: &BTreeMap<i64, u64>, hits: F) -> f64
    where
        F: Fn(i64) -> u64,
    {
        if totals.is_empty() {
            return f64::NAN;
        }
        let sum: f64 = totals
            .iter()
            .map(|(&label, &t)| hits(label) as f64 / t as f64)
            .sum();
        sum / totals.len() as f64
    }
}

impl PerformanceEvaluator for ConfusionEvaluator {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn add_result(&mut self, truth: i64, predicted: i64) {
        *self.counts.entry((truth, predicted)).or_insert(0) += 1;
        *self.truth_totals.entry(truth).or_insert(0) += 1;
        *self.predicted_totals.entry(predicted).or_insert(0) += 1;
        if truth == predicted {
            self.correct += 1;
        }
        self.total += 1;
    }

    fn performance(&self) -> Vec<Measurement> {
        vec![
            Measurement::new("accuracy", self.accuracy()),
            Measurement::new("kappa", self.kappa()),
            Measurement::new("precision", self.macro_precision()),
            Measurement::new("recall", self.macro_recall()),
            Measurement::new("f1", self.f1()),
        ]
    }
}
