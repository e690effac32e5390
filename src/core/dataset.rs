use crate::error::GnbError;
use nalgebra::DMatrix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Labeled observations: one row per sample, one integer label per row.
///
/// The row count always equals the label count and every row has the same
/// dimension; both are checked on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: DMatrix<f64>,
    labels: Vec<i64>,
}

impl Dataset {
    pub fn new(observations: DMatrix<f64>, labels: Vec<i64>) -> Result<Self, GnbError> {
        if observations.nrows() != labels.len() {
            return Err(GnbError::shape(
                "label count",
                observations.nrows(),
                labels.len(),
            ));
        }
        Ok(Self {
            observations,
            labels,
        })
    }

    pub fn from_rows(rows: &[Vec<f64>], labels: Vec<i64>) -> Result<Self, GnbError> {
        let dimension = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != dimension) {
            return Err(GnbError::shape("row length", dimension, bad.len()));
        }

        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::new(
            DMatrix::from_row_slice(rows.len(), dimension, &data),
            labels,
        )
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.observations.ncols()
    }

    pub fn observations(&self) -> &DMatrix<f64> {
        &self.observations
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    /// Shuffles rows with a seeded generator and holds out `fraction` of them.
    ///
    /// Returns `(kept, held_out)`. Both halves are non-empty.
    pub fn split(&self, fraction: f64, seed: u64) -> Result<(Dataset, Dataset), GnbError> {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(GnbError::Configuration(format!(
                "holdout fraction must lie in (0, 1), got {fraction}"
            )));
        }
        if self.len() < 2 {
            return Err(GnbError::InsufficientData(format!(
                "cannot split {} sample(s) into two non-empty parts",
                self.len()
            )));
        }

        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));

        let held = ((self.len() as f64) * fraction).round() as usize;
        let held = held.clamp(1, self.len() - 1);
        let (held_idx, kept_idx) = order.split_at(held);

        Ok((self.select(kept_idx), self.select(held_idx)))
    }

    fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            observations: self.observations.select_rows(indices.iter()),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, (i * 2) as f64]).collect();
        let labels = (0..10).map(|i| i % 2).collect();
        Dataset::from_rows(&rows, labels).unwrap()
    }

    #[test]
    fn from_rows_keeps_row_major_order() {
        let ds = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]], vec![0, 1]).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dimension(), 2);
        assert_eq!(ds.observations()[(0, 1)], 2.0);
        assert_eq!(ds.observations()[(1, 0)], 3.0);
        assert_eq!(ds.labels(), &[0, 1]);
    }

    #[test]
    fn rejects_label_count_mismatch() {
        let err = Dataset::from_rows(&[vec![1.0], vec![2.0]], vec![0]).unwrap_err();
        assert_eq!(
            err,
            GnbError::ShapeMismatch {
                what: "label count",
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0]], vec![0, 1]).unwrap_err();
        assert!(matches!(err, GnbError::ShapeMismatch { what: "row length", .. }));
    }

    #[test]
    fn split_partitions_every_row_once() {
        let ds = sample();
        let (kept, held) = ds.split(0.3, 7).unwrap();
        assert_eq!(held.len(), 3);
        assert_eq!(kept.len(), 7);

        let mut firsts: Vec<f64> = kept
            .observations()
            .column(0)
            .iter()
            .chain(held.observations().column(0).iter())
            .copied()
            .collect();
        firsts.sort_by(f64::total_cmp);
        assert_eq!(firsts, (0..10).map(|i| i as f64).collect::<Vec<_>>());

        for (row, &label) in kept.observations().row_iter().zip(kept.labels()) {
            assert_eq!(row[0] as i64 % 2, label);
        }
    }

    #[test]
    fn split_is_deterministic_for_a_seed() {
        let ds = sample();
        assert_eq!(ds.split(0.5, 42).unwrap(), ds.split(0.5, 42).unwrap());
    }

    #[test]
    fn split_guards() {
        let ds = sample();
        assert!(matches!(ds.split(0.0, 1), Err(GnbError::Configuration(_))));
        assert!(matches!(ds.split(1.0, 1), Err(GnbError::Configuration(_))));

        let one = Dataset::from_rows(&[vec![1.0]], vec![0]).unwrap();
        assert!(matches!(one.split(0.5, 1), Err(GnbError::InsufficientData(_))));
    }
}
