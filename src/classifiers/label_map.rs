use crate::error::GnbError;

/// Sorted distinct label values; a label's position is its dense class index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<i64>,
}

impl LabelMap {
    /// Collects the distinct values of `labels`, ascending.
    pub fn from_observed(labels: &[i64]) -> Self {
        let mut distinct = labels.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        Self { labels: distinct }
    }

    /// The fixed label set `0..num_classes`; every observed label must fall
    /// inside it.
    pub fn from_expected(num_classes: usize, labels: &[i64]) -> Result<Self, GnbError> {
        if let Some(&bad) = labels
            .iter()
            .find(|&&l| l < 0 || l as u64 >= num_classes as u64)
        {
            return Err(GnbError::InvalidLabel {
                label: bad,
                reason: format!("expected a class index in 0..{num_classes}"),
            });
        }
        Ok(Self {
            labels: (0..num_classes as i64).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn index_of(&self, label: i64) -> Option<usize> {
        self.labels.binary_search(&label).ok()
    }

    pub fn label_at(&self, index: usize) -> Option<i64> {
        self.labels.get(index).copied()
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }
}
