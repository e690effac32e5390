use crate::error::GnbError;
use crate::features::FeatureVariant;
use nalgebra::{DMatrix, DVector};

pub const DEFAULT_IMAGE_SIDE: usize = 28;

/// Maps raw observation rows to feature rows for one [`FeatureVariant`].
///
/// Extraction is pure: the input is borrowed and never modified, and the same
/// input always gives the same output.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureExtractor {
    variant: FeatureVariant,
    threshold: f64,
    image_side: usize,
}

impl FeatureExtractor {
    pub fn new(variant: FeatureVariant) -> Self {
        Self {
            variant,
            threshold: 0.0,
            image_side: DEFAULT_IMAGE_SIDE,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_image_side(mut self, image_side: usize) -> Self {
        self.image_side = image_side;
        self
    }

    pub fn variant(&self) -> FeatureVariant {
        self.variant
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn image_side(&self) -> usize {
        self.image_side
    }

    /// Feature dimension produced for raw rows of length `raw_dimension`.
    pub fn output_dimension(&self, raw_dimension: usize) -> usize {
        match self.variant {
            FeatureVariant::SumUnivariate => 1,
            FeatureVariant::RowColCountMultivariate => 2 * self.image_side,
            FeatureVariant::IdentityMultivariate => raw_dimension,
        }
    }

    /// Extracts one feature row per observation row.
    ///
    /// `SumUnivariate` yields a single column.
    pub fn extract(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>, GnbError> {
        match self.variant {
            FeatureVariant::SumUnivariate => Ok(Self::row_sums(x)),
            FeatureVariant::RowColCountMultivariate => self.row_col_counts(x),
            FeatureVariant::IdentityMultivariate => Ok(x.clone()),
        }
    }

    /// Extracts the features of a single raw sample.
    pub fn extract_sample(&self, sample: &[f64]) -> Result<DVector<f64>, GnbError> {
        let x = DMatrix::from_row_slice(1, sample.len(), sample);
        let features = self.extract(&x)?;
        Ok(features.row(0).transpose())
    }

    fn row_sums(x: &DMatrix<f64>) -> DMatrix<f64> {
        DMatrix::from_iterator(x.nrows(), 1, x.row_iter().map(|r| r.sum()))
    }

    fn row_col_counts(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>, GnbError> {
        let side = self.image_side;
        let pixels = side * side;
        if x.ncols() != pixels {
            return Err(GnbError::shape("image pixels", pixels, x.ncols()));
        }

        let mut out = DMatrix::zeros(x.nrows(), 2 * side);
        for (i, sample) in x.row_iter().enumerate() {
            for r in 0..side {
                for c in 0..side {
                    if sample[r * side + c] > self.threshold {
                        out[(i, r)] += 1.0;
                        out[(i, side + c)] += 1.0;
                    }
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit_like(n: usize) -> DMatrix<f64> {
        DMatrix::from_fn(n, 784, |i, j| ((i * 31 + j * 7) % 5) as f64 * 40.0)
    }

    #[test]
    fn output_dimension_matches_extracted_columns() {
        let x = DMatrix::from_element(3, 16, 1.0);
        for variant in [
            FeatureVariant::SumUnivariate,
            FeatureVariant::RowColCountMultivariate,
            FeatureVariant::IdentityMultivariate,
        ] {
            let extractor = FeatureExtractor::new(variant).with_image_side(4);
            let features = extractor.extract(&x).unwrap();
            assert_eq!(extractor.output_dimension(16), features.ncols());
        }
    }

    #[test]
    fn sum_gives_one_column() {
        let x = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 10.0, 0.0, -1.0]);
        let f = FeatureExtractor::new(FeatureVariant::SumUnivariate)
            .extract(&x)
            .unwrap();
        assert_eq!(f.shape(), (2, 1));
        assert_eq!(f[(0, 0)], 6.0);
        assert_eq!(f[(1, 0)], 9.0);
    }

    #[test]
    fn row_col_counts_on_small_image() {
        // 3x3 image:
        // 0 5 0
        // 0 5 0
        // 9 9 9
        let x = DMatrix::from_row_slice(1, 9, &[0.0, 5.0, 0.0, 0.0, 5.0, 0.0, 9.0, 9.0, 9.0]);
        let ex = FeatureExtractor::new(FeatureVariant::RowColCountMultivariate).with_image_side(3);
        let f = ex.extract(&x).unwrap();
        assert_eq!(f.shape(), (1, 6));
        let got: Vec<f64> = f.row(0).iter().copied().collect();
        assert_eq!(got, vec![1.0, 1.0, 3.0, 1.0, 3.0, 1.0]);

        let strict = ex.with_threshold(5.0).extract(&x).unwrap();
        let got: Vec<f64> = strict.row(0).iter().copied().collect();
        assert_eq!(got, vec![0.0, 0.0, 3.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn row_col_counts_on_full_images() {
        let x = digit_like(4);
        let f = FeatureExtractor::new(FeatureVariant::RowColCountMultivariate)
            .extract(&x)
            .unwrap();
        assert_eq!(f.shape(), (4, 56));
        for row in f.row_iter() {
            let by_rows: f64 = row.columns(0, 28).sum();
            let by_cols: f64 = row.columns(28, 28).sum();
            assert_eq!(by_rows, by_cols);
        }
    }

    #[test]
    fn row_col_counts_rejects_non_square_rows() {
        let x = DMatrix::zeros(2, 10);
        let err = FeatureExtractor::new(FeatureVariant::RowColCountMultivariate)
            .extract(&x)
            .unwrap_err();
        assert_eq!(err, GnbError::shape("image pixels", 784, 10));
    }

    #[test]
    fn identity_is_unchanged() {
        let x = digit_like(3);
        let f = FeatureExtractor::new(FeatureVariant::IdentityMultivariate)
            .extract(&x)
            .unwrap();
        assert_eq!(f, x);
    }

    #[test]
    fn extraction_is_pure() {
        let x = digit_like(5);
        let before = x.clone();
        for variant in [
            FeatureVariant::SumUnivariate,
            FeatureVariant::RowColCountMultivariate,
            FeatureVariant::IdentityMultivariate,
        ] {
            let ex = FeatureExtractor::new(variant);
            assert_eq!(ex.extract(&x).unwrap(), ex.extract(&x).unwrap());
            assert_eq!(x, before);
        }
    }

    #[test]
    fn single_sample_matches_batch_row() {
        let x = digit_like(2);
        let ex = FeatureExtractor::new(FeatureVariant::RowColCountMultivariate);
        let batch = ex.extract(&x).unwrap();
        let sample: Vec<f64> = x.row(1).iter().copied().collect();
        let single = ex.extract_sample(&sample).unwrap();
        assert_eq!(single, batch.row(1).transpose());
    }
}
