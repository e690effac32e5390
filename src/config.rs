use crate::core::estimators::{DEFAULT_COVARIANCE_EPSILON, DEFAULT_VARIANCE_FLOOR};
use crate::error::GnbError;
use crate::features::{DEFAULT_IMAGE_SIDE, FeatureVariant};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

/// Construction parameters of a [`GaussianNaiveBayes`](crate::classifiers::GaussianNaiveBayes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct GnbConfig {
    #[schemars(
        title = "Univariate",
        description = "Fit one scalar gaussian per class instead of a multivariate one"
    )]
    pub univariate: bool,

    #[schemars(
        title = "Feature variant",
        description = "Explicit feature extractor; takes precedence over feature_id"
    )]
    pub feature_variant: Option<FeatureVariant>,

    #[schemars(
        title = "Feature id",
        description = "0 = pixel sum, 1 = row/column counts, 2 = raw pixels",
        range(max = 2)
    )]
    pub feature_id: usize,

    #[schemars(
        title = "Threshold",
        description = "Pixels strictly above this intensity are counted by the row/column extractor"
    )]
    pub threshold: f64,

    #[schemars(
        title = "Image side",
        description = "Images are square with this many pixels per side",
        range(min = 1)
    )]
    pub image_side: usize,

    #[schemars(
        title = "Covariance epsilon",
        description = "Added to every covariance diagonal entry"
    )]
    pub covariance_epsilon: f64,

    #[schemars(
        title = "Variance floor",
        description = "Lower bound on univariate class variance (0 rejects zero variance)"
    )]
    pub variance_floor: f64,

    #[schemars(
        title = "Expected classes",
        description = "If set, labels must be 0..N and every class must have samples"
    )]
    pub expected_classes: Option<usize>,
}

impl Default for GnbConfig {
    fn default() -> Self {
        Self {
            univariate: true,
            feature_variant: None,
            feature_id: 0,
            threshold: 0.0,
            image_side: DEFAULT_IMAGE_SIDE,
            covariance_epsilon: DEFAULT_COVARIANCE_EPSILON,
            variance_floor: DEFAULT_VARIANCE_FLOOR,
            expected_classes: None,
        }
    }
}

impl GnbConfig {
    pub fn schema() -> Schema {
        schema_for!(GnbConfig)
    }

    /// Checks every field and returns the feature variant the classifier will use.
    pub fn validate(&self) -> Result<FeatureVariant, GnbError> {
        if !(self.covariance_epsilon.is_finite() && self.covariance_epsilon > 0.0) {
            return Err(GnbError::Configuration(format!(
                "covariance_epsilon must be positive, got {}",
                self.covariance_epsilon
            )));
        }
        if !(self.variance_floor.is_finite() && self.variance_floor >= 0.0) {
            return Err(GnbError::Configuration(format!(
                "variance_floor must be non-negative, got {}",
                self.variance_floor
            )));
        }
        if !self.threshold.is_finite() {
            return Err(GnbError::Configuration(
                "threshold must be finite".to_string(),
            ));
        }
        if self.image_side == 0 {
            return Err(GnbError::Configuration(
                "image_side must be at least 1".to_string(),
            ));
        }
        if self.expected_classes == Some(0) {
            return Err(GnbError::Configuration(
                "expected_classes must be at least 1".to_string(),
            ));
        }
        if self.feature_id > 2 {
            return Err(GnbError::Configuration(format!(
                "unknown feature extractor index {}",
                self.feature_id
            )));
        }

        match self.feature_variant {
            Some(variant) => {
                variant.check_compatible(self.univariate)?;
                Ok(variant)
            }
            None => FeatureVariant::resolve(self.univariate, self.feature_id),
        }
    }
}
