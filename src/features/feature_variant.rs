use crate::error::GnbError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// How raw pixel rows are turned into the features a class density is fitted on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FeatureVariant {
    /// Sum of all pixel intensities, one scalar per sample.
    SumUnivariate,
    /// Above-threshold pixel counts per image row, then per image column.
    RowColCountMultivariate,
    /// The raw pixel vector.
    IdentityMultivariate,
}

impl FeatureVariant {
    pub fn index(self) -> usize {
        match self {
            FeatureVariant::SumUnivariate => 0,
            FeatureVariant::RowColCountMultivariate => 1,
            FeatureVariant::IdentityMultivariate => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(FeatureVariant::SumUnivariate),
            1 => Some(FeatureVariant::RowColCountMultivariate),
            2 => Some(FeatureVariant::IdentityMultivariate),
            _ => None,
        }
    }

    pub fn is_univariate(self) -> bool {
        matches!(self, FeatureVariant::SumUnivariate)
    }

    /// Resolves a numeric selector the way the `--feature-id` flag is read:
    /// univariate models are forced to index 0, multivariate models never go
    /// below index 1.
    pub fn resolve(univariate: bool, index: usize) -> Result<Self, GnbError> {
        let index = if univariate { 0 } else { index.max(1) };
        Self::from_index(index).ok_or_else(|| {
            GnbError::Configuration(format!("unknown feature extractor index {index}"))
        })
    }

    /// Rejects pairings of model family and variant that cannot be fitted.
    pub fn check_compatible(self, univariate: bool) -> Result<(), GnbError> {
        if self.is_univariate() == univariate {
            return Ok(());
        }
        let family = if univariate {
            "univariate"
        } else {
            "multivariate"
        };
        Err(GnbError::Configuration(format!(
            "feature variant '{self}' cannot be used with a {family} model"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn index_round_trips() {
        for v in FeatureVariant::iter() {
            assert_eq!(FeatureVariant::from_index(v.index()), Some(v));
        }
        assert_eq!(FeatureVariant::from_index(3), None);
    }

    #[test]
    fn parses_kebab_case() {
        assert_eq!(
            FeatureVariant::from_str("row-col-count-multivariate").unwrap(),
            FeatureVariant::RowColCountMultivariate
        );
        assert_eq!(FeatureVariant::SumUnivariate.to_string(), "sum-univariate");
    }

    #[test]
    fn resolve_clamps_like_the_feature_id_flag() {
        assert_eq!(
            FeatureVariant::resolve(true, 2).unwrap(),
            FeatureVariant::SumUnivariate
        );
        assert_eq!(
            FeatureVariant::resolve(false, 0).unwrap(),
            FeatureVariant::RowColCountMultivariate
        );
        assert_eq!(
            FeatureVariant::resolve(false, 2).unwrap(),
            FeatureVariant::IdentityMultivariate
        );
        assert!(matches!(
            FeatureVariant::resolve(false, 9),
            Err(GnbError::Configuration(_))
        ));
    }

    #[test]
    fn compatibility() {
        assert!(FeatureVariant::SumUnivariate.check_compatible(true).is_ok());
        assert!(
            FeatureVariant::IdentityMultivariate
                .check_compatible(false)
                .is_ok()
        );
        assert!(matches!(
            FeatureVariant::RowColCountMultivariate.check_compatible(true),
            Err(GnbError::Configuration(_))
        ));
        assert!(matches!(
            FeatureVariant::SumUnivariate.check_compatible(false),
            Err(GnbError::Configuration(_))
        ));
    }
}
