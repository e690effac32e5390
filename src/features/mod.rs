mod extractor;
mod feature_variant;

pub use extractor::{DEFAULT_IMAGE_SIDE, FeatureExtractor};
pub use feature_variant::FeatureVariant;
