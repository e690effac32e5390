use crate::classifiers::Classifier;
use crate::classifiers::LabelMap;
use crate::config::GnbConfig;
use crate::core::estimators::ParameterEstimator;
use crate::distributions::{ClassDistribution, LogDensity};
use crate::error::GnbError;
use crate::features::{FeatureExtractor, FeatureVariant};
use nalgebra::DMatrix;
use tracing::{debug, info};

/// Everything learned by one call to `train`.
#[derive(Debug, Clone)]
struct TrainedModel {
    classes: LabelMap,
    priors: Vec<f64>,
    log_priors: Vec<f64>,
    distributions: Vec<ClassDistribution>,
    raw_dimension: usize,
}

/// Gaussian naive Bayes over features extracted from flattened images.
///
/// Each class gets an empirical prior and a gaussian density fitted on its
/// extracted features. Prediction picks the class maximizing
/// `log_density + ln(prior)`; on equal scores the smallest label wins.
///
/// Labels are arbitrary integers. Unless an expected class count is set,
/// the classes are exactly the distinct labels seen at training time, in
/// ascending order.
#[derive(Debug, Clone)]
pub struct GaussianNaiveBayes {
    extractor: FeatureExtractor,
    estimator: ParameterEstimator,
    expected_classes: Option<usize>,
    model: Option<TrainedModel>,
}

impl GaussianNaiveBayes {
    /// Fails with [`GnbError::Configuration`] when `variant` does not belong
    /// to the requested model family.
    pub fn new(univariate: bool, variant: FeatureVariant) -> Result<Self, GnbError> {
        variant.check_compatible(univariate)?;
        Ok(Self {
            extractor: FeatureExtractor::new(variant),
            estimator: ParameterEstimator::new(univariate),
            expected_classes: None,
            model: None,
        })
    }

    pub fn from_config(config: &GnbConfig) -> Result<Self, GnbError> {
        let variant = config.validate()?;
        Ok(Self {
            extractor: FeatureExtractor::new(variant)
                .with_threshold(config.threshold)
                .with_image_side(config.image_side),
            estimator: ParameterEstimator::new(config.univariate)
                .with_covariance_epsilon(config.covariance_epsilon)
                .with_variance_floor(config.variance_floor),
            expected_classes: config.expected_classes,
            model: None,
        })
    }

    /// Requires labels to be exactly `0..num_classes`, each with samples.
    pub fn with_expected_classes(mut self, num_classes: usize) -> Self {
        self.expected_classes = Some(num_classes);
        self
    }

    pub fn is_univariate(&self) -> bool {
        self.estimator.is_univariate()
    }

    pub fn feature_variant(&self) -> FeatureVariant {
        self.extractor.variant()
    }

    pub fn num_classes(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.classes.len())
    }

    /// Class labels in index order. Empty until trained.
    pub fn classes(&self) -> &[i64] {
        self.model
            .as_ref()
            .map(|m| m.classes.labels())
            .unwrap_or_default()
    }

    pub fn priors(&self) -> &[f64] {
        self.model
            .as_ref()
            .map(|m| m.priors.as_slice())
            .unwrap_or_default()
    }

    pub fn distributions(&self) -> &[ClassDistribution] {
        self.model
            .as_ref()
            .map(|m| m.distributions.as_slice())
            .unwrap_or_default()
    }

    /// Raw sample length expected by `predict`, once trained.
    pub fn feature_dimension(&self) -> Option<usize> {
        self.model.as_ref().map(|m| m.raw_dimension)
    }

    /// Unnormalized log posterior of every class, in class index order.
    pub fn log_scores(&self, sample: &[f64]) -> Result<Vec<f64>, GnbError> {
        let model = self.model.as_ref().ok_or(GnbError::NotTrained)?;
        if sample.len() != model.raw_dimension {
            return Err(GnbError::shape(
                "sample dimension",
                model.raw_dimension,
                sample.len(),
            ));
        }
        if let Some(index) = sample.iter().position(|v| !v.is_finite()) {
            return Err(GnbError::NonFinite {
                what: "sample",
                index,
            });
        }

        let features = self.extractor.extract_sample(sample)?;
        model
            .distributions
            .iter()
            .zip(&model.log_priors)
            .map(|(dist, log_prior)| Ok(dist.log_density(&features)? + log_prior))
            .collect()
    }

    /// Dense index of the predicted class.
    pub fn predict_index(&self, sample: &[f64]) -> Result<usize, GnbError> {
        let scores = self.log_scores(sample)?;
        Ok(argmax(&scores))
    }

    fn resolve_classes(&self, labels: &[i64]) -> Result<LabelMap, GnbError> {
        match self.expected_classes {
            Some(k) => LabelMap::from_expected(k, labels),
            None => Ok(LabelMap::from_observed(labels)),
        }
    }

    fn fit(&self, observations: &DMatrix<f64>, labels: &[i64]) -> Result<TrainedModel, GnbError> {
        if observations.nrows() != labels.len() {
            return Err(GnbError::shape(
                "label count",
                observations.nrows(),
                labels.len(),
            ));
        }
        if labels.is_empty() {
            return Err(GnbError::InsufficientData(
                "training set is empty".to_string(),
            ));
        }

        if let Some(index) = observations
            .row_iter()
            .position(|row| row.iter().any(|v| !v.is_finite()))
        {
            return Err(GnbError::NonFinite {
                what: "training row",
                index,
            });
        }

        let classes = self.resolve_classes(labels)?;
        let features = self.extractor.extract(observations)?;
        let n = labels.len() as f64;

        info!(
            samples = labels.len(),
            classes = classes.len(),
            raw_dimension = observations.ncols(),
            feature_dimension = self.extractor.output_dimension(observations.ncols()),
            variant = %self.extractor.variant(),
            "training gaussian naive bayes"
        );

        let mut priors = Vec::with_capacity(classes.len());
        let mut distributions = Vec::with_capacity(classes.len());
        for &label in classes.labels() {
            let rows: Vec<usize> = labels
                .iter()
                .enumerate()
                .filter(|&(_, &l)| l == label)
                .map(|(i, _)| i)
                .collect();

            let prior = rows.len() as f64 / n;
            debug!(label, prior, samples = rows.len(), "class prior");

            let class_features = features.select_rows(rows.iter());
            distributions.push(self.estimator.fit(&class_features, label)?);
            priors.push(prior);
        }

        Ok(TrainedModel {
            classes,
            log_priors: priors.iter().map(|p| p.ln()).collect(),
            priors,
            distributions,
            raw_dimension: observations.ncols(),
        })
    }
}

impl Classifier for GaussianNaiveBayes {
    /// The previous model is kept if fitting fails.
    fn train(&mut self, observations: &DMatrix<f64>, labels: &[i64]) -> Result<(), GnbError> {
        let model = self.fit(observations, labels)?;
        self.model = Some(model);
        Ok(())
    }

    fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    fn predict(&self, sample: &[f64]) -> Result<i64, GnbError> {
        let index = self.predict_index(sample)?;
        self.model
            .as_ref()
            .and_then(|m| m.classes.label_at(index))
            .ok_or(GnbError::NotTrained)
    }
}

/// First index holding the largest value.
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (i, &s) in scores.iter().enumerate() {
        if s > best_score {
            best = i;
            best_score = s;
        }
    }
    best
}
