/// Streaming mean and variance of a scalar feature (Welford's update).
///
/// `variance` uses the sample convention (divides by `n - 1`) and is zero
/// until two observations have been seen.
#[derive(Clone, Debug, Default)]
pub struct GaussianEstimator {
    count: usize,
    mean: f64,
    variance_sum: f64,
}

impl GaussianEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_observation(&mut self, value: f64) {
        self.count += 1;
        let last_mean = self.mean;
        self.mean += (value - last_mean) / self.count as f64;
        self.variance_sum += (value - last_mean) * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        if self.count > 1 {
            self.variance_sum / (self.count as f64 - 1.0)
        } else {
            0.0
        }
    }

    pub fn population_variance(&self) -> f64 {
        if self.count > 0 {
            self.variance_sum / self.count as f64
        } else {
            0.0
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl FromIterator<f64> for GaussianEstimator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut estimator = GaussianEstimator::new();
        for value in iter {
            estimator.add_observation(value);
        }
        estimator
    }
}
