use std::fmt::{Display, Formatter, Result as FmtResult};

/// A named scalar metric, e.g. `"accuracy"` or `"kappa"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.value.is_nan() {
            write!(f, "{}=NaN", self.name)
        } else {
            write!(f, "{}={:.6}", self.name, self.value)
        }
    }
}
