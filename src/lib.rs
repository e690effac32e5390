pub mod classifiers;
pub mod config;
pub mod core;
pub mod data;
pub mod distributions;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod tasks;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::GnbError;
