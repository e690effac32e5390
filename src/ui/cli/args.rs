use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueHint};
use serde_json::{Map, Value};

use crate::config::GnbConfig;
use crate::evaluation::ReportFormat;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Train and evaluate a gaussian naive Bayes classifier on flattened images"
)]
pub struct Cli {
    /// Log per-class parameter estimates
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Train on a table, then evaluate on the validation and test tables
    Run(RunArgs),
    /// Print the JSON schema of the model configuration
    Schema,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DumpFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl From<DumpFormat> for ReportFormat {
    fn from(value: DumpFormat) -> Self {
        match value {
            DumpFormat::Csv => ReportFormat::Csv,
            DumpFormat::Tsv => ReportFormat::Tsv,
            DumpFormat::Json => ReportFormat::Json,
        }
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Training table (whitespace-delimited, label in the last column)
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub train: PathBuf,

    /// Validation table
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub validation: Option<PathBuf>,

    /// Test table
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub test: Option<PathBuf>,

    /// Without --validation, hold out this fraction of the training table instead
    #[arg(long, value_name = "FRACTION", conflicts_with = "validation")]
    pub holdout: Option<f64>,

    /// Seed for the holdout shuffle
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub seed: u64,

    /// JSON file with model configuration
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override model configuration (key=value, value parsed as JSON when possible)
    #[arg(long = "model-param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub model_params: Vec<KeyValue>,

    /// Fit one scalar gaussian per class on pixel sums
    #[arg(long, conflicts_with = "multivariate")]
    pub univariate: bool,

    /// Fit a multivariate gaussian per class
    #[arg(long)]
    pub multivariate: bool,

    /// Feature extractor: 0 = pixel sum, 1 = row/column counts, 2 = raw pixels
    #[arg(long, value_name = "N")]
    pub feature_id: Option<usize>,

    /// Intensity above which a pixel is counted by the row/column extractor
    #[arg(long, value_name = "T")]
    pub threshold: Option<f64>,

    /// File to dump evaluation reports after completion
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub dump_file: Option<PathBuf>,

    /// Format for the dump file (csv, tsv, json)
    #[arg(long, value_name = "FORMAT")]
    pub dump_format: Option<String>,
}

#[derive(Clone, Debug)]
pub struct KeyValue {
    key: String,
    value: Value,
}

/// Fully resolved inputs of a `run` invocation.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub config: GnbConfig,
    pub train: PathBuf,
    pub validation: Option<PathBuf>,
    pub test: Option<PathBuf>,
    pub holdout: Option<f64>,
    pub seed: u64,
    pub dump_file: Option<PathBuf>,
    pub dump_format: DumpFormat,
}

impl RunArgs {
    pub fn into_plan(self) -> Result<RunPlan> {
        let config = self.resolve_config()?;

        let dump_format = match &self.dump_format {
            Some(fmt) => {
                parse_dump_format(fmt).with_context(|| format!("invalid dump format '{fmt}'"))?
            }
            None => DumpFormat::default(),
        };

        if let Some(fraction) = self.holdout
            && !(fraction > 0.0 && fraction < 1.0)
        {
            bail!("holdout fraction must lie in (0, 1), got {fraction}");
        }

        Ok(RunPlan {
            config,
            train: self.train,
            validation: self.validation,
            test: self.test,
            holdout: self.holdout,
            seed: self.seed,
            dump_file: self.dump_file,
            dump_format,
        })
    }

    /// Defaults, then the config file, then `--model-param`, then dedicated flags.
    fn resolve_config(&self) -> Result<GnbConfig> {
        let mut params = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str::<Value>(&text)
                    .with_context(|| format!("config {} is not valid JSON", path.display()))?
            }
            None => serde_json::to_value(GnbConfig::default())?,
        };

        apply_overrides(&mut params, &self.model_params)?;

        if self.univariate {
            set_path(&mut params, "univariate", Value::Bool(true))?;
        }
        if self.multivariate {
            set_path(&mut params, "univariate", Value::Bool(false))?;
        }
        if let Some(id) = self.feature_id {
            set_path(&mut params, "feature_id", Value::from(id))?;
        }
        if let Some(t) = self.threshold {
            set_path(&mut params, "threshold", Value::from(t))?;
        }

        let config: GnbConfig =
            serde_json::from_value(params).context("invalid model configuration")?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_dump_format(input: &str) -> Result<DumpFormat> {
    match input.trim().to_lowercase().as_str() {
        "csv" => Ok(DumpFormat::Csv),
        "tsv" => Ok(DumpFormat::Tsv),
        "json" => Ok(DumpFormat::Json),
        other => Err(anyhow!("unknown format '{other}'")),
    }
}

fn apply_overrides(target: &mut Value, overrides: &[KeyValue]) -> Result<()> {
    for kv in overrides {
        set_path(target, &kv.key, kv.value.clone())
            .with_context(|| format!("failed to set '{}'", kv.key))?;
    }
    Ok(())
}

fn set_path(target: &mut Value, path: &str, new_value: Value) -> Result<()> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        bail!("empty key is not allowed");
    };

    let mut current = target;
    for seg in parents {
        current = object_mut(current)?
            .entry((*seg).to_string())
            .or_insert(Value::Null);
    }

    object_mut(current)?.insert((*last).to_string(), new_value);
    Ok(())
}

fn object_mut(value: &mut Value) -> Result<&mut Map<String, Value>> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("cannot set nested field on non-object value: {other:?}"),
    }
}

fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected KEY=VALUE".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("key cannot be empty".to_string());
    }

    Ok(KeyValue {
        key: key.to_string(),
        value: parse_literal(value.trim()),
    })
}

fn parse_literal(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
