use crate::evaluation::ConfusionEvaluator;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Tsv,
    Json,
}

/// Metrics of one evaluated split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub split: String,
    pub samples: u64,
    pub correct: u64,
    pub accuracy: f64,
    pub kappa: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// CPU seconds spent predicting the split.
    pub seconds: f64,
}

impl EvaluationReport {
    pub fn from_evaluator<S: Into<String>>(
        split: S,
        evaluator: &ConfusionEvaluator,
        seconds: f64,
    ) -> Self {
        Self {
            split: split.into(),
            samples: evaluator.total(),
            correct: evaluator.correct(),
            accuracy: evaluator.accuracy(),
            kappa: evaluator.kappa(),
            precision: evaluator.macro_precision(),
            recall: evaluator.macro_recall(),
            f1: evaluator.f1(),
            seconds,
        }
    }

    #[inline]
    fn fmtv(v: f64) -> String {
        if v.is_nan() {
            "NaN".into()
        } else {
            format!("{:.6}", v)
        }
    }
}

impl Display for EvaluationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "split={}, samples={}, correct={}, acc={}, kappa={}, precision={}, recall={}, f1={}, t={:.6}s",
            self.split,
            self.samples,
            self.correct,
            Self::fmtv(self.accuracy),
            Self::fmtv(self.kappa),
            Self::fmtv(self.precision),
            Self::fmtv(self.recall),
            Self::fmtv(self.f1),
            self.seconds
        )
    }
}

/// Writes `reports` to `path`, one row (or JSON object) per split.
pub fn export_reports<P: AsRef<Path>>(
    path: P,
    reports: &[EvaluationReport],
    fmt: ReportFormat,
) -> Result<(), Error> {
    let mut w = BufWriter::new(File::create(path)?);
    match fmt {
        ReportFormat::Csv => write_delimited(&mut w, reports, ',')?,
        ReportFormat::Tsv => write_delimited(&mut w, reports, '\t')?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut w, reports)?;
            writeln!(w)?;
        }
    }
    w.flush()
}

fn write_delimited<W: Write>(
    w: &mut W,
    reports: &[EvaluationReport],
    delimiter: char,
) -> Result<(), Error> {
    writeln!(
        w,
        "split{d}samples{d}correct{d}accuracy{d}kappa{d}precision{d}recall{d}f1{d}seconds",
        d = delimiter
    )?;
    for r in reports {
        writeln!(
            w,
            "{}{d}{}{d}{}{d}{:.12}{d}{:.12}{d}{:.12}{d}{:.12}{d}{:.12}{d}{:.6}",
            r.split,
            r.samples,
            r.correct,
            r.accuracy,
            r.kappa,
            r.precision,
            r.recall,
            r.f1,
            r.seconds,
            d = delimiter
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::PerformanceEvaluator;
    use std::fs;
    use tempfile::NamedTempFile;

    fn report(split: &str) -> EvaluationReport {
        let mut e = ConfusionEvaluator::new();
        e.add_result(0, 0);
        e.add_result(1, 1);
        e.add_result(1, 0);
        e.add_result(0, 0);
        EvaluationReport::from_evaluator(split, &e, 0.25)
    }

    #[test]
    fn report_takes_evaluator_metrics() {
        let r = report("validation");
        assert_eq!(r.samples, 4);
        assert_eq!(r.correct, 3);
        assert_eq!(r.accuracy, 0.75);
        assert_eq!(r.seconds, 0.25);
    }

    #[test]
    fn display_is_one_line() {
        let text = report("test").to_string();
        assert!(text.starts_with("split=test, samples=4, correct=3, acc=0.750000"));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn export_csv_has_header_and_rows() {
        let tmp = NamedTempFile::new().unwrap();
        export_reports(
            tmp.path(),
            &[report("validation"), report("test")],
            ReportFormat::Csv,
        )
        .unwrap();

        let text = fs::read_to_string(tmp.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("split,samples,correct,accuracy"));
        assert!(lines[1].starts_with("validation,4,3,0.750000000000,"));
        assert!(lines[2].starts_with("test,"));
    }

    #[test]
    fn export_tsv_uses_tabs() {
        let tmp = NamedTempFile::new().unwrap();
        export_reports(tmp.path(), &[report("v")], ReportFormat::Tsv).unwrap();
        let text = fs::read_to_string(tmp.path()).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("v\t4\t3\t"));
    }

    #[test]
    fn export_json_round_trips_through_serde() {
        let tmp = NamedTempFile::new().unwrap();
        export_reports(tmp.path(), &[report("validation")], ReportFormat::Json).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(tmp.path()).unwrap()).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["split"], "validation");
        assert_eq!(first["correct"], 3);
        assert_eq!(first["accuracy"], 0.75);
    }
}
