use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gnb::classifiers::GaussianNaiveBayes;
use gnb::config::GnbConfig;
use gnb::data::read_table;
use gnb::evaluation::{EvaluationReport, export_reports};
use gnb::tasks::{TaskOutcome, TrainEvaluateTask};
use gnb::ui::cli::args::{Cli, Command, RunPlan};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_MAGENTA: &str = "\x1b[35m";
const FG_GREY: &str = "\x1b[90m";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&GnbConfig::schema())?;
            println!("{schema}");
            Ok(())
        }
        Command::Run(args) => {
            let plan = args.into_plan()?;
            run(plan)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(plan: RunPlan) -> Result<()> {
    let train = read_table(&plan.train)
        .with_context(|| format!("failed to read training table {}", plan.train.display()))?;

    let (train, validation) = match (&plan.validation, plan.holdout) {
        (Some(path), _) => {
            let data = read_table(path)
                .with_context(|| format!("failed to read validation table {}", path.display()))?;
            (train, Some(data))
        }
        (None, Some(fraction)) => {
            let (kept, held) = train
                .split(fraction, plan.seed)
                .context("failed to hold out a validation split")?;
            (kept, Some(held))
        }
        (None, None) => (train, None),
    };

    let test = match &plan.test {
        Some(path) => Some(
            read_table(path)
                .with_context(|| format!("failed to read test table {}", path.display()))?,
        ),
        None => None,
    };

    let learner =
        GaussianNaiveBayes::from_config(&plan.config).context("failed to build classifier")?;

    let header = [
        format!("{BOLD}{FG_CYAN}▶ Gaussian Naive Bayes{RESET}"),
        format!(
            "{DIM}model={}{RESET}  {DIM}features={}{RESET}  {DIM}train={}{RESET}  {}",
            if learner.is_univariate() {
                "univariate"
            } else {
                "multivariate"
            },
            learner.feature_variant(),
            train.len(),
            timestamp_now()
        ),
        format!(
            "{FG_GREY}────────────────────────────────────────────────────────────────────────{RESET}"
        ),
    ];

    let mut task = TrainEvaluateTask::new(Box::new(learner), train);
    if let Some(data) = validation {
        task = task.with_split("validation", data);
    }
    if let Some(data) = test {
        task = task.with_split("test", data);
    }

    let outcome = task.run().context("train/evaluate task failed")?;
    render_outcome(&header, &outcome);

    if let Some(path) = plan.dump_file
        && !path.as_os_str().is_empty()
    {
        export_reports(&path, &outcome.reports, plan.dump_format.into())
            .with_context(|| format!("failed to export reports to {}", path.display()))?;
    }

    Ok(())
}

fn render_outcome(header: &[String], outcome: &TaskOutcome) {
    let mut out = io::stdout().lock();
    for line in header {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(
        out,
        "{DIM}trained on{RESET} {} {DIM}samples in{RESET} {}s",
        outcome.train_samples,
        fmtf(outcome.train_seconds, 6)
    );
    for report in &outcome.reports {
        let _ = writeln!(out, "{}", format_status(report));
    }
    let _ = out.flush();
}

fn format_status(r: &EvaluationReport) -> String {
    format!(
        "{FG_GREEN}{BOLD}{:<10}{RESET} {:>7}  \
         {FG_CYAN}{BOLD}acc{RESET} {:>7}% \
         {FG_MAGENTA}{BOLD}κ{RESET} {:>7}%  \
         {DIM}P{RESET} {}  {DIM}R{RESET} {}  {DIM}F1{RESET} {}  \
         {DIM}t{RESET} {:>7.6}s  {}",
        r.split,
        r.samples,
        fmtf(r.accuracy * 100.0, 3),
        fmtf(r.kappa * 100.0, 3),
        fmtf(r.precision, 4),
        fmtf(r.recall, 4),
        fmtf(r.f1, 4),
        r.seconds,
        progress_bar(r.accuracy, 1.0, 15)
    )
}

fn progress_bar(current: f64, total: f64, width: usize) -> String {
    if current.is_finite() && total.is_finite() && total > 0.0 {
        let ratio = (current / total).clamp(0.0, 1.0);
        let filled = (ratio * width as f64).round() as usize;
        let empty = width.saturating_sub(filled);
        return format!(
            "[{}{}] {:>3.0}%",
            "█".repeat(filled),
            "░".repeat(empty),
            ratio * 100.0
        );
    }

    String::new()
}

fn fmtf(x: f64, prec: usize) -> String {
    if x.is_nan() {
        format!("{DIM}NaN{RESET}")
    } else {
        format!("{:>1$.prec$}", x, 6, prec = prec)
    }
}

fn timestamp_now() -> String {
    use chrono::{Local, SecondsFormat};
    let now = Local::now();
    format!(
        "{DIM}{}{}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        RESET
    )
}
