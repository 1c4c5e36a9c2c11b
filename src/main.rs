mod args;
mod catalog_data;
mod config_reader;
mod store;

use std::fs;
use std::path::Path;

use clap::Parser;
use log::{info, warn};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use snafu::{prelude::*, ErrorCompat, Snafu};

use rubric_scoring::{
    compliance_by_group, compliance_by_question, count_by, critical_error_count,
    overall_compliance, score, Dataset, RecordBuilder, RubricCatalog, COL_ADVISOR, COL_AREA,
    COL_CHANNEL,
};

use crate::args::{Args, Command};
use crate::config_reader::{read_catalog, read_submission, validate_submission, ConfigError};
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Snafu)]
enum AppError {
    #[snafu(display("{source}"), context(false))]
    Config { source: ConfigError },
    #[snafu(display("{source}"), context(false))]
    Store { source: StoreError },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
}

type AppResult<T> = Result<T, AppError>;

fn load_catalog(path: &Option<String>) -> AppResult<RubricCatalog> {
    let catalog = match path {
        Some(p) => read_catalog(p)?,
        None => catalog_data::default_catalog(),
    };
    for warning in catalog.validate() {
        warn!("catalog: {}", warning);
    }
    Ok(catalog)
}

fn run_record(data_dir: &str, catalog: &RubricCatalog, submission_path: &str) -> AppResult<()> {
    let submission = read_submission(submission_path)?;
    validate_submission(&submission, catalog)?;

    let outcome = score(
        catalog,
        &submission.area,
        &submission.channel,
        &submission.answers,
        submission.critical_error,
    );
    info!(
        "scored {} / {}: total {}",
        submission.area, submission.channel, outcome.total
    );

    let record = RecordBuilder::new(&submission.area, &submission.channel)
        .monitor(&submission.monitor)
        .advisor(&submission.advisor)
        .interaction_code(&submission.interaction_code)
        .date(&submission.date)
        .critical_error(submission.critical_error)
        .positives(&submission.positives)
        .improvements(&submission.improvements)
        .build(&outcome);

    let store = RecordStore::open(Path::new(data_dir))?;
    store.append(&record)?;
    println!(
        "Recorded monitoring for {:?} in table {:?} (total {})",
        submission.advisor,
        RecordStore::table_name(&submission.area, &submission.channel),
        outcome.total
    );
    Ok(())
}

fn rounded(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn compliance_map(pairs: Vec<(String, f64)>) -> JSMap<String, JSValue> {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (key, value) in pairs {
        m.insert(key, json!(rounded(value)));
    }
    m
}

// Counts plus their share of the total, the two readings the count
// charts offer.
fn count_map(pairs: Vec<(String, usize)>) -> JSMap<String, JSValue> {
    let total: usize = pairs.iter().map(|(_, n)| *n).sum();
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (key, value) in pairs {
        let share = if total > 0 {
            rounded(value as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        m.insert(key, json!({ "count": value, "share": share }));
    }
    m
}

fn build_summary_js(dataset: &Dataset) -> JSValue {
    let questions = dataset.question_columns();

    let mut matrix: JSMap<String, JSValue> = JSMap::new();
    for advisor in dataset.distinct(COL_ADVISOR) {
        let slice = dataset.filter_eq(COL_ADVISOR, &advisor);
        matrix.insert(
            advisor,
            json!(compliance_map(compliance_by_question(&slice, &questions))),
        );
    }

    json!({
        "monitorings": dataset.rows.len(),
        "averageCompliance": overall_compliance(dataset, &questions).map(rounded),
        "criticalErrors": critical_error_count(dataset),
        "byArea": count_map(count_by(dataset, COL_AREA)),
        "byChannel": count_map(count_by(dataset, COL_CHANNEL)),
        "complianceByQuestion": compliance_map(compliance_by_question(dataset, &questions)),
        "complianceByChannel":
            compliance_map(compliance_by_group(dataset, COL_CHANNEL, &questions)),
        "complianceByAdvisor":
            compliance_map(compliance_by_group(dataset, COL_ADVISOR, &questions)),
        "advisorQuestionMatrix": matrix,
    })
}

#[allow(clippy::too_many_arguments)]
fn run_report(
    data_dir: &str,
    catalog: &RubricCatalog,
    out: &Option<String>,
    area: &Option<String>,
    channel: &Option<String>,
    advisor: &Option<String>,
    year: Option<i32>,
    month: Option<u32>,
) -> AppResult<()> {
    let store = RecordStore::open(Path::new(data_dir))?;
    let mut dataset = store.load_all(catalog)?;
    info!(
        "loaded {} rows across {} columns",
        dataset.rows.len(),
        dataset.columns.len()
    );

    if let Some(v) = area {
        dataset = dataset.filter_eq(COL_AREA, v);
    }
    if let Some(v) = channel {
        dataset = dataset.filter_eq(COL_CHANNEL, v);
    }
    if let Some(v) = advisor {
        dataset = dataset.filter_eq(COL_ADVISOR, v);
    }
    if let Some(y) = year {
        dataset = dataset.filter_year(y);
    }
    if let Some(m) = month {
        dataset = dataset.filter_month(m);
    }

    if dataset.is_empty() {
        println!("No monitorings match the requested filters.");
        return Ok(());
    }

    let summary = build_summary_js(&dataset);
    let pretty = serde_json::to_string_pretty(&summary).unwrap_or_else(|_| summary.to_string());
    match out.as_deref() {
        None | Some("stdout") => println!("{}", pretty),
        Some(path) => {
            fs::write(path, pretty.as_bytes()).context(WritingSummarySnafu { path })?;
            println!("Summary written to {:?}", path);
        }
    }
    Ok(())
}

fn run(args: &Args) -> AppResult<()> {
    let catalog = load_catalog(&args.catalog)?;
    match &args.command {
        Command::Record { submission } => run_record(&args.data_dir, &catalog, submission),
        Command::Report {
            out,
            area,
            channel,
            advisor,
            year,
            month,
        } => run_report(
            &args.data_dir,
            &catalog,
            out,
            area,
            channel,
            advisor,
            *year,
            *month,
        ),
    }
}

fn main() {
    let args = Args::parse();
    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    if let Err(e) = run(&args) {
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
