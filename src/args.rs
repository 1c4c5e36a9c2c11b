use clap::{Parser, Subcommand};

/// This is a quality-monitoring scoring and reporting program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (directory path, default ./data) The directory holding the per-table CSV files. It is
    /// created on the first recorded monitoring if it does not exist yet.
    #[clap(short, long, value_parser, default_value = "data")]
    pub data_dir: String,

    /// (file path or empty) A JSON file describing the areas, channels, monitors, advisors and
    /// rubrics. When not specified, the built-in catalog is used.
    #[clap(long, value_parser)]
    pub catalog: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scores one monitoring submission and appends it to its (area, channel) table.
    Record {
        /// (file path) The JSON file with the submission: metadata, per-question answers and the
        /// critical-error flag.
        #[clap(short, long, value_parser)]
        submission: String,
    },
    /// Consolidates every table and writes an aggregate compliance summary in JSON format.
    Report {
        /// (file path, 'stdout' or empty) Where the summary is written. Defaults to stdout.
        #[clap(short, long, value_parser)]
        out: Option<String>,

        /// (optional) Restrict the summary to one area.
        #[clap(long, value_parser)]
        area: Option<String>,

        /// (optional) Restrict the summary to one channel.
        #[clap(long, value_parser)]
        channel: Option<String>,

        /// (optional) Restrict the summary to one advisor.
        #[clap(long, value_parser)]
        advisor: Option<String>,

        /// (optional) Restrict the summary to one calendar year.
        #[clap(long, value_parser)]
        year: Option<i32>,

        /// (optional, 1-12) Restrict the summary to one calendar month.
        #[clap(long, value_parser)]
        month: Option<u32>,
    },
}
