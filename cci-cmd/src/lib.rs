//! Command implementations for the CCI CLI.
//!
//! Provides subcommands for loading a wide-format cases CSV into the
//! store, querying it by date range and region, and computing summary
//! figures straight from the wide table.

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use cci_core::Region;

pub mod load;
pub mod query;
pub mod stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a wide-format cases CSV into the store
    Load {
        /// Path to the wide cases CSV (two header rows: countries, provinces)
        #[arg(short, long)]
        input: String,

        /// Path to the SQLite database file
        #[arg(short, long)]
        db: String,

        /// Append to the existing rows instead of replacing them
        #[arg(long)]
        no_replace: bool,
    },

    /// Query stored records by date range and region
    Query {
        /// Path to the SQLite database file
        #[arg(short, long)]
        db: String,

        /// Start date (YYYY-MM-DD); defaults to the earliest stored date
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD); defaults to the latest stored date
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Region to include, as "Country" or "Country:Province" (repeatable)
        #[arg(short, long = "region")]
        regions: Vec<Region>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Summary statistics per region from a wide cases CSV
    Stats {
        /// Path to the wide cases CSV
        #[arg(short, long)]
        input: String,

        /// Region to include (repeatable); all regions when omitted
        #[arg(short, long = "region")]
        regions: Vec<Region>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Top regions by latest cumulative total from a wide cases CSV
    Top {
        /// Path to the wide cases CSV
        #[arg(short, long)]
        input: String,

        /// How many regions to list
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Load {
            input,
            db,
            no_replace,
        } => load::run_load(&input, &db, !no_replace),
        Command::Query {
            db,
            start,
            end,
            regions,
            format,
            output,
        } => query::run_query(&db, start, end, &regions, format, output.as_deref()),
        Command::Stats {
            input,
            regions,
            format,
            output,
        } => stats::run_stats(&input, &regions, format, output.as_deref()),
        Command::Top { input, count } => stats::run_top(&input, count),
    }
}
