//! CLI argument definitions for `inventario`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use inv_cli::edits::FieldChanges;
use inv_model::ManualEditPolicy;

#[derive(Parser)]
#[command(
    name = "inventario",
    version,
    about = "Inventory movement normalizer - clean spreadsheet exports into a SQLite store",
    long_about = "Normalize inventory movement spreadsheets and manage the resulting records.\n\n\
                  Categories, movement types, quantities, prices and dates are cleaned on\n\
                  ingest. Records can then be listed, edited and summarised in a dashboard."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow product and seller values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: ./inventario.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database (overrides INVENTARIO_DB and the config file).
    #[arg(long = "database", value_name = "PATH", global = true)]
    pub database: Option<PathBuf>,

    /// Spreadsheet used to populate a new database.
    #[arg(long = "source", value_name = "PATH", global = true)]
    pub source: Option<PathBuf>,

    /// Year assigned to "<day> de <month>" dates.
    #[arg(
        long = "locale-year",
        value_name = "YEAR",
        value_parser = clap::value_parser!(i32).range(1..=9999),
        global = true
    )]
    pub locale_year: Option<i32>,

    /// Normalization applied to create and update.
    #[arg(long = "manual-edits", value_enum, global = true)]
    pub manual_edits: Option<ManualEditsArg>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a spreadsheet and write it to the database.
    Ingest(IngestArgs),

    /// Normalize a spreadsheet and print the rows as CSV without storing them.
    Normalize(NormalizeArgs),

    /// List stored movements.
    List(ListArgs),

    /// Show one movement.
    Show(IdArgs),

    /// Create a movement.
    Create(CreateArgs),

    /// Change fields of a movement; unspecified fields keep their value.
    Update(UpdateArgs),

    /// Delete a movement.
    Delete(IdArgs),

    /// Revenue, item and transaction KPIs with per-seller, per-category and
    /// per-date breakdowns.
    Dashboard(DashboardArgs),

    /// Show the product keywords used to infer missing categories.
    Keywords,

    /// Show previous ingest runs.
    History,
}

#[derive(Args)]
pub struct IngestArgs {
    /// Spreadsheet file (.csv, .tsv, .xlsx).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Keep existing rows and upsert by id instead of replacing the table.
    #[arg(long = "append")]
    pub append: bool,
}

#[derive(Args)]
pub struct NormalizeArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long = "category")]
    pub category: Option<String>,

    #[arg(long = "movement-type")]
    pub movement_type: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct IdArgs {
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long = "id")]
    pub id: String,

    #[command(flatten)]
    pub fields: FieldChanges,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub fields: FieldChanges,
}

#[derive(Args)]
pub struct DashboardArgs {
    /// First date included (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<String>,

    /// Last date included (YYYY-MM-DD).
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<String>,

    #[arg(long = "category")]
    pub category: Option<String>,

    #[arg(long = "seller")]
    pub seller: Option<String>,

    /// Print the dashboard as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ManualEditsArg {
    /// Only standardize and infer the category.
    CategoryOnly,
    /// Run every normalization rule.
    Full,
}

impl From<ManualEditsArg> for ManualEditPolicy {
    fn from(value: ManualEditsArg) -> Self {
        match value {
            ManualEditsArg::CategoryOnly => ManualEditPolicy::CategoryOnly,
            ManualEditsArg::Full => ManualEditPolicy::Full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_year_must_fit_four_digits() {
        for year in ["0", "10000"] {
            let parsed = Cli::try_parse_from(["inventario", "--locale-year", year, "keywords"]);
            assert!(parsed.is_err(), "{year} should be rejected");
        }
        let cli = Cli::try_parse_from(["inventario", "--locale-year", "2025", "keywords"])
            .expect("valid year");
        assert_eq!(cli.locale_year, Some(2025));
    }
}
