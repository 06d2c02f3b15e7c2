//! Inventory movement normalizer CLI.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use inv_cli::config::{DATABASE_ENV, Overrides, Settings, load_config};
use inv_cli::logging::{LogConfig, LogFormat, init_logging};
use inv_cli::pipeline::open_store;
use inv_store::StoreError;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    print_ingest, run_create, run_dashboard, run_delete, run_history, run_ingest, run_keywords,
    run_list, run_normalize, run_show, run_update,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            if let Some(hint) = error
                .chain()
                .find_map(|cause| cause.downcast_ref::<StoreError>())
                .and_then(StoreError::suggestion)
            {
                eprintln!("hint: {hint}");
            }
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<()> {
    let file_config = load_config(cli.config.as_deref())?;
    let overrides = Overrides {
        database: cli.database,
        env_database: std::env::var_os(DATABASE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from),
        source: cli.source,
        locale_year: cli.locale_year,
        manual_edits: cli.manual_edits.map(Into::into),
    };
    let settings = Settings::resolve(file_config, overrides);

    match &cli.command {
        Command::Normalize(args) => return run_normalize(&settings, &args.file),
        Command::Keywords => {
            run_keywords();
            return Ok(());
        }
        _ => {}
    }

    let (mut store, initial) = open_store(&settings)?;
    if let Some(outcome) = &initial {
        print_ingest(outcome);
    }
    match cli.command {
        Command::Ingest(args) => run_ingest(&mut store, &settings, &args),
        Command::List(args) => run_list(&store, &args),
        Command::Show(args) => run_show(&store, &args.id),
        Command::Create(args) => run_create(&store, &settings, &args),
        Command::Update(args) => run_update(&store, &settings, &args),
        Command::Delete(args) => run_delete(&store, &args.id),
        Command::Dashboard(args) => run_dashboard(&store, &args),
        Command::History => run_history(&store),
        Command::Normalize(_) | Command::Keywords => Ok(()),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
