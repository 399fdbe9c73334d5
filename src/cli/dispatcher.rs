//! Command dispatcher
//!
//! Routes CLI commands to their handlers and builds the run configuration
//! from the settings file plus global flags.

use crate::cli::args::{Cli, Command, GlobalFlags, ReportFormatArg};
use crate::commands;
use crate::commands::pipeline::SoftFailures;
use crate::commands::report::{ReportFormat, ReportOptions};
use crate::config::{Overrides, RunConfig, Settings};
use crate::error::Result;
use crate::utils::cancel::CancelToken;
use std::path::PathBuf;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli, cancel: CancelToken) -> Result<SoftFailures> {
    match &args.command {
        Command::Backup { output } => {
            let config = load_run_config(&args.global, output.clone())?;
            commands::backup::run(&config, cancel)
        }

        Command::Report {
            format,
            write,
            output,
        } => {
            let config = load_run_config(&args.global, output.clone())?;
            commands::report::run(
                &config,
                cancel,
                ReportOptions {
                    format: map_report_format(*format),
                    write: *write,
                },
            )
        }

        Command::Completions { shell } => {
            commands::completions::run(*shell)?;
            Ok(SoftFailures::new())
        }
    }
}

fn load_run_config(global: &GlobalFlags, output_dir: Option<PathBuf>) -> Result<RunConfig> {
    let settings = Settings::load(global.config.as_deref())?;
    settings.into_run_config(overrides_from(global, output_dir))
}

fn overrides_from(global: &GlobalFlags, output_dir: Option<PathBuf>) -> Overrides {
    Overrides {
        home: global.home.clone(),
        manager: global.manager,
        output_dir,
        substring_match: global.substring_match.map(Into::into),
        max_depth: global.max_depth,
    }
}

fn map_report_format(format: ReportFormatArg) -> ReportFormat {
    match format {
        ReportFormatArg::Table => ReportFormat::Table,
        ReportFormatArg::Json => ReportFormat::Json,
        ReportFormatArg::Yaml => ReportFormat::Yaml,
    }
}
