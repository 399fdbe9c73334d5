pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod packages;
pub mod project_identity;
pub mod report;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;
use utils::cancel::CancelToken;

/// Exit status when the run finished but something was skipped
pub const EXIT_SOFT_FAILURE: i32 = 2;

/// Run hostsnap CLI entrypoint.
pub fn run_cli() {
    // 1. Signal handling: flag cancellation, running stages stop at their next check
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        handler_token.cancel();
        ui::warning("Interrupted, stopping...");
    }) {
        ui::warning(&format!("Could not install Ctrl-C handler: {}", e));
    }

    // 2. Parse & Run
    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    match cli::dispatcher::dispatch(&args, cancel) {
        Ok(failures) if failures.is_empty() => {}
        Ok(_) => exit(EXIT_SOFT_FAILURE),
        Err(e) => {
            ui::error(&format!("{}", e));
            exit(1);
        }
    }
}
