//! Dropship CLI - build, package and ship a static site over ssh
//!
//! Usage: dropship [--mode test|production] [--skip-build] [--no-backup] [--force]
//!
//! Exit status is 0 on success or cancellation and 1 on any failure,
//! including invalid arguments.

mod commands;
mod ui;

use std::process::ExitCode;

use clap::Parser;
use dropship::presentation::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dropship={default_level}")));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are reported as "errors" on stdout.
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match commands::deploy::cmd_deploy(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error::print_error(&err, cli.json);
            ExitCode::FAILURE
        }
    }
}
