#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use enumgen_cli::args::CliArgs;
use enumgen_cli::config::resolve_config;
use enumgen_cli::driver::{self, RunMode, RunReport};
use enumgen_cli::reporter::Reporter;

const EXIT_SUCCESS: u8 = 0;
/// `--check` found a target whose generated region is out of date.
const EXIT_STALE: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    enumgen_cli::tracing_config::init_tracing(args.verbose);

    let color = !args.no_color && std::io::stdout().is_terminal();

    match execute(&args) {
        Ok(report) => {
            print!("{}", Reporter::new(color, args.verbose).render(&report));
            if report.mode == RunMode::Check && report.is_stale() {
                ExitCode::from(EXIT_STALE)
            } else {
                ExitCode::from(EXIT_SUCCESS)
            }
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn execute(args: &CliArgs) -> Result<RunReport> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let config = resolve_config(args, &cwd)?;
    if let Some(path) = &config.config_path {
        tracing::debug!(config = %path.display(), "using config file");
    }
    let mode = if args.check {
        RunMode::Check
    } else {
        RunMode::Write
    };
    driver::run(&config, mode)
}
