// blacklint/src/main.rs
//! blacklint entry point.
//!
//! Exit codes: 0 when the corpus is clean (or the command succeeded),
//! 1 when defects were found or a restart is needed, 2 on fatal errors.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;

use blacklint::cli::{Cli, Commands};
use blacklint::commands::check::{run_check, CheckOptions};
use blacklint::commands::links::{run_expand, run_link};
use blacklint::commands::reload::{run_reload_check, ReloadDecision};
use blacklint::commands::load_config;
use blacklint::logger;
use blacklint::output;

use blacklint_core::environ_or_none;

const EXIT_DEFECTS: u8 = 1;
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    // A missing .env file is normal.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.quiet {
        logger::init_logger(Some(LevelFilter::Off));
    } else if cli.debug {
        logger::init_logger(Some(LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }
    log::info!("blacklint started. Version: {}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            let _ = output::print_error_message(&mut io::stderr(), &format!("{:#}", e), stderr_supports_color());
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Color only on an interactive stderr, and never when `NO_COLOR` is set.
fn stderr_supports_color() -> bool {
    io::stderr().is_terminal() && environ_or_none("NO_COLOR").is_none()
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Check(cmd) => {
            let opts = CheckOptions { quiet: cli.quiet, color: stderr_supports_color() };
            let report = run_check(cmd, config, opts, &mut out, &mut io::stderr())?;
            Ok(if report.is_clean() { ExitCode::SUCCESS } else { ExitCode::from(EXIT_DEFECTS) })
        }
        Commands::ReloadCheck(cmd) => {
            let decision = run_reload_check(cmd, &config, io::stdin().lock())?;
            writeln!(out, "{}", decision.as_str())?;
            Ok(match decision {
                ReloadDecision::Reload => ExitCode::SUCCESS,
                ReloadDecision::Restart => ExitCode::from(EXIT_DEFECTS),
            })
        }
        Commands::Link(cmd) => {
            writeln!(out, "{}", run_link(cmd))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Expand(cmd) => {
            writeln!(out, "{}", run_expand(cmd))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
