// blacklint/src/logger.rs
//! Logger setup for the blacklint CLI.
//!
//! Logs go to stderr so that stdout carries only the defect list. Each record
//! is stamped with the wall-clock time; the stamp is colored by level when
//! stderr is a terminal.

use chrono::Local;
use env_logger::{Builder, Env, Target};
use is_terminal::IsTerminal;
use log::{Level, LevelFilter};
use owo_colors::{AnsiColors, OwoColorize};
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

fn level_color(level: Level) -> AnsiColors {
    match level {
        Level::Error => AnsiColors::Red,
        Level::Warn => AnsiColors::Yellow,
        Level::Info => AnsiColors::Cyan,
        Level::Debug | Level::Trace => AnsiColors::BrightBlack,
    }
}

/// Initializes `env_logger` once per process.
///
/// `RUST_LOG` is honored unless `level` is given, in which case it overrides
/// every module. Later calls are no-ops.
pub fn init_logger(level: Option<LevelFilter>) {
    INIT.call_once(|| {
        let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
        if let Some(level) = level {
            builder.filter_level(level);
        }

        let colored = std::io::stderr().is_terminal();
        builder.format(move |buf, record| {
            let stamp = format!("[{}]", Local::now().format("%H:%M:%S"));
            if colored {
                writeln!(
                    buf,
                    "{} [{} {}] {}",
                    stamp.color(level_color(record.level())),
                    record.level(),
                    record.target(),
                    record.args()
                )
            } else {
                writeln!(buf, "{} [{} {}] {}", stamp, record.level(), record.target(), record.args())
            }
        });

        builder.target(Target::Stderr);
        // Another logger may already be installed (e.g. by a test harness).
        let _ = builder.try_init();
    });
}
