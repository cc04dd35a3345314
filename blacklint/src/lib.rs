// blacklint/src/lib.rs
//! # blacklint CLI
//!
//! Terminal front end for `blacklint-core`: argument parsing, logger setup,
//! styled status output and the subcommand runners. The binary in `main.rs`
//! only wires these together and maps outcomes to exit codes.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod output;
