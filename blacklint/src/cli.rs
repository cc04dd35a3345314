// blacklint/src/cli.rs
//! Command-line interface definition for blacklint.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "blacklint",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check moderation blacklist files for structural defects",
    long_about = "blacklint scans a directory of blacklist rule files (bad_*.txt, blacklisted_*.txt, watched_*.txt), reports line-ending problems, blank lines, patterns that fail to compile and duplicate entries, and exits non-zero when anything is wrong. It is meant to run as a CI gate before a rule corpus is deployed.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable all log output.
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a YAML scan configuration.
    #[arg(
        long = "config",
        value_name = "FILE",
        env = "BLACKLINT_CONFIG",
        global = true,
        help = "Path to a YAML scan configuration."
    )]
    pub config: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `blacklint` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Checks every rule file in a directory.
    #[command(about = "Check every rule file in a directory and report defects.")]
    Check(CheckCommand),

    /// Decides whether a list of changed files can be hot-reloaded.
    #[command(about = "Read changed file names from stdin and print 'reload' or 'restart'.")]
    ReloadCheck(ReloadCheckCommand),

    /// Prints the metasmoke link for a post URL.
    #[command(about = "Print the metasmoke link for a post URL.")]
    Link(LinkCommand),

    /// Expands a site shorthand into its domain.
    #[command(about = "Expand a site shorthand such as 'so' or 'meta.se' into a domain.")]
    Expand(ExpandCommand),
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Directory holding the rule files.
    #[arg(value_name = "DIR", env = "BLACKLINT_DIR", default_value = ".", help = "Directory holding the rule files.")]
    pub dir: PathBuf,

    /// Print defects as a JSON array instead of `file:line:message` lines.
    #[arg(long = "json", help = "Print defects as a JSON array.")]
    pub json: bool,

    /// Suppress the summary printed to stderr.
    #[arg(long = "no-summary", help = "Suppress the summary printed to stderr.")]
    pub no_summary: bool,
}

/// Arguments for the `reload-check` command.
#[derive(Parser, Debug)]
pub struct ReloadCheckCommand {
    /// Also treat reload-safe modules as hot-reloadable.
    #[arg(long = "modules", help = "Also accept reload-safe modules, not just blacklist files.")]
    pub modules: bool,

    /// Read the changed file list from a file instead of stdin.
    #[arg(long = "input-file", short = 'i', value_name = "FILE", help = "Read the changed file list from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,
}

/// Arguments for the `link` command.
#[derive(Parser, Debug)]
pub struct LinkCommand {
    /// The post URL.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Omit the `https:` scheme from the output.
    #[arg(long = "no-protocol", help = "Omit the https: scheme from the link.")]
    pub no_protocol: bool,
}

/// Arguments for the `expand` command.
#[derive(Parser, Debug)]
pub struct ExpandCommand {
    /// The shorthand, e.g. `so` or `meta.se`.
    #[arg(value_name = "SHORTHAND")]
    pub shorthand: String,
}
