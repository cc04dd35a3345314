//! Styled status messages for the terminal.
//!
//! Status lines go to whichever writer the caller passes (stderr in practice).
//! Color is applied only when the caller says the writer supports it.

use owo_colors::{AnsiColors, OwoColorize};
use std::io::{self, Write};

fn print_styled<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    color: AnsiColors,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", prefix.color(color).bold(), msg)
    } else {
        writeln!(writer, "{} {}", prefix, msg)
    }
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_styled(writer, "ok:", msg, AnsiColors::Green, supports_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_styled(writer, "warning:", msg, AnsiColors::Yellow, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_styled(writer, "error:", msg, AnsiColors::Red, supports_color)
}
