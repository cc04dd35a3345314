//! The `link` and `expand` commands.

use blacklint_core::{expand_shorthand_link, to_metasmoke_link};

use crate::cli::{ExpandCommand, LinkCommand};

pub fn run_link(cmd: &LinkCommand) -> String {
    to_metasmoke_link(&cmd.url, !cmd.no_protocol)
}

pub fn run_expand(cmd: &ExpandCommand) -> String {
    expand_shorthand_link(&cmd.shorthand)
}
