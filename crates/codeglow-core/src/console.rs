//! Terminal preview of highlighted snippets.

use crate::preset::ansi_color;
use codeglow_syntax::TokenClass;
use std::io::{self, Write};

/// Writes `token` in the 256-colour code of `class`.
pub fn echo_token(out: &mut dyn Write, token: &str, class: Option<TokenClass>) -> io::Result<()> {
    write!(out, "\x1b[38;5;{}m{}\x1b[0m", ansi_color(class), token)
}
