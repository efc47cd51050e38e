//! Lossless tokenizer.
//!
//! Every delimiter character becomes a token of its own and everything
//! between delimiters is one token, so `tokenize(s).concat() == s`.

use crate::delimiters::{DELIMITERS, is_delimiter};

/// Splits `code` on the default [`DELIMITERS`].
pub fn tokenize(code: &str) -> Vec<&str> {
    tokenize_with(code, DELIMITERS)
}

/// Splits `code` on a custom delimiter list.
pub fn tokenize_with<'a>(code: &'a str, delimiters: &[&str]) -> Vec<&'a str> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (index, c) in code.char_indices() {
        if is_delimiter(c, delimiters) {
            if start < index {
                tokens.push(&code[start..index]);
            }
            let end = index + c.len_utf8();
            tokens.push(&code[index..end]);
            start = end;
        }
    }

    if start < code.len() {
        tokens.push(&code[start..]);
    }

    tokens
}
