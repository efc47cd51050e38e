//! Token delimiters.

use std::collections::BTreeSet;

/// Strings that separate tokens.
///
/// Multi-character entries are only meaningful to [`split_words`]; the
/// tokenizer looks at one character at a time, so `&&` and `||` do not
/// make `&` or `|` delimiters on their own.
pub const DELIMITERS: &[&str] = &[
    " ", "\n", "\t", ".", "(", ")", "{", "}", "[", "]", "<", ">", "=", "==", "!=", ">=", "<=", "+",
    "-", "*", "/", "%", "&&", "||", "!", ";", ":", "?", ",", "@", "#", "\"", "'",
];

/// Returns true if `c` is a one-character entry of `delimiters`.
pub fn is_delimiter(c: char, delimiters: &[&str]) -> bool {
    delimiters.iter().any(|d| {
        let mut chars = d.chars();
        chars.next() == Some(c) && chars.next().is_none()
    })
}

/// Replaces every delimiter with a space and returns the distinct words.
pub fn split_words(code: &str, delimiters: &[&str]) -> BTreeSet<String> {
    let mut text = code.to_string();
    for delimiter in delimiters {
        if text.contains(delimiter) {
            text = text.replace(delimiter, " ");
        }
    }
    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_char_delimiters() {
        assert!(is_delimiter('.', DELIMITERS));
        assert!(is_delimiter('"', DELIMITERS));
        assert!(is_delimiter('\n', DELIMITERS));
        assert!(!is_delimiter('a', DELIMITERS));
        assert!(!is_delimiter('_', DELIMITERS));
    }

    #[test]
    fn test_multi_char_entries_do_not_leak() {
        assert!(!is_delimiter('&', DELIMITERS));
        assert!(!is_delimiter('|', DELIMITERS));
    }

    #[test]
    fn test_split_words() {
        let words = split_words("if (a && b) { return x.Y; }", DELIMITERS);
        let expected: BTreeSet<String> = ["if", "a", "b", "return", "x", "Y"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(words, expected);
    }
}
