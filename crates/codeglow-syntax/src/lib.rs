//! # Codeglow Syntax
//!
//! Heuristic syntax classification for C# snippets.
//!
//! ## Two independent passes
//!
//! The same source text goes through two pipelines that only meet at
//! render time:
//!
//! ```text
//!            ┌──────────────┐    ┌───────────────┐
//! source ──▶ │  tokenize()  │──▶ │ combine_*()   │──▶ ordered tokens
//!   │        └──────────────┘    └───────────────┘          │
//!   │        ┌──────────────┐                               ▼
//!   └──────▶ │ parse_code() │──────▶ token → class ──▶ lookup per token
//!            └──────────────┘
//! ```
//!
//! The classifier never sees the token stream. It runs a battery of
//! regex extractors over the raw text and records which token *text*
//! belongs to which class; the renderer then looks every token up by
//! exact string match.
//!
//! ## Fragments
//!
//! Input is usually a fragment: half a class, a lone method, a record
//! declaration. Nothing is parsed or validated, and text no extractor
//! recognises is rendered unstyled.

mod classifier;
mod combiner;
mod delimiters;
mod keywords;
mod patterns;
mod tokenizer;

pub use classifier::parse_code;
pub use combiner::{combine_comment_tokens, combine_string_tokens, combine_tokens};
pub use delimiters::{DELIMITERS, is_delimiter, split_words};
pub use keywords::{CSHARP_KEYWORDS, is_keyword};
pub use tokenizer::{tokenize, tokenize_with};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Errors surfaced at the edge of the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("No code snippet supplied")]
    EmptyInput,
}

/// Returns the source unchanged unless it is empty or whitespace only.
///
/// The pipeline itself is total: `parse_code("")` is an empty map and
/// rendering it is an empty string. Callers that take code from a user
/// use this to tell "nothing supplied" apart from "nothing matched".
pub fn require_source(code: &str) -> Result<&str, SyntaxError> {
    if code.trim().is_empty() {
        Err(SyntaxError::EmptyInput)
    } else {
        Ok(code)
    }
}

/// Semantic class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenClass {
    ClassName,
    Method,
    Property,
    Variable,
    Keyword,
    Number,
    Comment,
    String,
    /// Recognised but deliberately left unstyled.
    Blank,
}

impl TokenClass {
    /// All classes, in declaration order.
    pub const ALL: [TokenClass; 9] = [
        TokenClass::ClassName,
        TokenClass::Method,
        TokenClass::Property,
        TokenClass::Variable,
        TokenClass::Keyword,
        TokenClass::Number,
        TokenClass::Comment,
        TokenClass::String,
        TokenClass::Blank,
    ];

    /// Returns the CSS class name used in rendered markup.
    pub fn css_class(&self) -> &'static str {
        match self {
            TokenClass::ClassName => "class-name",
            TokenClass::Method => "method",
            TokenClass::Property => "property",
            TokenClass::Variable => "variable",
            TokenClass::Keyword => "keyword",
            TokenClass::Number => "number",
            TokenClass::Comment => "comment",
            TokenClass::String => "string",
            TokenClass::Blank => "blank",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Mapping from exact token text to its class.
///
/// Writes are last-writer-wins: the classifier relies on this to let
/// later, more specific extractors override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationMap {
    entries: BTreeMap<String, TokenClass>,
}

impl ClassificationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `class` for `token`, replacing any earlier class.
    pub fn insert(&mut self, token: impl Into<String>, class: TokenClass) -> Option<TokenClass> {
        self.entries.insert(token.into(), class)
    }

    /// Assigns `class` to every token in `tokens`.
    pub fn extend_with<I, S>(&mut self, tokens: I, class: TokenClass)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self.insert(token, class);
        }
    }

    pub fn get(&self, token: &str) -> Option<TokenClass> {
        self.entries.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenClass)> {
        self.entries.iter().map(|(token, class)| (token.as_str(), *class))
    }
}

impl FromIterator<(String, TokenClass)> for ClassificationMap {
    fn from_iter<T: IntoIterator<Item = (String, TokenClass)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_class_names() {
        let names: Vec<_> = TokenClass::ALL.iter().map(|c| c.css_class()).collect();
        assert_eq!(
            names,
            [
                "class-name",
                "method",
                "property",
                "variable",
                "keyword",
                "number",
                "comment",
                "string",
                "blank"
            ]
        );
    }

    #[test]
    fn test_last_writer_wins() {
        let mut map = ClassificationMap::new();
        map.insert("Type", TokenClass::ClassName);
        let previous = map.insert("Type", TokenClass::Keyword);

        assert_eq!(previous, Some(TokenClass::ClassName));
        assert_eq!(map.get("Type"), Some(TokenClass::Keyword));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_map_serializes_as_object() {
        let mut map = ClassificationMap::new();
        map.insert("Foo", TokenClass::ClassName);
        map.insert("42", TokenClass::Number);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"42":"number","Foo":"class-name"}"#);
    }

    #[test]
    fn test_require_source() {
        assert!(matches!(require_source(""), Err(SyntaxError::EmptyInput)));
        assert!(matches!(require_source(" \n\t"), Err(SyntaxError::EmptyInput)));
        assert_eq!(require_source("int x;").unwrap(), "int x;");
    }
}
