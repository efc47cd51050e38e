//! Pattern extractors.
//!
//! Each extractor scans the raw source for one lexical category and
//! returns the distinct token texts it found. A pattern that matches
//! nothing yields an empty set.
//!
//! The `regex` crate has no look-around, so "not preceded by" and
//! "not followed by" conditions are checked on the neighbouring
//! characters of each match.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

static IMPORTS_AND_NAMESPACES: Lazy<Regex> =
    Lazy::new(|| compile(r"(?:using|namespace)\s+([a-zA-Z0-9_.]+);"));
static CLASS_NAMES: Lazy<Regex> = Lazy::new(|| compile(r"\b[A-Z][a-zA-Z]*\b"));
static METHODS: Lazy<Regex> = Lazy::new(|| compile(r"(\w+)\("));
static GENERIC_METHODS: Lazy<Regex> = Lazy::new(|| compile(r".?\b(\w+)<[^>]*>+\("));
static CONSTRUCTORS: Lazy<Regex> = Lazy::new(|| compile(r"\bnew (\w+)"));
static OBJECT_INITIALIZERS: Lazy<Regex> = Lazy::new(|| compile(r"new\s+\w+\s*\{[^{}]*\}"));
static INITIALIZER_PROPERTIES: Lazy<Regex> = Lazy::new(|| compile(r"\b(\w+)\b\s*[:=]"));
static MEMBER_ACCESS: Lazy<Regex> = Lazy::new(|| compile(r"\.([A-Z][a-zA-Z0-9]*)\b"));
static AUTO_PROPERTY_GET: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)\b\w+\s+([A-Z]\w*)\s*\{\s*get;"));
static RECORDS: Lazy<Regex> =
    Lazy::new(|| compile(r"record \b([A-Z][a-zA-Z]*)\b\(((?:\w+\s+\w+,?\s*)+)\)"));
static RECORD_PARAMETERS: Lazy<Regex> = Lazy::new(|| compile(r"\b\w+\s+(\w+)"));
static NUMBERS: Lazy<Regex> = Lazy::new(|| compile(r"\d+"));
static STRINGS: Lazy<Regex> = Lazy::new(|| compile(r#"\$"[^"]*"|"[^"]*""#));
static COMMENTS: Lazy<Regex> = Lazy::new(|| compile(r"//.*"));
static REGION_NAMES: Lazy<Regex> = Lazy::new(|| compile(r"(?mR)#region[ \t]+(.+)$"));
static INTERPOLATIONS: Lazy<Regex> = Lazy::new(|| compile(r"\{[^}]*\}"));

fn char_before(code: &str, index: usize) -> Option<char> {
    code[..index].chars().next_back()
}

fn char_after(code: &str, index: usize) -> Option<char> {
    code[index..].chars().next()
}

/// Collects capture `group` of every match.
fn captures(re: &Regex, code: &str, group: usize) -> BTreeSet<String> {
    re.captures_iter(code)
        .filter_map(|caps| caps.get(group))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Collects every whole match.
fn matches(re: &Regex, code: &str) -> BTreeSet<String> {
    re.find_iter(code).map(|m| m.as_str().to_string()).collect()
}

/// Segments of `using` and `namespace` targets: `System.Text` yields
/// `System` and `Text`.
pub(crate) fn domains(code: &str) -> BTreeSet<String> {
    captures(&IMPORTS_AND_NAMESPACES, code, 1)
        .iter()
        .flat_map(|target| target.split('.'))
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Capitalised words not preceded by `.` and not followed by `(`.
pub(crate) fn class_names(code: &str) -> BTreeSet<String> {
    CLASS_NAMES
        .find_iter(code)
        .filter(|m| char_before(code, m.start()) != Some('.'))
        .filter(|m| char_after(code, m.end()) != Some('('))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Identifiers directly followed by `(`.
pub(crate) fn methods(code: &str) -> BTreeSet<String> {
    captures(&METHODS, code, 1)
}

/// Identifiers of generic calls such as `Parse<int>(`.
pub(crate) fn generic_methods(code: &str) -> BTreeSet<String> {
    captures(&GENERIC_METHODS, code, 1)
}

/// Types named after `new`.
pub(crate) fn constructors(code: &str) -> BTreeSet<String> {
    captures(&CONSTRUCTORS, code, 1)
}

/// Keys assigned inside `new Type { Key = ..., Other: ... }` blocks.
pub(crate) fn initializer_properties(code: &str) -> BTreeSet<String> {
    OBJECT_INITIALIZERS
        .find_iter(code)
        .flat_map(|block| captures(&INITIALIZER_PROPERTIES, block.as_str(), 1))
        .collect()
}

/// Capitalised members accessed with `.` that are not called.
pub(crate) fn member_properties(code: &str) -> BTreeSet<String> {
    MEMBER_ACCESS
        .captures_iter(code)
        .filter(|caps| {
            caps.get(0)
                .is_some_and(|m| char_after(code, m.end()) != Some('('))
        })
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Names of auto-properties whose accessor list starts with `get;`.
pub(crate) fn auto_properties(code: &str) -> BTreeSet<String> {
    captures(&AUTO_PROPERTY_GET, code, 1)
}

/// Names and positional parameters of `record Name(Type Param, ...)`.
#[derive(Debug, Default)]
pub(crate) struct Records {
    pub names: BTreeSet<String>,
    pub parameters: BTreeSet<String>,
}

pub(crate) fn records(code: &str) -> Records {
    let mut records = Records::default();
    for caps in RECORDS.captures_iter(code) {
        if let Some(name) = caps.get(1) {
            records.names.insert(name.as_str().to_string());
        }
        if let Some(parameters) = caps.get(2) {
            records
                .parameters
                .extend(captures(&RECORD_PARAMETERS, parameters.as_str(), 1));
        }
    }
    records
}

/// Runs of decimal digits.
pub(crate) fn numbers(code: &str) -> BTreeSet<String> {
    matches(&NUMBERS, code)
}

/// String literals including their quotes and optional `$`.
pub(crate) fn strings(code: &str) -> BTreeSet<String> {
    matches(&STRINGS, code)
}

/// Line comments, each with a trailing newline so they match the
/// combined comment tokens.
pub(crate) fn comments(code: &str) -> BTreeSet<String> {
    COMMENTS
        .find_iter(code)
        .map(|m| format!("{}\n", m.as_str()))
        .collect()
}

/// Names following `#region`.
pub(crate) fn region_names(code: &str) -> BTreeSet<String> {
    REGION_NAMES
        .captures_iter(code)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Brace groups such as `{name}` inside interpolated strings.
pub(crate) fn interpolations(code: &str) -> BTreeSet<String> {
    matches(&INTERPOLATIONS, code)
}
