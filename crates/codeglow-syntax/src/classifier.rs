//! Token classification.

use crate::delimiters::{DELIMITERS, split_words};
use crate::keywords::CSHARP_KEYWORDS;
use crate::patterns;
use crate::{ClassificationMap, TokenClass};

/// Classifies the tokens of a C# snippet.
///
/// All extractors run over the raw text, then their results are written
/// into one map in a fixed order. A later write replaces an earlier one
/// for the same token, so the order below is the conflict policy:
/// broad guesses (capitalised words) come first and can be refined by
/// more specific patterns, and keywords are written near the end so a
/// reserved word always ends up as a keyword.
pub fn parse_code(code: &str) -> ClassificationMap {
    let words = split_words(code, DELIMITERS);
    let keywords: Vec<&str> = CSHARP_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| words.contains(*keyword))
        .collect();

    let classes = patterns::class_names(code);
    let methods = patterns::methods(code);
    let initializer_properties = patterns::initializer_properties(code);
    let member_properties = patterns::member_properties(code);
    let auto_properties = patterns::auto_properties(code);
    let domains = patterns::domains(code);
    let generic_methods = patterns::generic_methods(code);
    let constructors = patterns::constructors(code);
    let records = patterns::records(code);
    let numbers = patterns::numbers(code);
    let strings = patterns::strings(code);
    let comments = patterns::comments(code);
    let region_names = patterns::region_names(code);
    let interpolations = patterns::interpolations(code);

    tracing::debug!(
        keywords = keywords.len(),
        classes = classes.len(),
        methods = methods.len() + generic_methods.len(),
        properties = initializer_properties.len() + member_properties.len() + auto_properties.len(),
        records = records.names.len(),
        strings = strings.len(),
        comments = comments.len(),
        "classified snippet"
    );

    let mut map = ClassificationMap::new();
    map.extend_with(classes, TokenClass::ClassName);
    map.extend_with(methods, TokenClass::Method);
    map.extend_with(initializer_properties, TokenClass::Variable);
    map.extend_with(member_properties, TokenClass::Variable);
    map.extend_with(auto_properties, TokenClass::Variable);
    map.extend_with(domains, TokenClass::ClassName);
    map.extend_with(generic_methods, TokenClass::Method);
    map.extend_with(constructors, TokenClass::ClassName);
    map.extend_with(records.parameters, TokenClass::Blank);
    map.extend_with(records.names, TokenClass::ClassName);
    map.extend_with(numbers, TokenClass::Number);
    map.extend_with(strings, TokenClass::String);
    map.extend_with(comments, TokenClass::Comment);
    map.extend_with(region_names, TokenClass::Comment);
    map.extend_with(keywords, TokenClass::Keyword);
    map.extend_with(interpolations, TokenClass::Blank);
    map
}
