//! C# reserved and contextual keywords.

/// Words highlighted as keywords when they appear as whole words.
pub const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "and", "as", "async", "await", "base", "bool", "break", "byte", "case", "catch",
    "char", "checked", "class", "const", "continue", "decimal", "default", "delegate", "do",
    "double", "else", "enum", "event", "explicit", "extern", "false", "file", "finally", "fixed",
    "float", "for", "foreach", "get", "goto", "if", "implicit", "in", "init", "int", "interface",
    "internal", "is", "lock", "long", "nameof", "namespace", "native", "new", "not", "null",
    "object", "operator", "or", "out", "override", "params", "partial", "private", "protected",
    "public", "readonly", "record", "ref", "remove", "required", "return", "sbyte", "sealed",
    "set", "short", "sizeof", "stackalloc", "static", "string", "struct", "switch", "sync",
    "this", "throw", "true", "try", "typeof", "uint", "ulong", "unchecked", "union", "unsafe",
    "ushort", "using", "var", "virtual", "void", "volatile", "where", "while", "with", "yield",
];

/// Returns true if `word` is a keyword.
pub fn is_keyword(word: &str) -> bool {
    CSHARP_KEYWORDS.binary_search(&word).is_ok()
}
