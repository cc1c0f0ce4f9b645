//! The reserved keyword and symbol sets (GLOSSARY). Small and fixed, so
//! membership is a linear scan rather than a hash lookup — matching
//! `original_source`'s flat `RESERVED_WORDS`/`RESERVED_SYMBOLS` lists.

pub const KEYWORDS: &[&str] = &[
    "program", "procedure", "is", "begin", "end", "global", "in", "out", "if", "then", "else",
    "for", "return", "not", "and", "or", "true", "false", "integer", "float", "bool", "string",
];

/// Complete valid symbols. `!` alone is intentionally absent — it is only
/// valid as the first character of `!=`.
pub const SYMBOLS: &[&str] = &[
    ":=", "<=", ">=", "==", "!=", ":", ";", ",", "+", "-", "*", "/", "(", ")", "<", ">", "[", "]",
    "&", "|",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

pub fn is_symbol(text: &str) -> bool {
    SYMBOLS.contains(&text)
}

/// Characters that can begin a symbol token.
pub fn is_symbol_start(c: char) -> bool {
    matches!(
        c,
        ':' | ';' | ',' | '+' | '-' | '*' | '/' | '(' | ')' | '<' | '>' | '!' | '[' | ']' | '&' | '|'
    )
}
