//! Validation utilities for PHP identifiers and namespaces.

use miette::SourceSpan;

/// PHP reserved words that cannot be used as class or method names.
/// Source: https://www.php.net/manual/en/reserved.keywords.php
pub(crate) const PHP_KEYWORDS: &[&str] = &[
    "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone",
    "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "empty",
    "enddeclare", "endfor", "endforeach", "endif", "endswitch", "endwhile", "enum", "exit",
    "extends", "final", "finally", "fn", "for", "foreach", "function", "global", "goto", "if",
    "implements", "include", "instanceof", "insteadof", "interface", "isset", "list", "match",
    "namespace", "new", "or", "print", "private", "protected", "public", "readonly", "require",
    "return", "static", "switch", "throw", "trait", "try", "unset", "use", "var", "while", "xor",
    "yield",
];

/// Check if a name is a PHP reserved word (PHP keywords are case-insensitive)
pub(crate) fn is_php_keyword(name: &str) -> bool {
    let lower = name.to_lowercase();
    PHP_KEYWORDS.contains(&lower.as_str())
}

/// Validate that a name is a valid PHP identifier.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    for c in chars {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return Some("name must contain only letters, numbers, and underscores");
        }
    }

    None
}

/// Validate every segment of a backslash-separated PHP namespace.
/// Returns None if valid, Some(reason) if any segment is invalid.
pub(crate) fn validate_namespace(namespace: &str) -> Option<&'static str> {
    if namespace.is_empty() {
        return Some("namespace cannot be empty");
    }

    for segment in namespace.split('\\') {
        if let Some(reason) = validate_identifier(segment) {
            return Some(reason);
        }
    }

    None
}

/// Find the span of a name in the TOML source.
/// Names appear as quoted values (`alias = "Cache"`), so the quoted form
/// is searched first, falling back to a bare occurrence.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", name);
    if let Some(pos) = src.find(&quoted) {
        return Some(SourceSpan::from((pos + 1, name.len())));
    }

    src.find(name).map(|pos| SourceSpan::from((pos, name.len())))
}
