//! String utilities shared by the stub renderers.

/// Remove every PHP open (`<?php`) and close (`?>`) delimiter token.
///
/// Helper files are concatenated into a single script body, so the
/// delimiters of each individual file have to go. Everything else is
/// preserved verbatim, whitespace included.
pub fn strip_php_tags(source: &str) -> String {
    source.replace("<?php", "").replace("?>", "")
}

/// Split a fully-qualified class name into `(namespace, class)`.
///
/// A name without a namespace separator yields an empty namespace.
pub fn split_fqn(fqn: &str) -> (&str, &str) {
    match fqn.rfind('\\') {
        Some(idx) => (&fqn[..idx], &fqn[idx + 1..]),
        None => ("", fqn),
    }
}
