//! C identifier sanitization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Used when nothing of the requested name survives sanitization.
pub const DEFAULT_IDENTIFIER: &str = "image";

static INVALID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static regex"));
static UNDERSCORE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").expect("static regex"));

/// Turn an arbitrary base name into a lowercase C identifier.
///
/// 1. Every character outside `[A-Za-z0-9_]` becomes `_`
/// 2. Runs of `_` collapse to one
/// 3. Leading and trailing `_` are stripped
/// 4. An empty result falls back to [`DEFAULT_IDENTIFIER`]
/// 5. A leading digit gets a `_` prefix
///
/// Never fails.
///
/// ```
/// use pixelbake::emit::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("My Logo!!"), "my_logo");
/// assert_eq!(sanitize_identifier("123abc"), "_123abc");
/// assert_eq!(sanitize_identifier("___"), "image");
/// ```
pub fn sanitize_identifier(name: &str) -> String {
    let replaced = INVALID_CHARS.replace_all(name, "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");
    let trimmed = collapsed.trim_matches('_');

    let mut ident = if trimmed.is_empty() {
        DEFAULT_IDENTIFIER.to_string()
    } else {
        trimmed.to_string()
    };

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    ident.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_and_punctuation() {
        assert_eq!(sanitize_identifier("My Logo!!"), "my_logo");
        assert_eq!(sanitize_identifier("boot-logo.v2"), "boot_logo_v2");
    }

    #[test]
    fn test_leading_digit_is_prefixed() {
        assert_eq!(sanitize_identifier("123abc"), "_123abc");
        assert_eq!(sanitize_identifier("  42"), "_42");
    }

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(sanitize_identifier("___"), DEFAULT_IDENTIFIER);
        assert_eq!(sanitize_identifier(""), DEFAULT_IDENTIFIER);
        assert_eq!(sanitize_identifier("!!!"), DEFAULT_IDENTIFIER);
    }

    #[test]
    fn test_non_ascii_is_replaced() {
        assert_eq!(sanitize_identifier("café_logo"), "caf_logo");
        assert_eq!(sanitize_identifier("ロゴ"), DEFAULT_IDENTIFIER);
    }

    #[test]
    fn test_already_valid_is_lowercased_only() {
        assert_eq!(sanitize_identifier("P3A_Logo"), "p3a_logo");
    }
}
