//! Screenshot file naming.
//!
//! Output files are named `[<prefix>_]<title>_<id>.png` with every segment
//! sanitized for the filesystem. Collisions are not detected; a repeated
//! title/id pair silently overwrites the earlier file.

// ============================================================================
// Sanitization
// ============================================================================

/// Makes a name segment filesystem-safe.
///
/// Alphanumerics, `-` and `_` pass through; runs of whitespace collapse to
/// a single `_`; everything else is stripped. Separators introduced by
/// whitespace are only emitted between kept characters, so literal
/// underscores in the input survive while leading and trailing whitespace
/// leaves no trace.
#[must_use]
pub fn sanitize(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut pending_separator = false;

    for ch in segment.chars() {
        if ch.is_whitespace() {
            pending_separator = !out.is_empty();
        } else if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            if pending_separator {
                out.push('_');
                pending_separator = false;
            }
            out.push(ch);
        }
        // Anything else (path separators, quotes, colons) is dropped.
    }

    out
}

// ============================================================================
// File Name Assembly
// ============================================================================

/// Builds the screenshot file name: `[<prefix>_]<title>_<id>.png`.
///
/// Every segment is sanitized, the prefix included; a prefix that
/// sanitizes to nothing is dropped. The result is always a bare file
/// name, never a path.
#[must_use]
pub fn file_name(title: &str, id: &str, prefix: Option<&str>) -> String {
    let title = sanitize(title);
    let id = sanitize(id);

    match prefix.map(sanitize) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}_{title}_{id}.png"),
        _ => format!("{title}_{id}.png"),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_passthrough() {
        assert_eq!(sanitize("checkout-page_v2"), "checkout-page_v2");
    }

    #[test]
    fn test_sanitize_spaces_to_underscore() {
        assert_eq!(sanitize("Login Test"), "Login_Test");
    }

    #[test]
    fn test_sanitize_collapses_whitespace_runs() {
        assert_eq!(sanitize("a  \t b"), "a_b");
    }

    #[test]
    fn test_sanitize_strips_unsafe_chars() {
        assert_eq!(sanitize("a/b\\c:d*e?f"), "abcdef");
    }

    #[test]
    fn test_sanitize_trims_edges() {
        assert_eq!(sanitize("  padded  "), "padded");
    }

    #[test]
    fn test_sanitize_keeps_literal_underscores() {
        assert_eq!(sanitize("v2_"), "v2_");
        assert_eq!(sanitize("_lead"), "_lead");
    }

    #[test]
    fn test_file_name_with_prefix() {
        assert_eq!(
            file_name("Login Test", "1", Some("suite1")),
            "suite1_Login_Test_1.png"
        );
    }

    #[test]
    fn test_file_name_without_prefix() {
        assert_eq!(file_name("Login Test", "1", None), "Login_Test_1.png");
    }

    #[test]
    fn test_file_name_empty_prefix_ignored() {
        assert_eq!(file_name("Home", "2", Some("")), "Home_2.png");
    }

    #[test]
    fn test_file_name_sanitizes_prefix() {
        assert_eq!(
            file_name("Login Test", "1", Some("../evil")),
            "evil_Login_Test_1.png"
        );
        assert_eq!(file_name("Home", "1", Some("/:*?")), "Home_1.png");
    }
}
