//! Post-processing: entity decoding and whitespace cleanup.
//!
//! Runs after [`crate::pipeline::rules::apply_rules`] has turned markup into
//! Markdown and stripped every remaining tag. Entities are decoded only now so
//! that an escaped `&lt;div&gt;` in the page text survives as literal text
//! instead of being stripped as a tag.
//!
//! ## Rule Order
//!
//! 1. Decode HTML entities
//! 2. Collapse runs of three or more newlines down to one blank line
//! 3. Remove the mis-decoded pilcrow artefact (`Â`, `¶`)
//! 4. Trim leading and trailing whitespace
//!
//! "Whitespace" in rules 2 and 4 also covers the information separators
//! U+001C..U+001F, which Unicode classes as separators but not as
//! `White_Space`.
//!
//! The pilcrow pass runs after the collapse, so removing a `¶` that sat alone
//! between blank lines can leave three newlines behind. That ordering is part
//! of the output format.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all post-processing rules to the rewritten text.
pub fn clean_markdown(input: &str) -> String {
    let s = decode_entities(input);
    let s = collapse_blank_lines(&s);
    let s = remove_pilcrow_artefacts(&s);
    s.trim_matches(is_space).to_string()
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

// ── Rule 1: Decode HTML entities ─────────────────────────────────────────────
//
// Decoding follows the HTML5 text-content rules: legacy named entities are
// recognised without their `;`, numeric references in the C1 range map
// through Windows-1252, and NUL, surrogates or out-of-range code points
// become U+FFFD.

fn decode_entities(input: &str) -> String {
    htmlize::unescape(input).into_owned()
}

// ── Rule 2: Collapse excessive blank lines ───────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[\s\x1C-\x1F]*\n[\s\x1C-\x1F]*\n").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").into_owned()
}

// ── Rule 3: Remove pilcrow artefacts ─────────────────────────────────────────
//
// Sphinx appends a `¶` permalink to every heading. When a page is decoded with
// the wrong charset the UTF-8 bytes `C2 B6` surface as `Â¶`. Both characters
// are dropped wherever they appear.

fn remove_pilcrow_artefacts(input: &str) -> String {
    input.replace(['\u{00C2}', '\u{00B6}'], "")
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("&#169; &#x41;&#66;"), "© AB");
    }

    #[test]
    fn test_decode_c1_references_as_windows_1252() {
        assert_eq!(decode_entities("&#128;"), "€");
        assert_eq!(decode_entities("&#150;"), "–");
    }

    #[test]
    fn test_decode_invalid_code_points_as_replacement_char() {
        assert_eq!(decode_entities("&#0;"), "\u{FFFD}");
        assert_eq!(decode_entities("&#x110000;"), "\u{FFFD}");
        assert_eq!(decode_entities("&#xD800;"), "\u{FFFD}");
    }

    #[test]
    fn test_decode_without_trailing_semicolon() {
        assert_eq!(decode_entities("a &copy 2024"), "a © 2024");
        assert_eq!(decode_entities("&amp"), "&");
        assert_eq!(decode_entities("&#65"), "A");
        assert_eq!(decode_entities("&lt&gt"), "<>");
    }

    #[test]
    fn test_decode_longest_legacy_prefix() {
        // `&notit;` is not an entity; its legacy prefix `&not` is.
        assert_eq!(decode_entities("&notit;"), "¬it;");
    }

    #[test]
    fn test_decode_leaves_bare_ampersand() {
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_collapse_blank_lines_with_indentation() {
        assert_eq!(collapse_blank_lines("a\n  \n\t\n  b"), "a\n\n  b");
    }

    #[test]
    fn test_single_blank_line_untouched() {
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_remove_pilcrow() {
        assert_eq!(remove_pilcrow_artefacts("Title¶"), "Title");
        assert_eq!(remove_pilcrow_artefacts("TitleÂ¶"), "Title");
    }

    #[test]
    fn test_clean_markdown_trims() {
        assert_eq!(clean_markdown("\n\n  # Title\n\nBody\n\n"), "# Title\n\nBody");
    }

    #[test]
    fn test_information_separators_count_as_whitespace() {
        assert_eq!(collapse_blank_lines("a\n\u{1C}\n\u{1F}\nb"), "a\n\nb");
        assert_eq!(clean_markdown("\u{1C}\n\n\n\u{1C}x"), "x");
        assert_eq!(clean_markdown("\u{1F} x \u{1D}"), "x");
    }

    #[test]
    fn test_clean_markdown_empty() {
        assert_eq!(clean_markdown("  \n\t\n "), "");
    }

    #[test]
    fn test_entities_decoded_before_collapse() {
        // `&#10;` is a newline; it only counts towards a blank-line run once decoded.
        assert_eq!(clean_markdown("a&#10;&#10;&#10;b"), "a\n\nb");
    }
}
