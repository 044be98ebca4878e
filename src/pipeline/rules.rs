//! Rewrite rules: ordered regex substitutions from HTML to Markdown.
//!
//! ## Why regexes instead of a DOM?
//!
//! Generated documentation pages are regular enough that a fixed list of
//! substitutions recovers the readable content. The rules do not build a tree
//! and do not try to be a correct HTML parser: unknown constructs are left for
//! the final tag-stripping rule, and malformed input degrades instead of
//! failing.
//!
//! ## Rule Order
//!
//! Rules must run in this specific order: non-content blocks are dropped
//! before anything is rewritten, headings and paragraphs are rewritten before
//! inline markup, fenced code before inline code, and the catch-all tag strip
//! runs last.
//!
//! ## Known quirks
//!
//! Tag names are matched as prefixes (`<p[^>]*>` also opens on `<pre>`,
//! `<b[^>]*>` on `<br>`, `<i[^>]*>` on `<img>`, `<li[^>]*>` on `<link>`), and
//! the sidebar/related rules stop at the nearest `</div>` rather than the
//! balanced one. Output shape depends on these, so they are kept.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// One ordered substitution.
pub struct RewriteRule {
    /// Short identifier used in debug logs.
    pub name: &'static str,
    /// Compiled pattern. Multi-line rules carry `(?s)`.
    pub pattern: Regex,
    /// Replacement template in `regex` syntax (`${1}` etc.).
    pub replacement: &'static str,
}

impl RewriteRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            // Patterns are fixed at compile time and covered by the tests below.
            pattern: Regex::new(pattern).expect("hardcoded rewrite rule regex"),
            replacement,
        }
    }

    /// Apply this rule to every non-overlapping match in `input`.
    pub fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement)
            .into_owned()
    }
}

/// Every rewrite rule, in application order.
pub static RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        // ── Step 1: non-content blocks ──────────────────────────────────
        RewriteRule::new("script", r"(?s)<script[^>]*>.*?</script>", ""),
        RewriteRule::new("style", r"(?s)<style[^>]*>.*?</style>", ""),
        RewriteRule::new("nav", r"(?s)<nav[^>]*>.*?</nav>", ""),
        RewriteRule::new("footer", r"(?s)<footer[^>]*>.*?</footer>", ""),
        RewriteRule::new(
            "related",
            r#"(?s)<div[^>]*class="[^"]*related[^"]*"[^>]*>.*?</div>"#,
            "",
        ),
        RewriteRule::new(
            "sphinxsidebar",
            r#"(?s)<div[^>]*class="[^"]*sphinxsidebar[^"]*"[^>]*>.*?</div>"#,
            "",
        ),
        // ── Step 2: headings ────────────────────────────────────────────
        RewriteRule::new("h1", r"(?s)<h1[^>]*>(.*?)</h1>", "# ${1}"),
        RewriteRule::new("h2", r"(?s)<h2[^>]*>(.*?)</h2>", "## ${1}"),
        RewriteRule::new("h3", r"(?s)<h3[^>]*>(.*?)</h3>", "### ${1}"),
        RewriteRule::new("h4", r"(?s)<h4[^>]*>(.*?)</h4>", "#### ${1}"),
        RewriteRule::new("h5", r"(?s)<h5[^>]*>(.*?)</h5>", "##### ${1}"),
        RewriteRule::new("h6", r"(?s)<h6[^>]*>(.*?)</h6>", "###### ${1}"),
        // ── Step 3: paragraphs ──────────────────────────────────────────
        RewriteRule::new("paragraph", r"(?s)<p[^>]*>(.*?)</p>", "${1}\n\n"),
        // ── Step 4: links ───────────────────────────────────────────────
        RewriteRule::new(
            "link",
            r#"(?s)<a[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#,
            "[${2}](${1})",
        ),
        // ── Step 5: emphasis ────────────────────────────────────────────
        RewriteRule::new("strong", r"(?s)<strong[^>]*>(.*?)</strong>", "**${1}**"),
        RewriteRule::new("bold", r"(?s)<b[^>]*>(.*?)</b>", "**${1}**"),
        RewriteRule::new("em", r"(?s)<em[^>]*>(.*?)</em>", "*${1}*"),
        RewriteRule::new("italic", r"(?s)<i[^>]*>(.*?)</i>", "*${1}*"),
        // ── Step 6: lists ───────────────────────────────────────────────
        RewriteRule::new("list_item", r"(?s)<li[^>]*>(.*?)</li>", "- ${1}"),
        // ── Step 7: code ────────────────────────────────────────────────
        RewriteRule::new(
            "code_block",
            r"(?s)<pre[^>]*><code[^>]*>(.*?)</code></pre>",
            "```\n${1}\n```",
        ),
        RewriteRule::new("inline_code", r"(?s)<code[^>]*>(.*?)</code>", "`${1}`"),
        // ── Step 8: everything else ─────────────────────────────────────
        RewriteRule::new("tags", r"<[^>]*>", ""),
    ]
});

/// Run every rewrite rule over `html`, in order.
///
/// The result still contains HTML entities and raw whitespace; see
/// [`crate::pipeline::postprocess::clean_markdown`] for the remaining steps.
pub fn apply_rules(html: &str) -> String {
    let mut text = html.to_string();
    for rule in RULES.iter() {
        if let Cow::Owned(rewritten) = rule.pattern.replace_all(&text, rule.replacement) {
            tracing::trace!(rule = rule.name, "rewrite rule matched");
            text = rewritten;
        }
    }
    text
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static RewriteRule {
        RULES
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no rule named {name}"))
    }

    #[test]
    fn all_rules_compile() {
        assert_eq!(RULES.len(), 22);
    }

    #[test]
    fn tag_strip_runs_last() {
        assert_eq!(RULES.last().map(|r| r.name), Some("tags"));
    }

    #[test]
    fn test_script_removed_across_lines() {
        let input = "a<script type=\"text/javascript\">\nvar x = 1;\n</script>b";
        assert_eq!(rule("script").apply(input), "ab");
    }

    #[test]
    fn test_script_match_is_case_sensitive() {
        let input = "<SCRIPT>evil()</SCRIPT>";
        assert_eq!(rule("script").apply(input), input);
    }

    #[test]
    fn test_sidebar_stops_at_nearest_closing_div() {
        let input = r#"<div class="sphinxsidebar"><div class="inner">Search</div>tail</div>"#;
        assert_eq!(rule("sphinxsidebar").apply(input), "tail</div>");
    }

    #[test]
    fn test_related_class_substring() {
        let input = r#"<div role="navigation" class="related bar">Prev</div>Body"#;
        assert_eq!(rule("related").apply(input), "Body");
    }

    #[test]
    fn test_heading_keeps_inner_markup() {
        let input = r#"<h2 id="x">Install <em>now</em></h2>"#;
        assert_eq!(rule("h2").apply(input), "## Install <em>now</em>");
    }

    #[test]
    fn test_paragraph_adds_blank_line() {
        assert_eq!(rule("paragraph").apply("<p class=\"x\">Hi</p>"), "Hi\n\n");
    }

    #[test]
    fn test_link_discards_other_attributes() {
        let input = r#"<a class="reference internal" href="intro.html#setup" title="Setup">Setup</a>"#;
        assert_eq!(rule("link").apply(input), "[Setup](intro.html#setup)");
    }

    #[test]
    fn test_anchor_without_href_is_untouched() {
        let input = r#"<a id="top">Top</a>"#;
        assert_eq!(rule("link").apply(input), input);
    }

    #[test]
    fn test_bold_opens_on_br() {
        // `<b[^>]*>` also matches `<br>`; the capture runs to the next `</b>`.
        let input = "line<br>one <b>bold</b>";
        assert_eq!(rule("bold").apply(input), "line**one <b>bold**");
    }

    #[test]
    fn test_fenced_code_requires_adjacent_tags() {
        let input = "<pre><code>x = 1\ny = 2</code></pre>";
        assert_eq!(rule("code_block").apply(input), "```\nx = 1\ny = 2\n```");

        let spaced = "<pre> <code>x</code></pre>";
        assert_eq!(rule("code_block").apply(spaced), spaced);
    }

    #[test]
    fn test_tag_strip_removes_unknown_tags() {
        let input = "<div class=\"body\"><span>kept</span><br/></div>";
        assert_eq!(rule("tags").apply(input), "kept");
    }

    #[test]
    fn test_apply_rules_full_page() {
        let input = "<html><head><style>p { color: red; }</style></head>\
            <body><nav>Menu</nav><h1>Title</h1><p>Hello <strong>world</strong></p>\
            <footer>Footer</footer></body></html>";
        let result = apply_rules(input);
        assert_eq!(result, "# TitleHello **world**\n\n");
    }
}
