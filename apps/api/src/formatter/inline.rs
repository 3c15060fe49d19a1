//! Character-level transforms applied to line payloads: HTML escaping and
//! the `**bold**` / `*italic*` / `` `code` `` inline markers.

use regex::Regex;

/// Compiled inline-markup patterns. Built once and reused for every line;
/// bold is resolved before italic so a `**` pair is never half-consumed.
pub struct InlineRules {
    bold: Regex,
    italic: Regex,
    code: Regex,
}

impl InlineRules {
    pub fn new() -> Self {
        Self {
            bold: Regex::new(r"\*\*(.+?)\*\*").expect("Invalid bold regex"),
            italic: Regex::new(r"\*([^*]+)\*").expect("Invalid italic regex"),
            code: Regex::new(r"`([^`]+)`").expect("Invalid code regex"),
        }
    }

    /// Applies inline markup to an already-escaped line payload.
    pub fn apply(&self, escaped: &str) -> String {
        let text = self.bold.replace_all(escaped, "<strong>$1</strong>");
        let text = self.italic.replace_all(&text, "<em>$1</em>");
        let text = self.code.replace_all(&text, "<code>$1</code>");
        text.into_owned()
    }
}

impl Default for InlineRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapes `&`, `<`, `>` so raw model output can never inject markup.
/// Must run before any structural tags are synthesized.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_orders_ampersand_first() {
        assert_eq!(escape_html("<a & b>"), "&lt;a &amp; b&gt;");
    }

    #[test]
    fn test_bold_before_italic() {
        let rules = InlineRules::new();
        assert_eq!(
            rules.apply("**strong** and *soft*"),
            "<strong>strong</strong> and <em>soft</em>"
        );
    }

    #[test]
    fn test_code_span() {
        let rules = InlineRules::new();
        assert_eq!(rules.apply("use `cargo`"), "use <code>cargo</code>");
    }

    #[test]
    fn test_unclosed_markers_pass_through() {
        let rules = InlineRules::new();
        assert_eq!(rules.apply("a ** b ` c"), "a ** b ` c");
    }
}
