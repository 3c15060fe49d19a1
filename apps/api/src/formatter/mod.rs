//! Formatter — the pure text→HTML transducer for analysis output.
//!
//! The upstream model writes markdown-flavored text with a handful of
//! custom convention markers (priority blocks, before/after rewrites,
//! verdict bullets). This module turns that into a displayable HTML
//! fragment in a single left-to-right pass over the lines, driven by an
//! explicit block state machine. It is total: malformed input falls
//! through to plain paragraphs, and nothing here performs I/O or panics.

mod inline;

use inline::{escape_html, InlineRules};

/// Fragment returned for empty or whitespace-only input.
const PLACEHOLDER: &str = "<p>No analysis results available.</p>";

/// Fragment returned when every input line was consumed without emitting
/// anything (e.g. a lone dangling `After` line), keeping the contract that
/// non-empty input yields a non-empty fragment.
const EMPTY_RESULT: &str = "<p>Analysis completed successfully.</p>";

/// Issue severity, keyed by the marker glyph on a `Priority:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Critical,
    Important,
    Optional,
}

impl Severity {
    fn from_marker(marker: &str) -> Option<Self> {
        if marker.contains('\u{1F534}') {
            Some(Severity::Critical) // 🔴
        } else if marker.contains('\u{1F7E1}') {
            Some(Severity::Important) // 🟡
        } else if marker.contains('\u{1F7E2}') {
            Some(Severity::Optional) // 🟢
        } else {
            None
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Important => "important",
            Severity::Optional => "optional",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Important => "Important",
            Severity::Optional => "Optional",
        }
    }
}

/// Which half of a before/after rewrite we have emitted so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Before,
    After,
}

/// Open block accumulator. Blank lines and end of input transition back
/// to `Idle`, emitting whatever the block has collected.
#[derive(Debug)]
enum Block {
    Idle,
    Priority {
        severity: Severity,
        fields: Vec<(&'static str, String)>,
    },
    /// The wrapper div is already open in the output; only the phase is
    /// tracked so `Why this is better:` is recognized at the right moment.
    BeforeAfter { phase: Phase },
}

/// Line classification, ordered and mutually exclusive — first match wins.
/// Labeled patterns are checked before the generic bullet, so a
/// `- Problem:` line inside an open priority block is never a plain bullet.
#[derive(Debug, PartialEq)]
enum LineClass<'a> {
    Blank,
    /// `N. Title` with an uppercase-led title; carries the whole line.
    SectionHeader(&'a str),
    PriorityOpen(Severity),
    PriorityField { label: &'static str, text: &'a str },
    Before(&'a str),
    After(&'a str),
    WhyBetter(&'a str),
    Verdict {
        css_class: &'static str,
        label: &'static str,
        text: &'a str,
    },
    H2(&'a str),
    H3(&'a str),
    Bullet(&'a str),
    Paragraph(&'a str),
}

const PRIORITY_FIELDS: &[(&str, &str)] = &[
    ("- Problem:", "Problem"),
    ("- Impact:", "Impact"),
    ("- Solution:", "Solution"),
];

const VERDICTS: &[(&str, &str, &str)] = &[
    ("- \u{2705} What Works:", "works", "\u{2705} What Works"),
    ("- \u{274C} What Doesn't:", "fails", "\u{274C} What Doesn't"),
    ("- \u{1F527} How to Fix:", "fix", "\u{1F527} How to Fix"),
];

fn classify<'a>(line: &'a str, block: &Block) -> LineClass<'a> {
    if line.is_empty() {
        return LineClass::Blank;
    }

    if let Some(rest) = numbered_rest(line) {
        if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            return LineClass::SectionHeader(line);
        }
        return LineClass::Bullet(rest);
    }

    if let Some(marker) = line.strip_prefix("Priority:") {
        if let Some(severity) = Severity::from_marker(marker) {
            return LineClass::PriorityOpen(severity);
        }
    }

    if matches!(block, Block::Priority { .. }) {
        for &(prefix, label) in PRIORITY_FIELDS {
            if let Some(text) = line.strip_prefix(prefix) {
                return LineClass::PriorityField {
                    label,
                    text: text.trim_start(),
                };
            }
        }
    }

    if let Some(text) = line.strip_prefix("\u{274C} Before:") {
        return LineClass::Before(text.trim_start());
    }
    if let Some(text) = line.strip_prefix("\u{2705} After:") {
        return LineClass::After(text.trim_start());
    }
    if matches!(
        block,
        Block::BeforeAfter {
            phase: Phase::After
        }
    ) {
        if let Some(text) = line.strip_prefix("Why this is better:") {
            return LineClass::WhyBetter(text.trim_start());
        }
    }

    for &(prefix, css_class, label) in VERDICTS {
        if let Some(text) = line.strip_prefix(prefix) {
            return LineClass::Verdict {
                css_class,
                label,
                text: text.trim_start(),
            };
        }
    }

    if let Some(title) = line.strip_prefix("### ") {
        return LineClass::H3(title.trim());
    }
    if let Some(title) = line.strip_prefix("## ") {
        return LineClass::H2(title.trim());
    }

    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return LineClass::Bullet(text.trim_start());
    }

    LineClass::Paragraph(line)
}

/// For `N. rest` lines, returns `rest`. Numbered lines are either section
/// headers (uppercase-led) or plain list items; `<ol>` is never emitted.
fn numbered_rest(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?.strip_prefix(' ')?;
    let rest = rest.trim_start();
    (!rest.is_empty()).then_some(rest)
}

/// The analysis-text formatter. Holds compiled inline patterns; `format`
/// is pure, so one instance can be shared across all requests.
pub struct Formatter {
    inline: InlineRules,
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            inline: InlineRules::new(),
        }
    }

    /// Transforms analysis text into an HTML fragment. Total: empty input
    /// yields a fixed placeholder, unknown constructs become paragraphs,
    /// and repeated calls on the same input are byte-identical.
    pub fn format(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return PLACEHOLDER.to_string();
        }

        let mut out: Vec<String> = Vec::new();
        let mut block = Block::Idle;
        let mut list_items: Vec<String> = Vec::new();

        for raw_line in text.lines() {
            let line = escape_html(raw_line.trim());

            match classify(&line, &block) {
                LineClass::Blank => {
                    flush_block(&mut out, &mut block);
                    flush_list(&mut out, &mut list_items);
                }
                LineClass::SectionHeader(full) => {
                    flush_list(&mut out, &mut list_items);
                    out.push(format!("<h2>{}</h2>", self.inline.apply(full)));
                }
                LineClass::PriorityOpen(severity) => {
                    flush_block(&mut out, &mut block);
                    flush_list(&mut out, &mut list_items);
                    block = Block::Priority {
                        severity,
                        fields: Vec::new(),
                    };
                }
                LineClass::PriorityField { label, text } => {
                    let rendered = self.inline.apply(text);
                    if let Block::Priority { fields, .. } = &mut block {
                        fields.push((label, rendered));
                    }
                }
                LineClass::Before(text) => {
                    flush_block(&mut out, &mut block);
                    flush_list(&mut out, &mut list_items);
                    out.push("<div class=\"before-after\">".to_string());
                    out.push(format!(
                        "<div class=\"before\"><strong>\u{274C} Before:</strong> {}</div>",
                        self.inline.apply(text)
                    ));
                    block = Block::BeforeAfter {
                        phase: Phase::Before,
                    };
                }
                LineClass::After(text) => {
                    // An `After` with no open rewrite block has nothing to
                    // pair with; the line is dropped.
                    if let Block::BeforeAfter { phase } = &mut block {
                        out.push(format!(
                            "<div class=\"after\"><strong>\u{2705} After:</strong> {}</div>",
                            self.inline.apply(text)
                        ));
                        *phase = Phase::After;
                    }
                }
                LineClass::WhyBetter(text) => {
                    out.push(format!(
                        "<div class=\"why\"><strong>Why this is better:</strong> {}</div>",
                        self.inline.apply(text)
                    ));
                    out.push("</div>".to_string());
                    block = Block::Idle;
                }
                LineClass::Verdict {
                    css_class,
                    label,
                    text,
                } => {
                    flush_list(&mut out, &mut list_items);
                    out.push(format!(
                        "<div class=\"verdict {}\"><strong>{}:</strong> {}</div>",
                        css_class,
                        label,
                        self.inline.apply(text)
                    ));
                }
                LineClass::H2(title) => {
                    flush_list(&mut out, &mut list_items);
                    out.push(format!("<h2>{}</h2>", self.inline.apply(title)));
                }
                LineClass::H3(title) => {
                    flush_list(&mut out, &mut list_items);
                    out.push(format!("<h3>{}</h3>", self.inline.apply(title)));
                }
                LineClass::Bullet(text) => {
                    list_items.push(self.inline.apply(text));
                }
                LineClass::Paragraph(text) => {
                    flush_list(&mut out, &mut list_items);
                    out.push(format!("<p>{}</p>", self.inline.apply(text)));
                }
            }
        }

        flush_block(&mut out, &mut block);
        flush_list(&mut out, &mut list_items);

        if out.is_empty() {
            return EMPTY_RESULT.to_string();
        }
        out.join("\n")
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Transition to `Idle`, emitting whatever the open block accumulated.
fn flush_block(out: &mut Vec<String>, block: &mut Block) {
    match std::mem::replace(block, Block::Idle) {
        Block::Idle => {}
        Block::Priority { severity, fields } => {
            out.push(format!(
                "<div class=\"priority-item {}\">",
                severity.css_class()
            ));
            out.push(format!(
                "<div class=\"priority-severity\">{}</div>",
                severity.label()
            ));
            for (label, text) in fields {
                out.push(format!(
                    "<div class=\"priority-field\"><strong>{label}:</strong> {text}</div>"
                ));
            }
            out.push("</div>".to_string());
        }
        Block::BeforeAfter { .. } => {
            // Wrapper div was opened when the `Before` line streamed out.
            out.push("</div>".to_string());
        }
    }
}

/// Wraps a contiguous run of list items in exactly one `<ul>`.
fn flush_list(out: &mut Vec<String>, items: &mut Vec<String>) {
    if items.is_empty() {
        return;
    }
    out.push("<ul>".to_string());
    for item in items.drain(..) {
        out.push(format!("<li>{item}</li>"));
    }
    out.push("</ul>".to_string());
}
