// Document tree → Markdown string, in a single pass.
//
// Each element handler returns a finished Markdown fragment together with the
// vertical spacing it needs from its siblings. The children visitor joins
// fragments, and the finalizer appends reference definitions and caps blank
// lines. There is no intermediate Markdown tree.

pub(crate) mod blocks;
pub(crate) mod handlers;
pub(crate) mod tags;
pub(crate) mod text;
pub(crate) mod visit;

use indexmap::IndexSet;

use crate::dom::Element;
use crate::Options;

/// Code block output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeBlockStyle {
    /// Body between fence lines, language on the opening fence (default).
    #[default]
    Fenced,
    /// Every line prefixed with four spaces.
    Indented,
}

/// Vertical separation a fragment needs from its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Spacing {
    /// Flows on the same line.
    Inline,
    /// Own line.
    Line,
    /// Separated by a blank line.
    Block,
}

impl Spacing {
    /// Number of newlines that must separate two fragments.
    pub(crate) fn newlines(self) -> usize {
        match self {
            Spacing::Inline => 0,
            Spacing::Line => 1,
            Spacing::Block => 2,
        }
    }
}

/// A rendered element: Markdown text plus its spacing requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fragment {
    pub text: String,
    pub spacing: Spacing,
}

impl Fragment {
    pub(crate) fn inline(text: impl Into<String>) -> Option<Self> {
        Some(Self {
            text: text.into(),
            spacing: Spacing::Inline,
        })
    }

    pub(crate) fn block(text: impl Into<String>) -> Option<Self> {
        Some(Self {
            text: text.into(),
            spacing: Spacing::Block,
        })
    }

    pub(crate) fn with_spacing(text: impl Into<String>, spacing: Spacing) -> Option<Self> {
        Some(Self {
            text: text.into(),
            spacing,
        })
    }
}

/// Per-subtree rendering context. Copied, never shared, between siblings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Context {
    /// Suppress character and line-lead escaping.
    pub raw: bool,
    /// Keep whitespace exactly as written.
    pub literal_ws: bool,
    /// List nesting depth.
    pub depth: usize,
}

impl Context {
    /// Context for the items of a list.
    pub(crate) fn nested(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    /// Context for preformatted content.
    pub(crate) fn literal(self) -> Self {
        Self {
            raw: true,
            literal_ws: true,
            ..self
        }
    }
}

/// URLs collected for reference-style links, in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct References {
    urls: IndexSet<String>,
}

impl References {
    /// 1-based label for `url`, registering it on first use.
    pub(crate) fn label(&mut self, url: &str) -> usize {
        if let Some(index) = self.urls.get_index_of(url) {
            return index + 1;
        }
        let (index, _) = self.urls.insert_full(url.to_string());
        index + 1
    }

    pub(crate) fn len(&self) -> usize {
        self.urls.len()
    }

    fn definitions(&self) -> impl Iterator<Item = (usize, &str)> {
        self.urls.iter().enumerate().map(|(i, url)| (i + 1, url.as_str()))
    }
}

/// State threaded through one conversion.
pub(crate) struct State<'a> {
    pub options: &'a Options,
    pub refs: References,
}

impl<'a> State<'a> {
    fn new(options: &'a Options) -> Self {
        Self {
            options,
            refs: References::default(),
        }
    }

    /// Whether the user asked for this tag's subtree to be dropped.
    pub(crate) fn skips(&self, tag: &str) -> bool {
        self.options
            .skip_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Whether the user promoted this tag to block spacing.
    pub(crate) fn forces_block(&self, tag: &str) -> bool {
        self.options
            .extra_block_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Convert the children of `root` to Markdown.
pub(crate) fn convert(root: &Element, options: &Options) -> String {
    let mut state = State::new(options);
    let md = visit::visit_children(&mut state, root, Context::default());
    crate::log_debug!(
        bytes = md.len(),
        references = state.refs.len(),
        "document rendered"
    );
    finish(md, options, &state.refs)
}

/// Append reference definitions, cap blank lines, trim.
fn finish(mut md: String, options: &Options, refs: &References) -> String {
    if refs.len() > 0 {
        md.push_str("\n\n");
        for (label, url) in refs.definitions() {
            md.push_str(&format!("[{label}]: {url}\n"));
        }
    }
    if options.max_blank_lines > 0 {
        md = cap_blank_lines(&md, options.max_blank_lines);
    }
    md.trim().to_string()
}

/// Replace every run of more than `max` consecutive `[ \t]*\n` segments with
/// exactly `max` newlines.
pub(crate) fn cap_blank_lines(text: &str, max: usize) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        let (end, lines) = blank_run(bytes, i);
        if lines > max {
            out.push_str(&text[copied..i]);
            out.push_str(&"\n".repeat(max));
            copied = end;
            i = end;
        } else if lines > 0 {
            i = end;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Count consecutive `[ \t]*\n` segments starting at `start`.
/// Returns the end offset of the last complete segment and the count.
fn blank_run(bytes: &[u8], start: usize) -> (usize, usize) {
    let mut end = start;
    let mut lines = 0;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' => i += 1,
            b'\n' => {
                i += 1;
                end = i;
                lines += 1;
            }
            _ => break,
        }
    }
    (end, lines)
}

/// Whether `s` contains no non-whitespace character.
pub(crate) fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}
