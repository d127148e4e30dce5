// html-md: single-pass HTML to Markdown converter.
//
// Architecture:
//   HTML string → html5ever parse → dom::Element → dom_to_markdown → Markdown
//
// Every element handler returns finished Markdown text plus a spacing hint;
// the parent joins its children. No Markdown AST is built.

#[cfg(feature = "tracing")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

pub(crate) use log_debug;
pub(crate) use log_trace;

pub mod dom;
mod dom_to_markdown;
mod engine;
mod error;
mod parse;
mod rewrite;

use std::collections::BTreeMap;

pub use dom_to_markdown::CodeBlockStyle;
pub use engine::Engine;
pub use error::HtmlToMarkdownError;
pub use parse::parse_html;
pub use rewrite::Rewrite;

/// Conversion options.
///
/// Fixed for the duration of a conversion and never mutated by it, so one
/// value can be shared across threads.
#[derive(Debug, Clone)]
pub struct Options {
    /// Fence for fenced code blocks. Default: ```` ``` ````.
    pub code_fence: String,
    /// Unordered list marker. Default: `"*"`.
    pub bullet_marker: String,
    /// Indentation unit per list nesting level. Default: two spaces.
    pub indent: String,
    /// Fenced or indented code blocks. Default: fenced.
    pub code_block_style: CodeBlockStyle,
    /// Emphasis delimiter. Default: `"_"`.
    pub emphasis_mark: String,
    /// Strong delimiter. Default: `"**"`.
    pub strong_mark: String,
    /// Strikethrough delimiter. Default: `"~~"`.
    pub strike_mark: String,
    /// Longest run of consecutive line breaks kept in the output; `0`
    /// disables the cap. Default: `3`.
    pub max_blank_lines: usize,
    /// Tags whose whole subtree is dropped (case-insensitive).
    pub skip_tags: Vec<String>,
    /// Inline tags rendered with block spacing instead (case-insensitive).
    pub extra_block_tags: Vec<String>,
    /// Escape applied to all text outside code. `None` disables it.
    pub char_escape: Option<Rewrite>,
    /// Escapes applied at line starts, after `char_escape`.
    pub line_lead_escape: Vec<Rewrite>,
    /// User replacements, applied last to every text node.
    pub text_replacements: Vec<Rewrite>,
    /// Keep `data:` URI images. Default: `false`.
    pub keep_data_images: bool,
    /// Emit `[text][n]` links with trailing definitions. Default: `false`.
    pub ref_links: bool,
    /// Emit `<url>` when link text equals its href. Default: `true`.
    pub autolinks: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            code_fence: "```".to_string(),
            bullet_marker: "*".to_string(),
            indent: "  ".to_string(),
            code_block_style: CodeBlockStyle::Fenced,
            emphasis_mark: "_".to_string(),
            strong_mark: "**".to_string(),
            strike_mark: "~~".to_string(),
            max_blank_lines: 3,
            skip_tags: Vec::new(),
            extra_block_tags: Vec::new(),
            char_escape: Some(rewrite::default_char_escape()),
            line_lead_escape: rewrite::default_line_lead_escape(),
            text_replacements: Vec::new(),
            keep_data_images: false,
            ref_links: false,
            autolinks: true,
        }
    }
}

impl Options {
    /// Create a new Options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the code fence string.
    pub fn with_code_fence(mut self, fence: impl Into<String>) -> Self {
        self.code_fence = fence.into();
        self
    }

    /// Set the unordered list marker.
    pub fn with_bullet_marker(mut self, marker: impl Into<String>) -> Self {
        self.bullet_marker = marker.into();
        self
    }

    /// Set the list nesting indentation unit.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the code block style.
    pub fn with_code_block_style(mut self, style: CodeBlockStyle) -> Self {
        self.code_block_style = style;
        self
    }

    /// Set the emphasis delimiter.
    pub fn with_emphasis_mark(mut self, mark: impl Into<String>) -> Self {
        self.emphasis_mark = mark.into();
        self
    }

    /// Set the strong delimiter.
    pub fn with_strong_mark(mut self, mark: impl Into<String>) -> Self {
        self.strong_mark = mark.into();
        self
    }

    /// Set the strikethrough delimiter.
    pub fn with_strike_mark(mut self, mark: impl Into<String>) -> Self {
        self.strike_mark = mark.into();
        self
    }

    /// Set the blank line cap.
    pub fn with_max_blank_lines(mut self, max: usize) -> Self {
        self.max_blank_lines = max;
        self
    }

    /// Set the tags whose subtrees are dropped.
    pub fn with_skip_tags(mut self, tags: Vec<String>) -> Self {
        self.skip_tags = tags;
        self
    }

    /// Set the inline tags promoted to block spacing.
    pub fn with_extra_block_tags(mut self, tags: Vec<String>) -> Self {
        self.extra_block_tags = tags;
        self
    }

    /// Set (or disable, with `None`) the character escape.
    pub fn with_char_escape(mut self, rule: Option<Rewrite>) -> Self {
        self.char_escape = rule;
        self
    }

    /// Set the line-start escapes.
    pub fn with_line_lead_escape(mut self, rules: Vec<Rewrite>) -> Self {
        self.line_lead_escape = rules;
        self
    }

    /// Set the user text replacements.
    pub fn with_text_replacements(mut self, rules: Vec<Rewrite>) -> Self {
        self.text_replacements = rules;
        self
    }

    /// Set whether `data:` URI images are kept.
    pub fn with_keep_data_images(mut self, keep: bool) -> Self {
        self.keep_data_images = keep;
        self
    }

    /// Set whether links are written reference-style.
    pub fn with_ref_links(mut self, ref_links: bool) -> Self {
        self.ref_links = ref_links;
        self
    }

    /// Set whether autolinks are used.
    pub fn with_autolinks(mut self, autolinks: bool) -> Self {
        self.autolinks = autolinks;
        self
    }
}

/// Convert an HTML string to Markdown using default options.
///
/// # Examples
///
/// ```
/// let md = html_md::convert("<h1>Hello</h1><p>World</p>");
/// assert_eq!(md, "# Hello\n\nWorld");
/// ```
pub fn convert(html: &str) -> String {
    convert_with(html, &Options::default())
}

/// Convert an HTML string to Markdown with custom options.
///
/// # Examples
///
/// ```
/// use html_md::{convert_with, Options};
///
/// let options = Options::new().with_bullet_marker("-");
/// assert_eq!(convert_with("<ul><li>item</li></ul>", &options), "- item");
/// ```
pub fn convert_with(html: &str, options: &Options) -> String {
    convert_dom(&parse_html(html), options)
}

/// Convert the children of an already-parsed element to Markdown.
pub fn convert_dom(root: &dom::Element, options: &Options) -> String {
    dom_to_markdown::convert(root, options)
}

/// Convert a named collection of HTML documents that share one configuration.
pub fn convert_batch<I, K, V>(files: I, options: &Options) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    engine::convert_all(files, options)
}
