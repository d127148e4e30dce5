// Find/replace rules applied to text nodes.
//
// Escaping and user replacements share one representation: a compiled regex
// plus a replacement string that may reference capture groups (`$1`, `${name}`).
// Rules are applied with `replace_all`, in the order they are configured.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::HtmlToMarkdownError;

/// A compiled find/replace rule.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pattern: Regex,
    replacement: String,
}

impl Rewrite {
    /// Compile a rule. Fails if `pattern` is not a valid regex.
    ///
    /// # Examples
    ///
    /// ```
    /// use html_md::Rewrite;
    ///
    /// let rule = Rewrite::new(r"(\d+)px", "${1} pixels").unwrap();
    /// assert_eq!(rule.apply("12px wide"), "12 pixels wide");
    /// assert!(Rewrite::new("(", "").is_err());
    /// ```
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, HtmlToMarkdownError> {
        let pattern = Regex::new(pattern).map_err(|source| HtmlToMarkdownError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    fn from_regex(pattern: &Regex, replacement: &str) -> Self {
        Self {
            pattern: pattern.clone(),
            replacement: replacement.to_string(),
        }
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The replacement template.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replace every match in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement.as_str())
    }
}

static CHAR_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\\`*_~\[\]]").expect("char escape pattern"));

static LEAD_BLOCK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\s*)([-=>]|#{1,6}[ \t]|\+[ \t])").expect("line lead pattern")
});

static LEAD_ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\s*\d+)(\.[ \t])").expect("ordered lead pattern"));

/// Backslash-escape characters that carry inline Markdown meaning.
pub(crate) fn default_char_escape() -> Rewrite {
    Rewrite::from_regex(&CHAR_ESCAPE, r"\${0}")
}

/// Backslash-escape markers that would open a block construct at a line start:
/// list bullets, setext underlines, blockquotes, ATX headings, ordered items.
pub(crate) fn default_line_lead_escape() -> Vec<Rewrite> {
    vec![
        Rewrite::from_regex(&LEAD_BLOCK_MARKER, r"${1}\${2}"),
        Rewrite::from_regex(&LEAD_ORDERED_MARKER, r"${1}\${2}"),
    ]
}
