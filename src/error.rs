/// Errors that can occur while configuring a conversion.
///
/// Conversion itself is total: once an [`Options`](crate::Options) value
/// exists, every input document produces Markdown.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HtmlToMarkdownError {
    #[error("invalid rewrite pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
