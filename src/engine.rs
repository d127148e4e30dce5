// Reusable converter with a frozen configuration.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dom::Element;
use crate::{dom_to_markdown, parse_html, Options};

/// A converter bound to one configuration.
///
/// Cloning is cheap; the options are shared. An engine can be used from
/// several threads at once since every conversion keeps its own state.
///
/// # Examples
///
/// ```
/// use html_md::{Engine, Options};
///
/// let engine = Engine::new(Options::new().with_bullet_marker("-"));
/// assert_eq!(engine.convert("<ul><li>a</li></ul>"), "- a");
///
/// let out = engine.convert_batch([("one.html", "<h1>One</h1>"), ("two.html", "<p>Two</p>")]);
/// assert_eq!(out["one.html"], "# One");
/// assert_eq!(out["two.html"], "Two");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: Arc<Options>,
}

impl Engine {
    /// Freeze `options` into a new engine.
    pub fn new(options: Options) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    /// The configuration this engine converts with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Convert one HTML document.
    pub fn convert(&self, html: &str) -> String {
        self.convert_dom(&parse_html(html))
    }

    /// Convert the children of an already-parsed element.
    pub fn convert_dom(&self, root: &Element) -> String {
        dom_to_markdown::convert(root, &self.options)
    }

    /// Convert a named collection of HTML documents.
    pub fn convert_batch<I, K, V>(&self, files: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        convert_all(files, &self.options)
    }
}

impl From<Options> for Engine {
    fn from(options: Options) -> Self {
        Self::new(options)
    }
}

/// Convert every document independently. With the `parallel` feature the
/// documents are spread across the rayon thread pool.
pub(crate) fn convert_all<I, K, V>(files: I, options: &Options) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let files: Vec<(String, V)> = files.into_iter().map(|(k, v)| (k.into(), v)).collect();
    crate::log_debug!(documents = files.len(), "converting batch");
    convert_each(files, options)
}

#[cfg(not(feature = "parallel"))]
fn convert_each<V: AsRef<str>>(
    files: Vec<(String, V)>,
    options: &Options,
) -> BTreeMap<String, String> {
    files
        .into_iter()
        .map(|(name, html)| {
            let md = dom_to_markdown::convert(&parse_html(html.as_ref()), options);
            (name, md)
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn convert_each<V: AsRef<str>>(
    files: Vec<(String, V)>,
    options: &Options,
) -> BTreeMap<String, String> {
    use rayon::prelude::*;

    let docs: Vec<(&str, &str)> = files
        .iter()
        .map(|(name, html)| (name.as_str(), html.as_ref()))
        .collect();
    docs.par_iter()
        .map(|&(name, html)| {
            let md = dom_to_markdown::convert(&parse_html(html), options);
            (name.to_string(), md)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_is_reusable() {
        let engine = Engine::new(Options::new().with_bullet_marker("-"));
        assert_eq!(engine.convert("<ul><li>a</li></ul>"), "- a");
        assert_eq!(engine.convert("<ul><li>b</li></ul>"), "- b");
    }

    #[test]
    fn conversions_do_not_share_references() {
        let engine = Engine::new(Options::new().with_ref_links(true));
        let first = engine.convert(r#"<a href="u">x</a>"#);
        let second = engine.convert(r#"<a href="v">y</a>"#);
        assert_eq!(first, "[x][1]\n\n[1]: u");
        assert_eq!(second, "[y][1]\n\n[1]: v");
    }

    #[test]
    fn batch_keeps_names() {
        let engine = Engine::default();
        let out = engine.convert_batch(vec![
            ("file1.html".to_string(), "<h1>Hello</h1>".to_string()),
            ("file2.html".to_string(), "<p>World</p>".to_string()),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out["file1.html"], "# Hello");
        assert_eq!(out["file2.html"], "World");
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
