// Document tree consumed by the converter.
//
// A deliberately small model: text and elements only. Tag names are stored
// uppercase so classification can match on string literals. The converter
// never mutates a tree; it only borrows it.

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Raw character data, entities already decoded.
    Text(String),
    /// An element with its attributes and children.
    Element(Element),
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Uppercase tag name, e.g. `"UL"`.
    pub tag: String,
    /// Attributes in source order. Names are lowercase.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element. The tag name is normalized to uppercase.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether this element has the given (uppercase) tag name.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Iterate over direct element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First direct child element with the given tag.
    pub fn first_child(&self, tag: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.is(tag))
    }

    /// Concatenated text of all descendants, with no formatting.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(e, out),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_uppercased() {
        assert_eq!(Element::new("blockQuote").tag, "BLOCKQUOTE");
    }

    #[test]
    fn attr_lookup() {
        let a = Element::new("a").with_attr("HREF", "x").with_attr("title", "t");
        assert_eq!(a.attr("href"), Some("x"));
        assert_eq!(a.attr("title"), Some("t"));
        assert_eq!(a.attr("alt"), None);
    }

    #[test]
    fn text_content_flattens_descendants() {
        let p = Element::new("p")
            .with_text("a ")
            .with_child(Element::new("b").with_text("b"))
            .with_child(Element::new("i").with_child(Element::new("span").with_text(" c")));
        assert_eq!(p.text_content(), "a b c");
    }

    #[test]
    fn first_child_ignores_text_and_grandchildren() {
        let pre = Element::new("pre")
            .with_text("x")
            .with_child(Element::new("span").with_child(Element::new("code")))
            .with_child(Element::new("code").with_attr("class", "lang-rs"));
        let code = pre.first_child("CODE").map(|c| c.attr("class"));
        assert_eq!(code, Some(Some("lang-rs")));
    }
}
