// HTML string → document tree.
//
// Parses via html5ever and lowers the `<body>` subtree into `dom::Element`.
// Input is wrapped in `<html><body>` so every tag is parsed in body mode.
// Doctypes are stripped first; comments and processing instructions are not
// carried over.

use std::sync::LazyLock;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;

use crate::dom::{Element, Node};

static DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!DOCTYPE[^>]*>").expect("doctype pattern"));

/// Parse an HTML document or fragment and return its `<body>` element.
///
/// Head-level tags such as `<title>` land in the body and are converted like
/// any other element. Parsing never fails; malformed markup is recovered by
/// html5ever.
pub fn parse_html(html: &str) -> Element {
    crate::log_debug!(bytes = html.len(), "parsing document");
    let dom = parse_rcdom(html);
    match find_body(&dom.document) {
        Some(body) => lower_element(&body),
        None => Element::new("body"),
    }
}

fn parse_rcdom(html: &str) -> RcDom {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let wrapped = format!("<html><body>{}</body></html>", DOCTYPE.replace_all(html, ""));
    parse_document(RcDom::default(), opts)
        .from_utf8()
        .one(wrapped.as_bytes())
}

/// Depth-first search for the first `<body>` element.
fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == "body" {
            return Some(handle.clone());
        }
    }
    handle.children.borrow().iter().find_map(find_body)
}

fn lower_element(handle: &Handle) -> Element {
    let mut el = match handle.data {
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let mut el = Element::new(name.local.as_ref());
            el.attrs = attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.as_ref().to_string(), a.value.to_string()))
                .collect();
            el
        }
        _ => Element::default(),
    };
    el.children = handle
        .children
        .borrow()
        .iter()
        .filter_map(lower_node)
        .collect();
    el
}

fn lower_node(handle: &Handle) -> Option<Node> {
    match handle.data {
        NodeData::Text { ref contents } => {
            let text = contents.borrow().to_string();
            (!text.is_empty()).then_some(Node::Text(text))
        }
        NodeData::Element { .. } => Some(Node::Element(lower_element(handle))),
        _ => None,
    }
}
