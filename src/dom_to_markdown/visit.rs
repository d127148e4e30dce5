// Children visitor: renders every child of a node and joins the fragments.
//
// Spacing between two fragments is the stronger of their two requirements.
// Newlines are only ever topped up, never removed, so a fragment that already
// ends in a blank line is not padded again.

use super::handlers::dispatch;
use super::text::process_text;
use super::{is_blank, Context, Spacing, State};
use crate::dom::{Element, Node};

/// Render the children of `parent` into one string.
pub(crate) fn visit_children(state: &mut State, parent: &Element, ctx: Context) -> String {
    let mut out = String::new();
    let mut prev = Spacing::Inline;

    for child in &parent.children {
        let (text, spacing, is_text) = match child {
            Node::Text(raw) => match process_text(raw, state.options, ctx) {
                Some(text) => (text, Spacing::Inline, true),
                None => continue,
            },
            Node::Element(el) => match dispatch(state, el, parent, ctx) {
                Some(fragment) => (fragment.text, fragment.spacing, false),
                None => continue,
            },
        };
        if text.is_empty() {
            continue;
        }

        // Inter-element whitespace is a single space, and only between content.
        if is_text && is_blank(&text) {
            if out.is_empty() || out.ends_with(char::is_whitespace) {
                continue;
            }
            out.push(' ');
            prev = Spacing::Inline;
            continue;
        }

        let gap = spacing.max(prev);
        if gap > Spacing::Inline && !out.is_empty() {
            pad_trailing_newlines(&mut out, gap.newlines());
        }

        // Abutting delimiters would merge into a different token: **a****b**
        if gap == Spacing::Inline && collides(&out, &text) {
            out.push(' ');
        }

        out.push_str(&text);
        prev = spacing;
    }

    if prev > Spacing::Inline && !out.is_empty() {
        pad_trailing_newlines(&mut out, prev.newlines());
    }

    out
}

fn collides(out: &str, next: &str) -> bool {
    match (out.chars().next_back(), next.chars().next()) {
        (Some(last), Some(first)) => last == first && matches!(last, '*' | '_' | '~' | '`'),
        _ => false,
    }
}

/// Ensure `s` ends with at least `n` newlines.
pub(crate) fn pad_trailing_newlines(s: &mut String, n: usize) {
    let trailing = s.len() - s.trim_end_matches('\n').len();
    for _ in trailing..n {
        s.push('\n');
    }
}
