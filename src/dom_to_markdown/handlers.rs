// Element dispatch and the inline handlers.
//
// `dispatch` classifies an element once and routes it to a handler. Each
// handler returns `None` when the element produces no output.

use std::sync::LazyLock;

use regex::Regex;

use super::blocks;
use super::tags::TagKind;
use super::text::{collapse_line_breaks, wrap_mark};
use super::visit::visit_children;
use super::{is_blank, Context, Fragment, State};
use crate::dom::Element;

static ENCODED_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%2([89])").expect("encoded paren pattern"));

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Render one element. `parent` is the element whose children are being visited.
pub(crate) fn dispatch(
    state: &mut State,
    el: &Element,
    parent: &Element,
    ctx: Context,
) -> Option<Fragment> {
    let kind = TagKind::of(&el.tag);
    if kind == TagKind::Skip || state.skips(&el.tag) {
        crate::log_trace!(tag = %el.tag, "skipping subtree");
        return None;
    }

    let options = state.options;
    match kind {
        TagKind::Skip => None,
        TagKind::LineBreak => Fragment::inline("  \n"),
        TagKind::Rule => Fragment::block("---"),
        TagKind::Image => image(state, el),
        TagKind::Heading(level) => heading(state, el, level, ctx),
        TagKind::Strong => inline_mark(state, el, &options.strong_mark, ctx),
        TagKind::Emphasis => inline_mark(state, el, &options.emphasis_mark, ctx),
        TagKind::Strike => inline_mark(state, el, &options.strike_mark, ctx),
        TagKind::Code if !parent.is("PRE") => inline_code(el),
        TagKind::Pre => blocks::code_block(state, el, ctx),
        TagKind::Link => link(state, el, ctx),
        TagKind::List { ordered } => blocks::list(state, el, ordered, ctx),
        TagKind::Blockquote => blocks::blockquote(state, el, ctx),
        TagKind::Table => blocks::table(state, el, ctx),
        TagKind::TablePart => flatten(state, el, ctx),
        // `<code>` under `<pre>` is rendered by the code block handler.
        TagKind::Code | TagKind::Phrasing | TagKind::Block => fallback(state, el, kind, ctx),
    }
}

/// Children joined as-is, no added spacing.
fn flatten(state: &mut State, el: &Element, ctx: Context) -> Option<Fragment> {
    let content = visit_children(state, el, ctx);
    if content.is_empty() {
        return None;
    }
    Fragment::inline(content)
}

fn fallback(state: &mut State, el: &Element, kind: TagKind, ctx: Context) -> Option<Fragment> {
    if kind == TagKind::Phrasing && !state.forces_block(&el.tag) {
        return flatten(state, el, ctx);
    }
    let content = visit_children(state, el, ctx);
    if is_blank(&content) {
        return None;
    }
    Fragment::block(content)
}

// ---------------------------------------------------------------------------
// Headings and inline formatting
// ---------------------------------------------------------------------------

fn heading(state: &mut State, el: &Element, level: usize, ctx: Context) -> Option<Fragment> {
    let content = visit_children(state, el, ctx);
    if is_blank(&content) {
        return None;
    }
    Fragment::block(format!("{} {}", "#".repeat(level), content.trim()))
}

fn inline_mark(state: &mut State, el: &Element, mark: &str, ctx: Context) -> Option<Fragment> {
    let content = visit_children(state, el, ctx);
    if is_blank(&content) {
        return None;
    }
    Fragment::inline(wrap_mark(&content, mark))
}

/// Inline code span. The fence is one backtick longer than the longest
/// backtick run in the content.
fn inline_code(el: &Element) -> Option<Fragment> {
    let text = el.text_content();
    if text.is_empty() {
        return None;
    }
    let fence = "`".repeat(longest_backtick_run(&text) + 1);
    let pad = if fence.len() > 1 { " " } else { "" };
    Fragment::inline(format!("{fence}{pad}{text}{pad}{fence}"))
}

fn longest_backtick_run(s: &str) -> usize {
    let mut max = 0;
    let mut current = 0;
    for c in s.chars() {
        if c == '`' {
            current += 1;
            max = max.max(current);
        } else {
            current = 0;
        }
    }
    max
}

// ---------------------------------------------------------------------------
// Links and images
// ---------------------------------------------------------------------------

fn link(state: &mut State, el: &Element, ctx: Context) -> Option<Fragment> {
    let href = match el.attr("href") {
        Some(href) if !href.is_empty() => href,
        _ => return flatten(state, el, ctx),
    };
    let encoded = encode_href(href);
    let content = visit_children(state, el, ctx);
    let text = collapse_line_breaks(&content);
    let text = text.trim();

    if state.options.autolinks && (text == href || text == encoded) {
        return Fragment::inline(format!("<{encoded}>"));
    }
    if state.options.ref_links {
        let label = state.refs.label(&encoded);
        return Fragment::inline(format!("[{text}][{label}]"));
    }
    let title = el.attr("title").unwrap_or_default();
    Fragment::inline(format!("[{text}]({encoded}{})", title_clause(title)))
}

/// Percent-encode the characters that Markdown would read as syntax inside a
/// link destination. Already-encoded parentheses are decoded first so they
/// are not encoded twice.
fn encode_href(href: &str) -> String {
    let decoded = ENCODED_PAREN.replace_all(href, |caps: &regex::Captures| {
        if &caps[1] == "8" {
            "("
        } else {
            ")"
        }
    });
    let mut out = String::with_capacity(decoded.len());
    for c in decoded.chars() {
        match c {
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '_' => out.push_str("%5F"),
            '*' => out.push_str("%2A"),
            c => out.push(c),
        }
    }
    out
}

fn image(state: &State, el: &Element) -> Option<Fragment> {
    let src = el.attr("src").unwrap_or_default();
    if src.is_empty() {
        return None;
    }
    if is_data_uri(src) && !state.options.keep_data_images {
        crate::log_trace!(bytes = src.len(), "dropping data URI image");
        return None;
    }
    let alt = el.attr("alt").unwrap_or_default();
    let title = el.attr("title").unwrap_or_default();
    Fragment::inline(format!("![{alt}]({src}{})", title_clause(title)))
}

fn is_data_uri(src: &str) -> bool {
    src.get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

fn title_clause(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" \"{title}\"")
    }
}
