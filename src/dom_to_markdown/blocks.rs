// Structural handlers: code blocks, lists, blockquotes and tables.
//
// Each owns a small layout algorithm over already-rendered child text.

use std::sync::LazyLock;

use regex::Regex;

use super::text::collapse_line_breaks;
use super::visit::visit_children;
use super::{is_blank, CodeBlockStyle, Context, Fragment, Spacing, State};
use crate::dom::{Element, Node};

static LANGUAGE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:language|lang)-(\S+)").expect("language class pattern"));

static QUOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(>*)[ \t]?").expect("quote prefix pattern"));

// ---------------------------------------------------------------------------
// Code blocks
// ---------------------------------------------------------------------------

/// `<pre>`, with or without a nested `<code>`.
pub(crate) fn code_block(state: &mut State, pre: &Element, ctx: Context) -> Option<Fragment> {
    let (lang, body) = match pre.first_child("CODE") {
        Some(code) => (language(code), code_text(code)),
        None => (language(pre), visit_children(state, pre, ctx.literal())),
    };
    let options = state.options;
    let text = match options.code_block_style {
        CodeBlockStyle::Indented => indent_lines(&body, "    "),
        CodeBlockStyle::Fenced => {
            let fence = &options.code_fence;
            format!("{fence}{lang}\n{body}\n{fence}")
        }
    };
    Fragment::block(text)
}

/// Language hint from a `language-*` or `lang-*` class.
fn language(el: &Element) -> String {
    el.attr("class")
        .and_then(|class| LANGUAGE_CLASS.captures(class))
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Literal text of a code element. Structure is flattened without spacing,
/// except: `<br>` is a newline, `<hr>` is `---`, headings are `[text]` and
/// images are dropped.
fn code_text(code: &Element) -> String {
    let mut out = String::new();
    walk_code(code, &mut out);
    out
}

fn walk_code(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => match child.tag.as_str() {
                "BR" => out.push('\n'),
                "HR" => out.push_str("---"),
                "IMG" => {}
                "H1" | "H2" | "H3" | "H4" | "H5" | "H6" => {
                    out.push('[');
                    walk_code(child, out);
                    out.push(']');
                }
                _ => walk_code(child, out),
            },
        }
    }
}

fn indent_lines(body: &str, prefix: &str) -> String {
    body.split('\n')
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// `<ul>` / `<ol>`. Blank items are dropped and do not consume a number.
pub(crate) fn list(
    state: &mut State,
    el: &Element,
    ordered: bool,
    ctx: Context,
) -> Option<Fragment> {
    let indent = state.options.indent.repeat(ctx.depth);
    let item_ctx = ctx.nested();
    let mut items: Vec<String> = Vec::new();

    for li in el.child_elements().filter(|child| child.is("LI")) {
        let content = visit_children(state, li, item_ctx);
        if is_blank(&content) {
            continue;
        }

        let marker = if ordered {
            format!("{}. ", items.len() + 1)
        } else {
            format!("{} ", state.options.bullet_marker)
        };
        let continuation = format!("{indent}{}", " ".repeat(marker.chars().count()));
        let body = indent_continuations(content.trim_matches('\n'), &continuation);
        let body = normalize_hard_breaks(&body);

        items.push(format!("{indent}{marker}{body}"));
    }

    if items.is_empty() {
        return None;
    }
    let spacing = if ctx.depth > 0 {
        Spacing::Line
    } else {
        Spacing::Block
    };
    Fragment::with_spacing(items.join("\n"), spacing)
}

/// Replace each newline run inside an item with a hard break followed by the
/// continuation indent, unless the next line starts a nested list item or a
/// table row.
fn indent_continuations(body: &str, continuation: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(pos) = rest.find('\n') {
        let (line, tail) = rest.split_at(pos);
        let after = tail.trim_start_matches('\n');
        out.push_str(line);
        if starts_own_line(after) {
            out.push_str(&tail[..tail.len() - after.len()]);
        } else {
            out.push_str("  \n");
            out.push_str(continuation);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Whether a line (after leading whitespace) is a list marker or table row.
fn starts_own_line(line: &str) -> bool {
    let line = line.trim_start();
    let mut chars = line.chars();
    match chars.next() {
        Some('-' | '*' | '+') => matches!(chars.next(), Some(' ' | '\t')),
        Some('|') => true,
        Some(c) if c.is_ascii_digit() => {
            let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            let mut rest = line[digits..].chars();
            rest.next() == Some('.') && matches!(rest.next(), Some(' ' | '\t'))
        }
        _ => false,
    }
}

/// Trailing blanks after content become exactly two spaces (a hard break).
fn normalize_hard_breaks(body: &str) -> String {
    body.split('\n')
        .map(|line| {
            let content = line.trim_end_matches([' ', '\t']);
            let ends_visible = content.chars().next_back().is_some_and(|c| !c.is_whitespace());
            if content.len() < line.len() && ends_visible {
                format!("{content}  ")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Blockquotes
// ---------------------------------------------------------------------------

/// `<blockquote>`. Nested quotes extend the existing `>` prefix.
pub(crate) fn blockquote(state: &mut State, el: &Element, ctx: Context) -> Option<Fragment> {
    let content = visit_children(state, el, ctx);
    if is_blank(&content) {
        return None;
    }
    let quoted = QUOTE_PREFIX.replace_all(content.trim_matches('\n'), ">${1} ");
    Fragment::block(quoted)
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Grid {
    caption: Option<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl Grid {
    fn push_row(&mut self, cells: Vec<String>) {
        for (i, cell) in cells.iter().enumerate() {
            let width = cell.chars().count();
            match self.widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => self.widths.push(width),
            }
        }
        self.rows.push(cells);
    }

    fn render(&self) -> Option<String> {
        let rows: Vec<&Vec<String>> = self
            .rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();
        if rows.is_empty() {
            return None;
        }

        let mut lines = Vec::with_capacity(rows.len() + 2);
        if let Some(caption) = &self.caption {
            lines.push(format!("__{caption}__"));
        }
        for (r, row) in rows.iter().enumerate() {
            let mut line = String::from("|");
            for (c, width) in self.widths.iter().enumerate() {
                let cell = row.get(c).map(String::as_str).unwrap_or_default();
                let pad = width.saturating_sub(cell.chars().count());
                line.push_str(&format!(" {cell}{} |", " ".repeat(pad)));
            }
            lines.push(line);
            if r == 0 {
                let mut sep = String::from("|");
                for width in &self.widths {
                    sep.push_str(&format!(" {} |", "-".repeat(*width)));
                }
                lines.push(sep);
            }
        }
        Some(lines.join("\n"))
    }
}

/// `<table>`. The first non-empty row becomes the header.
pub(crate) fn table(state: &mut State, el: &Element, ctx: Context) -> Option<Fragment> {
    let mut grid = Grid::default();
    gather_rows(state, el, ctx, &mut grid);
    Fragment::block(grid.render()?)
}

fn gather_rows(state: &mut State, el: &Element, ctx: Context, grid: &mut Grid) {
    for child in el.child_elements() {
        match child.tag.as_str() {
            "CAPTION" => {
                let caption = child.text_content();
                let caption = caption.trim();
                if !caption.is_empty() {
                    grid.caption = Some(caption.to_string());
                }
            }
            "THEAD" | "TBODY" | "TFOOT" => gather_rows(state, child, ctx, grid),
            "TR" => {
                let cells: Vec<String> = child
                    .child_elements()
                    .filter(|cell| cell.is("TD") || cell.is("TH"))
                    .map(|cell| cell_text(state, cell, ctx))
                    .collect();
                if !cells.is_empty() {
                    grid.push_row(cells);
                }
            }
            _ => {}
        }
    }
}

fn cell_text(state: &mut State, cell: &Element, ctx: Context) -> String {
    let content = visit_children(state, cell, ctx);
    let content = content.trim_matches('\n').replace('|', "\\|");
    collapse_line_breaks(&content).trim().to_string()
}
