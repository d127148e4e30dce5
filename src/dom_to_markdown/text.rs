// Text node processing and inline delimiter wrapping.

use std::sync::LazyLock;

use regex::Regex;

use super::{is_blank, Context};
use crate::Options;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n)+").expect("line break pattern"));

/// Normalize and escape a raw text node.
///
/// Outside preformatted content, whitespace runs collapse to one space.
/// Escaping (character, then line-lead) is skipped in raw contexts; user
/// replacements always run last. Returns `None` when nothing remains.
pub(crate) fn process_text(raw: &str, options: &Options, ctx: Context) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let mut s = if ctx.literal_ws {
        raw.to_string()
    } else {
        WHITESPACE_RUN.replace_all(raw, " ").into_owned()
    };

    if !ctx.raw {
        if let Some(rule) = &options.char_escape {
            s = rule.apply(&s).into_owned();
        }
        for rule in &options.line_lead_escape {
            s = rule.apply(&s).into_owned();
        }
    }

    for rule in &options.text_replacements {
        s = rule.apply(&s).into_owned();
    }

    if !ctx.literal_ws {
        if raw.starts_with('\n') {
            let body = s.trim_start();
            if body.len() < s.len() {
                s = format!(" {body}");
            }
        }
        if !raw.ends_with(char::is_whitespace) {
            s.truncate(s.trim_end().len());
        }
    }

    (!s.is_empty()).then_some(s)
}

/// Join soft-wrapped lines into one.
pub(crate) fn collapse_line_breaks(s: &str) -> String {
    LINE_BREAKS.replace_all(s, " ").into_owned()
}

/// Wrap `content` in `mark`, keeping outer whitespace outside the delimiters.
///
/// Unescaped copies of `mark` already inside the content are removed so nested
/// same-type elements produce a single wrap. Multi-line content is wrapped line
/// by line.
pub(crate) fn wrap_mark(content: &str, mark: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let (lead, inner, trail) = split_outer_whitespace(content);
    if inner.is_empty() {
        return content.to_string();
    }

    let inner = strip_unescaped(inner, mark);
    if is_blank(&inner) {
        return format!("{lead}{trail}");
    }

    if inner.contains('\n') {
        let lines: Vec<String> = inner
            .split('\n')
            .map(|line| match line.strip_suffix('\r') {
                Some(line) => format!("{}\r", wrap_line(line, mark)),
                None => wrap_line(line, mark),
            })
            .collect();
        return format!("{lead}{}{trail}", lines.join("\n"));
    }

    format!("{lead}{mark}{inner}{mark}{trail}")
}

fn wrap_line(line: &str, mark: &str) -> String {
    if is_blank(line) {
        return line.to_string();
    }
    let (lead, mid, trail) = split_outer_whitespace(line);
    format!("{lead}{mark}{mid}{mark}{trail}")
}

fn split_outer_whitespace(s: &str) -> (&str, &str, &str) {
    let start = s.len() - s.trim_start().len();
    let (lead, rest) = s.split_at(start);
    let inner = rest.trim_end();
    (lead, inner, &rest[inner.len()..])
}

/// Remove occurrences of `mark` not preceded by a backslash.
fn strip_unescaped(text: &str, mark: &str) -> String {
    if mark.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if rest.starts_with(mark) && prev != Some('\\') {
            prev = mark.chars().last();
            rest = &rest[mark.len()..];
            continue;
        }
        out.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}
