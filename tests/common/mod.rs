// Shared test helpers for html-md.

use std::fs;
use std::path::Path;

use html_md::{CodeBlockStyle, Options, Rewrite};
use serde_json::Value;

/// A fixture's input HTML, expected Markdown, and options.
pub struct Fixture {
    pub html: String,
    pub expected_md: String,
    pub options: Options,
}

/// Load a test fixture.
///
/// Fixture directories contain `index.html`, `index.md`, and optionally
/// `index.json` holding option overrides keyed by `Options` field name.
pub fn load_fixture(name: &str) -> Fixture {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-fixtures").join(name);
    let html = fs::read_to_string(base.join("index.html"))
        .unwrap_or_else(|_| panic!("Missing fixture: {}/index.html", name));
    let md = fs::read_to_string(base.join("index.md"))
        .unwrap_or_else(|_| panic!("Missing fixture: {}/index.md", name));

    let options = match fs::read_to_string(base.join("index.json")) {
        Ok(json) => {
            let val: Value = serde_json::from_str(&json)
                .unwrap_or_else(|e| panic!("Bad fixture options: {}/index.json: {e}", name));
            apply_options(Options::default(), &val)
        }
        Err(_) => Options::default(),
    };

    Fixture {
        html,
        // Editors add a final newline; conversion output never ends in one.
        expected_md: md.trim_end_matches('\n').to_string(),
        options,
    }
}

fn apply_options(mut options: Options, val: &Value) -> Options {
    let string = |key: &str| val.get(key).and_then(Value::as_str).map(str::to_string);
    let strings = |key: &str| {
        val.get(key).and_then(Value::as_array).map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect::<Vec<_>>()
        })
    };
    let flag = |key: &str| val.get(key).and_then(Value::as_bool);

    if let Some(s) = string("code_fence") {
        options.code_fence = s;
    }
    if let Some(s) = string("bullet_marker") {
        options.bullet_marker = s;
    }
    if let Some(s) = string("indent") {
        options.indent = s;
    }
    if let Some(s) = string("emphasis_mark") {
        options.emphasis_mark = s;
    }
    if let Some(s) = string("strong_mark") {
        options.strong_mark = s;
    }
    if let Some(s) = string("strike_mark") {
        options.strike_mark = s;
    }
    if let Some(s) = string("code_block_style") {
        options.code_block_style = match s.as_str() {
            "indented" => CodeBlockStyle::Indented,
            _ => CodeBlockStyle::Fenced,
        };
    }
    if let Some(n) = val.get("max_blank_lines").and_then(Value::as_u64) {
        options.max_blank_lines = n as usize;
    }
    if let Some(tags) = strings("skip_tags") {
        options.skip_tags = tags;
    }
    if let Some(tags) = strings("extra_block_tags") {
        options.extra_block_tags = tags;
    }
    if let Some(v) = val.get("char_escape") {
        options.char_escape = rewrite_pair(v);
    }
    if let Some(arr) = val.get("line_lead_escape").and_then(Value::as_array) {
        options.line_lead_escape = arr.iter().filter_map(rewrite_pair).collect();
    }
    if let Some(arr) = val.get("text_replacements").and_then(Value::as_array) {
        options.text_replacements = arr.iter().filter_map(rewrite_pair).collect();
    }
    if let Some(b) = flag("keep_data_images") {
        options.keep_data_images = b;
    }
    if let Some(b) = flag("ref_links") {
        options.ref_links = b;
    }
    if let Some(b) = flag("autolinks") {
        options.autolinks = b;
    }
    options
}

/// `[pattern, replacement]`, or `null` for no rule.
fn rewrite_pair(val: &Value) -> Option<Rewrite> {
    let pair = val.as_array()?;
    let pattern = pair.first()?.as_str()?;
    let replacement = pair.get(1)?.as_str()?;
    Some(Rewrite::new(pattern, replacement).unwrap_or_else(|e| panic!("{e}")))
}
