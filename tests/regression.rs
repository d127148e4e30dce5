// Regression tests: every bug found becomes a test case here.
// Never delete a test from this file.

use html_md::{convert, convert_with, Options};
use pretty_assertions::assert_eq;

/// Two emphasis spans with no space between them must not fuse into `_a__b_`.
#[test]
fn abutting_emphasis_is_separated() {
    assert_eq!(convert("<em>a</em><em>b</em>"), "_a_ _b_");
    assert_eq!(convert("<code>a</code><code>b</code>"), "`a` `b`");
}

/// The guard only applies between identical delimiter characters.
#[test]
fn different_delimiters_still_abut() {
    assert_eq!(convert("<b>a</b><i>b</i>"), "**a**_b_");
}

/// A blank `<li>` is dropped and does not consume a number.
#[test]
fn empty_list_item_keeps_numbering() {
    assert_eq!(convert("<ol><li>a</li><li></li><li> </li><li>b</li></ol>"), "1. a\n2. b");
}

/// A strong nested inside strong yields one pair of delimiters.
#[test]
fn nested_strong_wraps_once() {
    assert_eq!(convert("<b>a <strong>b</strong></b>"), "**a b**");
}

/// Already-encoded parentheses must not become `%2528`.
#[test]
fn encoded_parens_not_double_encoded() {
    assert_eq!(convert(r#"<a href="/x%28y%29">t</a>"#), "[t](/x%28y%29)");
    assert_eq!(convert(r#"<a href="/x%28y)">t</a>"#), "[t](/x%28y%29)");
}

/// Paragraphs inside an item continue under the item's text column.
#[test]
fn multi_paragraph_list_item() {
    assert_eq!(
        convert("<ul><li><p>one</p><p>two</p></li></ul>"),
        "* one  \n  two"
    );
    assert_eq!(
        convert("<ol><li>first<br>line</li></ol>"),
        "1. first  \n   line"
    );
}

/// Mixed list kinds nest by depth, not by kind.
#[test]
fn ordered_inside_unordered() {
    assert_eq!(convert("<ul><li>a<ol><li>b</li></ol></li></ul>"), "* a\n  1. b");
}

/// Rows shorter than the widest row are padded with empty cells.
#[test]
fn short_table_rows_are_padded() {
    assert_eq!(
        convert("<table><tr><th>a</th><th>b</th></tr><tr><td>1</td></tr></table>"),
        "| a | b |\n| - | - |\n| 1 |   |"
    );
}

/// A column that is empty in every row has zero width.
#[test]
fn zero_width_table_column() {
    assert_eq!(
        convert("<table><tr><th>a</th><th></th></tr><tr><td>1</td><td></td></tr></table>"),
        "| a |  |\n| - |  |\n| 1 |  |"
    );
}

/// Only the last non-empty caption is kept.
#[test]
fn last_table_caption_wins() {
    assert_eq!(
        convert("<table><caption>one</caption><caption>two</caption><tr><td>x</td></tr></table>"),
        "__two__\n| x |\n| - |"
    );
}

/// A table whose rows are all empty produces nothing.
#[test]
fn empty_table_is_dropped() {
    assert_eq!(convert("<p>a</p><table><tr><td> </td></tr></table><p>b</p>"), "a\n\nb");
}

/// Whitespace between inline siblings survives as one space.
#[test]
fn whitespace_between_inline_elements() {
    assert_eq!(convert("<p><b>a</b>   <i>b</i></p>"), "**a** _b_");
    assert_eq!(convert("<p> <b>a</b></p>"), "**a**");
    assert_eq!(convert("<p><b>x</b>\n  y</p>"), "**x** y");
}

/// Leading and trailing whitespace of a heading never reaches the `#` line.
#[test]
fn heading_with_padded_link() {
    assert_eq!(convert(r#"<h2> <a href="/x">x</a> </h2>"#), "## [x](/x)");
}

/// Blockquote prefixes apply to every line of a nested list.
#[test]
fn list_inside_blockquote() {
    assert_eq!(
        convert("<blockquote><ul><li>a</li><li>b</li></ul></blockquote>"),
        "> * a\n> * b"
    );
}

/// An image used as link text keeps its own brackets.
#[test]
fn image_inside_link() {
    assert_eq!(
        convert(r#"<a href="/p"><img src="i.png" alt="pic"></a>"#),
        "[![pic](i.png)](/p)"
    );
}

/// Intra-word underscores are escaped so they never start emphasis.
#[test]
fn underscore_in_words_escaped() {
    assert_eq!(convert("<p>snake_case</p>"), "snake\\_case");
}

/// Pipe characters in table cells must be escaped to keep the row intact.
#[test]
fn pipe_in_table_cell_escaped() {
    let md = convert("<table><tr><th>Header</th></tr><tr><td>a|b</td></tr></table>");
    assert_eq!(md, "| Header |\n| ------ |\n| a\\|b   |");
}

/// Definitions follow the body untrimmed: a block-final document keeps its
/// blank line, and the blank-line cap decides how much of the run survives.
#[test]
fn reference_definitions_after_block() {
    let options = Options::new().with_ref_links(true);
    assert_eq!(
        convert_with(r#"<p><a href="u">x</a></p>"#, &options),
        "[x][1]\n\n\n[1]: u"
    );
    let uncapped = options.with_max_blank_lines(0);
    assert_eq!(
        convert_with(r#"<p><a href="u">x</a></p>"#, &uncapped),
        "[x][1]\n\n\n\n[1]: u"
    );
}

/// Head-level tags are parsed in body mode and rendered like other blocks.
#[test]
fn head_level_tags_are_rendered() {
    assert_eq!(convert("<title>T</title><p>x</p>"), "T\n\nx");
    assert_eq!(
        convert("<!DOCTYPE html><html><head><title>T</title></head><body><p>x</p></body></html>"),
        "T\n\nx"
    );
}
