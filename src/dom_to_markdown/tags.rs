// Tag classification.
//
// Every uppercase tag name maps to exactly one `TagKind`; the dispatcher
// matches on the kind instead of on strings. Element categories follow the
// HTML content model: https://html.spec.whatwg.org/multipage/dom.html#content-models

/// How an element is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    /// Non-content subtree (scripts, styles, hidden markup). Never visited.
    Skip,
    LineBreak,
    Rule,
    Image,
    /// `<h1>`–`<h6>`, carrying the level.
    Heading(usize),
    Strong,
    Emphasis,
    Strike,
    Code,
    Pre,
    Link,
    List { ordered: bool },
    Blockquote,
    Table,
    /// Row, cell, section or caption encountered outside a table.
    TablePart,
    /// Inline-level element without a dedicated handler.
    Phrasing,
    /// Block-level, unknown and custom elements.
    Block,
}

impl TagKind {
    /// Classify an uppercase tag name.
    pub(crate) fn of(tag: &str) -> Self {
        match tag {
            "SCRIPT" | "STYLE" | "HEAD" | "TEMPLATE" | "NOSCRIPT" => Self::Skip,
            "BR" => Self::LineBreak,
            "HR" => Self::Rule,
            "IMG" => Self::Image,
            "H1" => Self::Heading(1),
            "H2" => Self::Heading(2),
            "H3" => Self::Heading(3),
            "H4" => Self::Heading(4),
            "H5" => Self::Heading(5),
            "H6" => Self::Heading(6),
            "STRONG" | "B" => Self::Strong,
            "EM" | "I" => Self::Emphasis,
            "DEL" | "S" | "STRIKE" => Self::Strike,
            "CODE" => Self::Code,
            "PRE" => Self::Pre,
            "A" => Self::Link,
            "OL" => Self::List { ordered: true },
            "UL" => Self::List { ordered: false },
            "BLOCKQUOTE" => Self::Blockquote,
            "TABLE" => Self::Table,
            "THEAD" | "TBODY" | "TFOOT" | "TR" | "TD" | "TH" | "CAPTION" => Self::TablePart,
            tag if PHRASING.contains(&tag) => Self::Phrasing,
            _ => Self::Block,
        }
    }
}

/// Phrasing content without a dedicated handler.
///
/// Tags with their own `TagKind` (B, EM, CODE, A, IMG, BR, ...) are left out.
/// Anything not listed here and not handled explicitly renders as a block.
const PHRASING: &[&str] = &[
    "ABBR", "BDI", "BDO", "BUTTON", "CITE", "DATA", "DFN", "IFRAME", "INS", "KBD", "LABEL",
    "MAP", "MARK", "MATH", "METER", "OBJECT", "OUTPUT", "PICTURE", "PROGRESS", "Q", "RUBY",
    "RP", "RT", "SAMP", "SELECT", "SMALL", "SPAN", "SUB", "SUP", "SVG", "TEXTAREA", "TIME",
    "U", "VAR", "VIDEO",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_carry_level() {
        assert_eq!(TagKind::of("H1"), TagKind::Heading(1));
        assert_eq!(TagKind::of("H6"), TagKind::Heading(6));
        assert_eq!(TagKind::of("H7"), TagKind::Block);
    }

    #[test]
    fn phrasing_and_block_fallbacks() {
        assert_eq!(TagKind::of("SPAN"), TagKind::Phrasing);
        assert_eq!(TagKind::of("KBD"), TagKind::Phrasing);
        assert_eq!(TagKind::of("DIV"), TagKind::Block);
        assert_eq!(TagKind::of("MY-WIDGET"), TagKind::Block);
    }

    #[test]
    fn explicit_tags_are_not_phrasing() {
        assert_eq!(TagKind::of("B"), TagKind::Strong);
        assert_eq!(TagKind::of("STRIKE"), TagKind::Strike);
        assert_eq!(TagKind::of("OL"), TagKind::List { ordered: true });
        assert_eq!(TagKind::of("NOSCRIPT"), TagKind::Skip);
        assert_eq!(TagKind::of("CAPTION"), TagKind::TablePart);
    }
}
