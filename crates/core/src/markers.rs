//! Repeat-region marker dialects.
//!
//! The expansion algorithm only talks to [`MarkerDialect`]; the concrete
//! syntax of region and row markers lives here. Two dialects exist:
//!
//! - [`CommentDialect`] (default):
//!   `<!-- REPEAT_START:order_items:item -->` ... `<!-- REPEAT_ROW_START -->`
//!   ... `<!-- REPEAT_ROW_END -->` ... `<!-- REPEAT_END:order_items -->`
//! - [`AttributeDialect`]: a `<section data-repeat-start="order_items"
//!   data-repeat-item="item">` container whose row element carries
//!   `data-repeat-row="true"`.
//!
//! The renderer writes markers through the same trait, so a template is
//! always scanned with the dialect it was written in.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::TemplateError;

/// Alias used when an attribute-dialect container omits `data-repeat-item`
pub const DEFAULT_ITEM_ALIAS: &str = "item";

/// Selects a marker dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// HTML comment markers
    #[default]
    Comment,
    /// `data-repeat-*` attribute markers
    Attribute,
}

impl DialectKind {
    /// Build the dialect implementation
    pub fn build(self) -> Result<Box<dyn MarkerDialect>, TemplateError> {
        Ok(match self {
            DialectKind::Comment => Box::new(CommentDialect::new()?),
            DialectKind::Attribute => Box::new(AttributeDialect::new()?),
        })
    }
}

impl FromStr for DialectKind {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "comment" | "comments" => Ok(DialectKind::Comment),
            "attribute" | "attributes" | "attr" => Ok(DialectKind::Attribute),
            other => Err(TemplateError::configuration(format!(
                "Unknown marker dialect '{}', expected comment or attribute",
                other
            ))),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectKind::Comment => f.write_str("comment"),
            DialectKind::Attribute => f.write_str("attribute"),
        }
    }
}

/// A complete repeat region found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMatch<'t> {
    /// Byte range of the region including its markers
    pub span: Range<usize>,
    /// Byte range of the content between the markers
    pub body: Range<usize>,
    /// Data-context path of the bound sequence
    pub array_key: String,
    /// Name the row template uses for the current element
    pub alias: String,
    /// Markup emitted before the expanded body
    pub prefix: Cow<'t, str>,
    /// Markup emitted after the expanded body
    pub suffix: Cow<'t, str>,
}

/// Result of looking for the next region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionScan<'t> {
    Region(RegionMatch<'t>),
    /// A start marker with no matching end marker
    Unterminated {
        marker: Range<usize>,
        array_key: String,
    },
}

/// The row template inside a region body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMatch<'b> {
    /// Byte range inside the body replaced by the expanded rows
    pub span: Range<usize>,
    /// Markup duplicated once per element
    pub template: Cow<'b, str>,
}

/// Start or end marker occurrence, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerToken {
    Start {
        offset: usize,
        array_key: String,
        alias: String,
    },
    End {
        offset: usize,
        array_key: String,
    },
}

impl MarkerToken {
    pub fn offset(&self) -> usize {
        match self {
            MarkerToken::Start { offset, .. } | MarkerToken::End { offset, .. } => *offset,
        }
    }

    pub fn array_key(&self) -> &str {
        match self {
            MarkerToken::Start { array_key, .. } | MarkerToken::End { array_key, .. } => array_key,
        }
    }
}

/// Reads and writes repeat markers
pub trait MarkerDialect: Send + Sync + fmt::Debug {
    /// Which dialect this is
    fn kind(&self) -> DialectKind;

    /// The first region whose start marker begins at or after `from`.
    ///
    /// A start marker pairs with the nearest following end marker for the same
    /// array key.
    fn next_region<'t>(&self, html: &'t str, from: usize) -> Option<RegionScan<'t>>;

    /// The row template inside a region body, if the body delimits one
    fn find_row<'b>(&self, body: &'b str) -> Option<RowMatch<'b>>;

    /// Every start and end marker in `html`
    fn tokens(&self, html: &str) -> Vec<MarkerToken>;

    /// Markup opening a region around a container carrying `container_style`.
    ///
    /// `container_style` is written as-is and must already be attribute-safe.
    fn open_region(&self, array_key: &str, alias: &str, container_style: &str) -> String;

    /// Markup closing a region opened by [`open_region`](Self::open_region)
    fn close_region(&self, array_key: &str) -> String;

    /// Markup written immediately before the row element
    fn open_row(&self) -> &'static str;

    /// Markup written immediately after the row element
    fn close_row(&self) -> &'static str;

    /// Attribute text written inside the row element's opening tag
    fn row_attribute(&self) -> &'static str;
}

/// Whether `key` can be written into a start or end marker
pub fn is_valid_array_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && !key.ends_with('.')
        && !key.contains("..")
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '-')
}

/// Whether `alias` can be written into a start marker
pub fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty() && alias.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn compile(pattern: &str) -> Result<Regex, TemplateError> {
    Regex::new(pattern)
        .map_err(|e| TemplateError::syntax(format!("Invalid marker pattern '{}': {}", pattern, e)))
}

// ─── Comment dialect ────────────────────────────────────────────────

/// `<!-- REPEAT_START:key:alias -->` style markers
#[derive(Debug)]
pub struct CommentDialect {
    start: Regex,
    end: Regex,
    row_start: Regex,
    row_end: Regex,
}

impl CommentDialect {
    pub fn new() -> Result<Self, TemplateError> {
        Ok(Self {
            start: compile(r"<!--\s*REPEAT_START:([^:\s>]+):([^:\s>]+)\s*-->")?,
            end: compile(r"<!--\s*REPEAT_END:([^:\s>]+)\s*-->")?,
            row_start: compile(r"<!--\s*REPEAT_ROW_START\s*-->")?,
            row_end: compile(r"<!--\s*REPEAT_ROW_END\s*-->")?,
        })
    }

    fn matching_end(&self, html: &str, from: usize, array_key: &str) -> Option<Range<usize>> {
        self.end
            .captures_iter(&html[from..])
            .find(|caps| caps.get(1).map(|m| m.as_str()) == Some(array_key))
            .and_then(|caps| caps.get(0))
            .map(|m| from + m.start()..from + m.end())
    }
}

impl MarkerDialect for CommentDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Comment
    }

    fn next_region<'t>(&self, html: &'t str, from: usize) -> Option<RegionScan<'t>> {
        let caps = self.start.captures_at(html, from)?;
        let marker = caps.get(0)?;
        let array_key = caps.get(1)?.as_str().to_string();
        let alias = caps.get(2)?.as_str().to_string();

        let Some(end) = self.matching_end(html, marker.end(), &array_key) else {
            return Some(RegionScan::Unterminated {
                marker: marker.range(),
                array_key,
            });
        };

        Some(RegionScan::Region(RegionMatch {
            span: marker.start()..end.end,
            body: marker.end()..end.start,
            array_key,
            alias,
            prefix: Cow::Borrowed(""),
            suffix: Cow::Borrowed(""),
        }))
    }

    fn find_row<'b>(&self, body: &'b str) -> Option<RowMatch<'b>> {
        let open = self.row_start.find(body)?;
        let close = self.row_end.find_at(body, open.end())?;

        Some(RowMatch {
            span: open.start()..close.end(),
            template: Cow::Borrowed(&body[open.end()..close.start()]),
        })
    }

    fn tokens(&self, html: &str) -> Vec<MarkerToken> {
        let starts = self.start.captures_iter(html).filter_map(|caps| {
            Some(MarkerToken::Start {
                offset: caps.get(0)?.start(),
                array_key: caps.get(1)?.as_str().to_string(),
                alias: caps.get(2)?.as_str().to_string(),
            })
        });
        let ends = self.end.captures_iter(html).filter_map(|caps| {
            Some(MarkerToken::End {
                offset: caps.get(0)?.start(),
                array_key: caps.get(1)?.as_str().to_string(),
            })
        });

        let mut tokens: Vec<MarkerToken> = starts.chain(ends).collect();
        tokens.sort_by_key(MarkerToken::offset);
        tokens
    }

    fn open_region(&self, array_key: &str, alias: &str, container_style: &str) -> String {
        format!(
            "<!-- REPEAT_START:{}:{} --><section style=\"{}\">",
            array_key, alias, container_style
        )
    }

    fn close_region(&self, array_key: &str) -> String {
        format!("</section><!-- REPEAT_END:{} -->", array_key)
    }

    fn open_row(&self) -> &'static str {
        "<!-- REPEAT_ROW_START -->"
    }

    fn close_row(&self) -> &'static str {
        "<!-- REPEAT_ROW_END -->"
    }

    fn row_attribute(&self) -> &'static str {
        ""
    }
}

// ─── Attribute dialect ──────────────────────────────────────────────

/// `data-repeat-start` / `data-repeat-item` / `data-repeat-row` markers
#[derive(Debug)]
pub struct AttributeDialect {
    start: Regex,
    item: Regex,
    section_tag: Regex,
    row_open: Regex,
    row_tag: Regex,
    region_attrs: Regex,
    row_attr: Regex,
}

impl AttributeDialect {
    pub fn new() -> Result<Self, TemplateError> {
        Ok(Self {
            start: compile(r#"(?i)<section\b[^>]*\bdata-repeat-start\s*=\s*"([^"]*)"[^>]*>"#)?,
            item: compile(r#"(?i)\bdata-repeat-item\s*=\s*"([^"]*)""#)?,
            section_tag: compile(r"(?i)<(/?)section\b[^>]*>")?,
            row_open: compile(r#"(?i)<(table|tr)\b[^>]*\bdata-repeat-row\s*=\s*"true"[^>]*>"#)?,
            row_tag: compile(r"(?i)<(/?)(table|tr)\b[^>]*>")?,
            region_attrs: compile(r#"(?i)\s*\bdata-repeat-(?:start|item)\s*=\s*"[^"]*""#)?,
            row_attr: compile(r#"(?i)\s*\bdata-repeat-row\s*=\s*"[^"]*""#)?,
        })
    }

    /// Offset range of the `</section>` balancing a section opened before `from`
    fn closing_section(&self, html: &str, from: usize) -> Option<Range<usize>> {
        let mut depth = 1usize;
        for caps in self.section_tag.captures_iter(&html[from..]) {
            let tag = caps.get(0)?;
            if caps.get(1).map_or(false, |slash| !slash.as_str().is_empty()) {
                depth -= 1;
                if depth == 0 {
                    return Some(from + tag.start()..from + tag.end());
                }
            } else {
                depth += 1;
            }
        }
        None
    }

    fn alias_of(&self, open_tag: &str) -> String {
        self.item
            .captures(open_tag)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|alias| !alias.is_empty())
            .unwrap_or_else(|| DEFAULT_ITEM_ALIAS.to_string())
    }
}

impl MarkerDialect for AttributeDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Attribute
    }

    fn next_region<'t>(&self, html: &'t str, from: usize) -> Option<RegionScan<'t>> {
        let caps = self.start.captures_at(html, from)?;
        let open = caps.get(0)?;
        let array_key = caps.get(1)?.as_str().to_string();

        let Some(close) = self.closing_section(html, open.end()) else {
            return Some(RegionScan::Unterminated {
                marker: open.range(),
                array_key,
            });
        };

        let open_tag = open.as_str();
        Some(RegionScan::Region(RegionMatch {
            span: open.start()..close.end,
            body: open.end()..close.start,
            alias: self.alias_of(open_tag),
            array_key,
            prefix: self.region_attrs.replace_all(open_tag, ""),
            suffix: Cow::Borrowed(&html[close]),
        }))
    }

    fn find_row<'b>(&self, body: &'b str) -> Option<RowMatch<'b>> {
        let caps = self.row_open.captures(body)?;
        let open = caps.get(0)?;
        let name = caps.get(1)?.as_str().to_lowercase();

        let mut depth = 1usize;
        let mut close = None;
        for tag in self.row_tag.captures_iter(&body[open.end()..]) {
            if tag.get(2).map(|m| m.as_str().to_lowercase()) != Some(name.clone()) {
                continue;
            }
            let whole = tag.get(0)?;
            if tag.get(1).map_or(false, |slash| !slash.as_str().is_empty()) {
                depth -= 1;
                if depth == 0 {
                    close = Some(open.end() + whole.end());
                    break;
                }
            } else {
                depth += 1;
            }
        }

        let span = open.start()..close?;
        let template = self.row_attr.replace(&body[span.clone()], "");

        Some(RowMatch { span, template })
    }

    fn tokens(&self, html: &str) -> Vec<MarkerToken> {
        let mut tokens = Vec::new();
        // `None` entries are plain sections
        let mut open: Vec<Option<String>> = Vec::new();

        for caps in self.section_tag.captures_iter(html) {
            let Some(tag) = caps.get(0) else { continue };
            let closing = caps.get(1).map_or(false, |slash| !slash.as_str().is_empty());

            if closing {
                if let Some(Some(array_key)) = open.pop() {
                    tokens.push(MarkerToken::End {
                        offset: tag.start(),
                        array_key,
                    });
                }
                continue;
            }

            match self.start.captures(tag.as_str()).and_then(|c| c.get(1)) {
                Some(key) => {
                    let array_key = key.as_str().to_string();
                    tokens.push(MarkerToken::Start {
                        offset: tag.start(),
                        array_key: array_key.clone(),
                        alias: self.alias_of(tag.as_str()),
                    });
                    open.push(Some(array_key));
                }
                None => open.push(None),
            }
        }

        tokens
    }

    fn open_region(&self, array_key: &str, alias: &str, container_style: &str) -> String {
        format!(
            "<section style=\"{}\" data-repeat-start=\"{}\" data-repeat-item=\"{}\">",
            container_style, array_key, alias
        )
    }

    fn close_region(&self, _array_key: &str) -> String {
        "</section>".to_string()
    }

    fn open_row(&self) -> &'static str {
        ""
    }

    fn close_row(&self) -> &'static str {
        ""
    }

    fn row_attribute(&self) -> &'static str {
        " data-repeat-row=\"true\""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region<'t>(scan: Option<RegionScan<'t>>) -> RegionMatch<'t> {
        match scan {
            Some(RegionScan::Region(region)) => region,
            other => panic!("expected a region, got {:?}", other),
        }
    }

    #[test]
    fn test_dialect_kind_parsing() {
        assert_eq!("comment".parse::<DialectKind>().unwrap(), DialectKind::Comment);
        assert_eq!(" Attribute ".parse::<DialectKind>().unwrap(), DialectKind::Attribute);
        assert!("mustache".parse::<DialectKind>().is_err());
        assert_eq!(DialectKind::Attribute.to_string(), "attribute");
        assert_eq!(DialectKind::Comment.build().unwrap().kind(), DialectKind::Comment);
    }

    #[test]
    fn test_key_and_alias_rules() {
        assert!(is_valid_array_key("order_items"));
        assert!(is_valid_array_key("order.lines"));
        assert!(is_valid_array_key("ürünler"));
        assert!(!is_valid_array_key(""));
        assert!(!is_valid_array_key("a:b"));
        assert!(!is_valid_array_key("a b"));
        assert!(!is_valid_array_key("a..b"));
        assert!(!is_valid_array_key("items-->"));
        assert!(is_valid_alias("item"));
        assert!(!is_valid_alias("item.x"));
        assert!(!is_valid_alias(""));
    }

    #[test]
    fn test_comment_region_and_row() {
        let dialect = CommentDialect::new().unwrap();
        let html = "<p>a</p><!-- REPEAT_START:order_items:item --><h3>H</h3>\
                    <!-- REPEAT_ROW_START --><div>[[item.name]]</div><!-- REPEAT_ROW_END -->\
                    <!-- REPEAT_END:order_items --><p>b</p>";

        let found = region(dialect.next_region(html, 0));
        assert_eq!(found.array_key, "order_items");
        assert_eq!(found.alias, "item");
        assert_eq!(&html[..found.span.start], "<p>a</p>");
        assert_eq!(&html[found.span.end..], "<p>b</p>");

        let body = &html[found.body.clone()];
        let row = dialect.find_row(body).unwrap();
        assert_eq!(row.template, "<div>[[item.name]]</div>");
        assert_eq!(&body[..row.span.start], "<h3>H</h3>");
        assert_eq!(&body[row.span.end..], "");
    }

    #[test]
    fn test_comment_end_pairs_by_key() {
        let dialect = CommentDialect::new().unwrap();
        let html = "<!-- REPEAT_START:a:x -->1<!-- REPEAT_END:b -->2<!-- REPEAT_END:a -->";
        let found = region(dialect.next_region(html, 0));
        assert_eq!(&html[found.body], "1<!-- REPEAT_END:b -->2");
    }

    #[test]
    fn test_comment_unterminated_region() {
        let dialect = CommentDialect::new().unwrap();
        let html = "x<!-- REPEAT_START:items:item -->never closed";
        match dialect.next_region(html, 0) {
            Some(RegionScan::Unterminated { marker, array_key }) => {
                assert_eq!(array_key, "items");
                assert_eq!(marker.start, 1);
            }
            other => panic!("unexpected scan: {:?}", other),
        }
        assert!(dialect.next_region("no markers", 0).is_none());
    }

    #[test]
    fn test_comment_tokens_are_ordered() {
        let dialect = CommentDialect::new().unwrap();
        let html = "<!-- REPEAT_END:z --><!-- REPEAT_START:a:i --><!-- REPEAT_END:a -->";
        let tokens = dialect.tokens(html);
        let keys: Vec<(bool, &str)> = tokens
            .iter()
            .map(|t| (matches!(t, MarkerToken::Start { .. }), t.array_key()))
            .collect();
        assert_eq!(keys, vec![(false, "z"), (true, "a"), (false, "a")]);
        assert_eq!(tokens[1].offset(), "<!-- REPEAT_END:z -->".len());
    }

    #[test]
    fn test_attribute_region_with_nested_sections() {
        let dialect = AttributeDialect::new().unwrap();
        let html = r#"<section style="padding:0" data-repeat-start="order_items" data-repeat-item="product"><section>inner</section><table data-repeat-row="true"><tr><td>[[product.name]]</td></tr></table></section><p>after</p>"#;

        let found = region(dialect.next_region(html, 0));
        assert_eq!(found.array_key, "order_items");
        assert_eq!(found.alias, "product");
        assert_eq!(found.prefix, r#"<section style="padding:0">"#);
        assert_eq!(found.suffix, "</section>");
        assert_eq!(&html[found.span.end..], "<p>after</p>");

        let body = &html[found.body.clone()];
        let row = dialect.find_row(body).unwrap();
        assert_eq!(row.template, "<table><tr><td>[[product.name]]</td></tr></table>");
        assert_eq!(&body[..row.span.start], "<section>inner</section>");
    }

    #[test]
    fn test_attribute_order_is_free_and_alias_defaults() {
        let dialect = AttributeDialect::new().unwrap();
        let html = r#"<section data-repeat-item="p" data-repeat-start="items">x</section>"#;
        let found = region(dialect.next_region(html, 0));
        assert_eq!(found.alias, "p");
        assert_eq!(found.prefix, "<section>");

        let html = r#"<section data-repeat-start="items">x</section>"#;
        assert_eq!(region(dialect.next_region(html, 0)).alias, DEFAULT_ITEM_ALIAS);
    }

    #[test]
    fn test_attribute_row_with_nested_rows() {
        let dialect = AttributeDialect::new().unwrap();
        let body = r#"<table><tbody><tr data-repeat-row="true"><td><table><tr><td>n</td></tr></table></td></tr></tbody></table>"#;
        let row = dialect.find_row(body).unwrap();
        assert_eq!(
            row.template,
            "<tr><td><table><tr><td>n</td></tr></table></td></tr>"
        );
        assert!(body[row.span.end..].starts_with("</tbody>"));
    }

    #[test]
    fn test_attribute_tokens() {
        let dialect = AttributeDialect::new().unwrap();
        let html = r#"<section><section data-repeat-start="a" data-repeat-item="i"><section></section></section></section><section data-repeat-start="b">"#;
        let tokens = dialect.tokens(html);
        assert_eq!(tokens.len(), 3);
        assert!(matches!(&tokens[0], MarkerToken::Start { array_key, alias, .. } if array_key == "a" && alias == "i"));
        assert!(matches!(&tokens[1], MarkerToken::End { array_key, .. } if array_key == "a"));
        assert!(matches!(&tokens[2], MarkerToken::Start { array_key, .. } if array_key == "b"));
    }

    #[test]
    fn test_writers_round_trip_through_scanner() {
        for kind in [DialectKind::Comment, DialectKind::Attribute] {
            let dialect = kind.build().unwrap();
            let html = format!(
                "{}<table>{}<tr{}><td>[[item.name]]</td></tr>{}</table>{}",
                dialect.open_region("order_items", "item", "padding:0"),
                dialect.open_row(),
                dialect.row_attribute(),
                dialect.close_row(),
                dialect.close_region("order_items"),
            );

            let found = region(dialect.next_region(&html, 0));
            assert_eq!(found.array_key, "order_items");
            assert_eq!(found.alias, "item");
            let row = dialect.find_row(&html[found.body.clone()]).unwrap();
            assert!(row.template.contains("[[item.name]]"), "{:?}", kind);
            assert!(!row.template.contains("data-repeat-row"));
        }
    }
}
