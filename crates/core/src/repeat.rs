//! Repeat-region expansion.
//!
//! Expansion produces a list of [`Piece`]s rather than a flat string: markup
//! that still belongs to the template, and literal text substituted from an
//! array element. The document-level placeholder pass only scans markup, so
//! item values are never re-interpreted as placeholders.

use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::context::{resolve, stringify};
use crate::markers::{MarkerDialect, RegionMatch, RegionScan};
use crate::placeholder::{placeholder_syntax, Segment};
use crate::report::{ProcessReport, RegionStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece<'t> {
    /// Template markup, still subject to placeholder substitution
    Markup(Cow<'t, str>),
    /// Final text taken from an array element
    Literal(String),
}

#[derive(Debug, Default)]
pub(crate) struct Pieces<'t> {
    items: Vec<Piece<'t>>,
}

impl<'t> Pieces<'t> {
    fn markup(&mut self, text: Cow<'t, str>) {
        if text.is_empty() {
            return;
        }
        if let Some(Piece::Markup(last)) = self.items.last_mut() {
            last.to_mut().push_str(&text);
        } else {
            self.items.push(Piece::Markup(text));
        }
    }

    fn literal(&mut self, text: String) {
        if !text.is_empty() {
            self.items.push(Piece::Literal(text));
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Piece<'t>> {
        self.items.iter()
    }

    pub(crate) fn len_hint(&self) -> usize {
        self.items
            .iter()
            .map(|piece| match piece {
                Piece::Markup(text) => text.len(),
                Piece::Literal(text) => text.len(),
            })
            .sum()
    }

    /// Concatenate every piece verbatim
    pub(crate) fn concat(&self) -> String {
        let mut out = String::with_capacity(self.len_hint());
        for piece in &self.items {
            match piece {
                Piece::Markup(text) => out.push_str(text),
                Piece::Literal(text) => out.push_str(text),
            }
        }
        out
    }
}

/// Expand every region of `html` found by `dialect` against `context`
pub(crate) fn expand<'t>(
    html: &'t str,
    dialect: &dyn MarkerDialect,
    context: &Value,
    report: &mut ProcessReport,
) -> Pieces<'t> {
    let mut pieces = Pieces::default();
    let mut cursor = 0;
    let mut from = 0;

    while let Some(scan) = dialect.next_region(html, from) {
        match scan {
            RegionScan::Unterminated { marker, array_key } => {
                warn!(
                    "Repeat region '{}' at offset {} has no end marker, leaving it in place",
                    array_key, marker.start
                );
                report.record(&array_key, None, marker.start, RegionStatus::Unterminated);
                from = marker.end;
            }
            RegionScan::Region(region) => {
                pieces.markup(Cow::Borrowed(&html[cursor..region.span.start]));
                let status = expand_region(html, &region, dialect, context, &mut pieces, report);
                report.record(
                    &region.array_key,
                    Some(&region.alias),
                    region.span.start,
                    status,
                );
                cursor = region.span.end;
                from = region.span.end;
            }
        }
    }

    pieces.markup(Cow::Borrowed(&html[cursor..]));
    pieces
}

fn expand_region<'t>(
    html: &'t str,
    region: &RegionMatch<'t>,
    dialect: &dyn MarkerDialect,
    context: &Value,
    pieces: &mut Pieces<'t>,
    report: &mut ProcessReport,
) -> RegionStatus {
    let items = match resolve(context, &region.array_key) {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) => {
            warn!("Repeat region '{}' is bound to an empty array, removing it", region.array_key);
            return RegionStatus::Empty;
        }
        _ => {
            warn!(
                "Repeat region '{}' is not bound to an array, removing it",
                region.array_key
            );
            return RegionStatus::NotAnArray;
        }
    };

    let body = &html[region.body.clone()];
    pieces.markup(region.prefix.clone());

    let status = match dialect.find_row(body) {
        Some(row) => {
            debug!(
                "Expanding repeat region '{}' as '{}' with {} rows",
                region.array_key,
                region.alias,
                items.len()
            );
            pieces.markup(Cow::Borrowed(&body[..row.span.start]));
            for item in items {
                expand_row(&row.template, &region.alias, item, pieces, &mut report.unresolved);
            }
            pieces.markup(Cow::Borrowed(&body[row.span.end..]));
            RegionStatus::Expanded { rows: items.len() }
        }
        None => {
            warn!(
                "Repeat region '{}' has no row template, repeating its whole content",
                region.array_key
            );
            for item in items {
                expand_row(body, &region.alias, item, pieces, &mut report.unresolved);
            }
            RegionStatus::ExpandedWithoutRowTemplate { rows: items.len() }
        }
    };

    pieces.markup(region.suffix.clone());
    status
}

/// Path inside the item for an alias-scoped placeholder, `Some("")` for the
/// bare alias
fn scoped_path<'p>(path: &'p str, alias: &str) -> Option<&'p str> {
    let rest = path.strip_prefix(alias)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('.')
    }
}

/// Substitute one row from `item`.
///
/// Alias-scoped placeholders are final after this step, resolved or not;
/// everything else stays markup for the document pass.
fn expand_row(
    template: &str,
    alias: &str,
    item: &Value,
    pieces: &mut Pieces<'_>,
    unresolved: &mut BTreeSet<String>,
) {
    for segment in placeholder_syntax().segments(template) {
        match segment {
            Segment::Text(run) => pieces.markup(Cow::Owned(run.to_string())),
            Segment::Placeholder { raw, path } => match scoped_path(path, alias) {
                Some(field) => {
                    let value = if field.is_empty() {
                        Some(item)
                    } else {
                        resolve(item, field)
                    };
                    match value.and_then(stringify) {
                        Some(text) => pieces.literal(text.into_owned()),
                        None => {
                            unresolved.insert(path.to_string());
                            pieces.literal(raw.to_string());
                        }
                    }
                }
                None => pieces.markup(Cow::Owned(raw.to_string())),
            },
        }
    }
}
