//! `[[path]]` placeholder scanning and substitution.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::OnceLock;
use tracing::trace;

use crate::context::{resolve, stringify, DataContext};
use crate::error::TemplateError;

/// Placeholder opening delimiter
pub const PLACEHOLDER_OPEN: &str = "[[";
/// Placeholder closing delimiter
pub const PLACEHOLDER_CLOSE: &str = "]]";

/// Compiled placeholder grammar: `[[`, one or more characters other than `]`, `]]`
pub struct PlaceholderSyntax {
    pattern: Regex,
}

/// One placeholder occurrence inside a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMatch<'t> {
    /// Byte range of the whole `[[path]]` token
    pub span: Range<usize>,
    /// The path between the delimiters
    pub path: &'t str,
}

/// A text split into literal runs and placeholder tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'t> {
    Text(&'t str),
    Placeholder { raw: &'t str, path: &'t str },
}

impl PlaceholderSyntax {
    /// Compile the placeholder grammar
    pub fn new() -> Result<Self, TemplateError> {
        let pattern = Regex::new(r"\[\[([^\]]+)\]\]").map_err(|e| {
            TemplateError::syntax(format!("Invalid placeholder pattern: {}", e))
        })?;

        Ok(Self { pattern })
    }

    /// All placeholders in `text`, left to right, non-overlapping
    pub fn matches<'t>(&self, text: &'t str) -> Vec<PlaceholderMatch<'t>> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let path = caps.get(1)?;
                Some(PlaceholderMatch {
                    span: whole.range(),
                    path: path.as_str(),
                })
            })
            .collect()
    }

    pub(crate) fn segments<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for found in self.matches(text) {
            if found.span.start > cursor {
                segments.push(Segment::Text(&text[cursor..found.span.start]));
            }
            segments.push(Segment::Placeholder {
                raw: &text[found.span.clone()],
                path: found.path,
            });
            cursor = found.span.end;
        }

        if cursor < text.len() {
            segments.push(Segment::Text(&text[cursor..]));
        }

        segments
    }

    /// Replace every resolvable placeholder in `text` with its value.
    ///
    /// Unresolved placeholders stay verbatim. Substituted values are not
    /// scanned again.
    pub fn substitute(&self, text: &str, context: &Value) -> String {
        let mut unresolved = BTreeSet::new();
        let mut out = String::with_capacity(text.len());
        self.substitute_into(text, context, &mut out, &mut unresolved);
        out
    }

    /// Like [`substitute`](Self::substitute), appending to `out` and recording
    /// the paths left unresolved.
    pub fn substitute_into(
        &self,
        text: &str,
        context: &Value,
        out: &mut String,
        unresolved: &mut BTreeSet<String>,
    ) {
        for segment in self.segments(text) {
            match segment {
                Segment::Text(run) => out.push_str(run),
                Segment::Placeholder { raw, path } => {
                    match resolve(context, path).and_then(stringify) {
                        Some(value) => out.push_str(&value),
                        None => {
                            trace!("Placeholder left unresolved: {}", path);
                            unresolved.insert(path.to_string());
                            out.push_str(raw);
                        }
                    }
                }
            }
        }
    }
}

impl Default for PlaceholderSyntax {
    fn default() -> Self {
        Self::new().expect("Failed to compile placeholder pattern")
    }
}

static GLOBAL_SYNTAX: OnceLock<PlaceholderSyntax> = OnceLock::new();

/// Shared compiled placeholder grammar
pub fn placeholder_syntax() -> &'static PlaceholderSyntax {
    GLOBAL_SYNTAX.get_or_init(PlaceholderSyntax::default)
}

/// Substitute placeholders in `text` from `context`
pub fn substitute_placeholders(text: &str, context: &DataContext) -> String {
    placeholder_syntax().substitute(text, context.as_value())
}

/// Wrap a path in placeholder delimiters
pub fn format_placeholder(path: &str) -> String {
    format!("{}{}{}", PLACEHOLDER_OPEN, path, PLACEHOLDER_CLOSE)
}
