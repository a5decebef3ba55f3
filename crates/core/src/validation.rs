//! Save-time template checks.
//!
//! Processing is lenient: malformed markers stay literal and missing arrays
//! produce empty regions. Validation is where authors find out about those
//! problems before a template is stored.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::context::{resolve, DataContext};
use crate::error::TemplateError;
use crate::markers::{MarkerDialect, MarkerToken, RegionScan};
use crate::placeholder::placeholder_syntax;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Start marker with no end marker for its key
    UnterminatedRegion,
    /// End marker with no open region for its key
    OrphanRegionEnd,
    /// Region opened inside a region with the same key
    NestedSameKey,
    /// Region closed while a region opened after it is still open
    OverlappingRegions,
    /// Placeholder path with an empty segment, e.g. `[[a..b]]`
    EmptyPathSegment,
    /// Region without a delimited row template
    MissingRowTemplate,
    /// Region inside a region with a different key; never expanded
    NestedRegion,
    /// Repeat key not bound to a non-empty array in the sample context
    UnboundArray,
}

impl IssueKind {
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::MissingRowTemplate | IssueKind::NestedRegion | IssueKind::UnboundArray => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            IssueKind::UnterminatedRegion => "repeat region has no end marker",
            IssueKind::OrphanRegionEnd => "end marker has no matching start",
            IssueKind::NestedSameKey => "repeat region nested inside a region with the same key",
            IssueKind::OverlappingRegions => "repeat regions overlap",
            IssueKind::EmptyPathSegment => "placeholder path has an empty segment",
            IssueKind::MissingRowTemplate => "repeat region has no row template",
            IssueKind::NestedRegion => "nested repeat region will not be expanded",
            IssueKind::UnboundArray => "repeat key is not bound to a non-empty array",
        }
    }
}

/// One finding, located by byte offset in the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Array key or placeholder path the issue is about
    pub subject: String,
    pub offset: usize,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, subject: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            subject: subject.into(),
            offset,
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' at offset {}",
            self.kind.describe(),
            self.subject,
            self.offset
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity() {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    /// Warn about repeat keys that `context` does not bind to a non-empty array
    pub fn check_context(&mut self, html: &str, dialect: &dyn MarkerDialect, context: &DataContext) {
        for token in dialect.tokens(html) {
            if let MarkerToken::Start { offset, array_key, .. } = token {
                let bound = matches!(
                    resolve(context.as_value(), &array_key),
                    Some(Value::Array(items)) if !items.is_empty()
                );
                if !bound {
                    self.push(ValidationIssue::new(IssueKind::UnboundArray, array_key, offset));
                }
            }
        }
    }

    /// Errors become [`TemplateError::Invalid`]; warnings pass through
    pub fn into_result(self) -> Result<Self, TemplateError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(TemplateError::invalid(self.errors))
        }
    }
}

/// Check marker balance, nesting, row templates and placeholder paths
pub fn validate_template(html: &str, dialect: &dyn MarkerDialect) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_markers(html, dialect, &mut report);
    check_rows(html, dialect, &mut report);

    for found in placeholder_syntax().matches(html) {
        if found.path.split('.').any(str::is_empty) {
            report.push(ValidationIssue::new(
                IssueKind::EmptyPathSegment,
                found.path,
                found.span.start,
            ));
        }
    }

    report.errors.sort_by_key(|issue| issue.offset);
    report.warnings.sort_by_key(|issue| issue.offset);
    report
}

fn check_markers(html: &str, dialect: &dyn MarkerDialect, report: &mut ValidationReport) {
    // (array key, start offset) of currently open regions
    let mut open: Vec<(String, usize)> = Vec::new();

    for token in dialect.tokens(html) {
        match token {
            MarkerToken::Start { offset, array_key, .. } => {
                if open.iter().any(|(key, _)| *key == array_key) {
                    report.push(ValidationIssue::new(IssueKind::NestedSameKey, &array_key, offset));
                } else if !open.is_empty() {
                    report.push(ValidationIssue::new(IssueKind::NestedRegion, &array_key, offset));
                }
                open.push((array_key, offset));
            }
            MarkerToken::End { offset, array_key } => {
                let Some(position) = open.iter().rposition(|(key, _)| *key == array_key) else {
                    report.push(ValidationIssue::new(IssueKind::OrphanRegionEnd, array_key, offset));
                    continue;
                };
                for (inner, inner_offset) in open.drain(position + 1..) {
                    report.push(ValidationIssue::new(
                        IssueKind::OverlappingRegions,
                        inner,
                        inner_offset,
                    ));
                }
                open.pop();
            }
        }
    }

    for (array_key, offset) in open {
        report.push(ValidationIssue::new(IssueKind::UnterminatedRegion, array_key, offset));
    }
}

fn check_rows(html: &str, dialect: &dyn MarkerDialect, report: &mut ValidationReport) {
    let mut from = 0;
    while let Some(scan) = dialect.next_region(html, from) {
        match scan {
            RegionScan::Unterminated { marker, .. } => from = marker.end,
            RegionScan::Region(region) => {
                if dialect.find_row(&html[region.body.clone()]).is_none() {
                    report.push(ValidationIssue::new(
                        IssueKind::MissingRowTemplate,
                        &region.array_key,
                        region.span.start,
                    ));
                }
                from = region.span.end;
            }
        }
    }
}
