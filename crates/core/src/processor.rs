use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

use crate::config::MailweaveConfig;
use crate::context::DataContext;
use crate::error::TemplateError;
use crate::markers::{DialectKind, MarkerDialect};
use crate::placeholder::placeholder_syntax;
use crate::repeat::{expand, Piece, Pieces};
use crate::report::ProcessReport;

/// Substitution engine: expands repeat regions, then fills placeholders.
///
/// Holds only compiled marker patterns, so one instance can be shared across
/// threads for batch sends.
#[derive(Debug)]
pub struct TemplateProcessor {
    dialect: Box<dyn MarkerDialect>,
}

impl TemplateProcessor {
    /// Processor for the default comment dialect
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_dialect(DialectKind::default())
    }

    pub fn with_dialect(kind: DialectKind) -> Result<Self, TemplateError> {
        Ok(Self {
            dialect: kind.build()?,
        })
    }

    pub fn from_config(config: &MailweaveConfig) -> Result<Self, TemplateError> {
        Self::with_dialect(config.dialect)
    }

    pub fn dialect(&self) -> &dyn MarkerDialect {
        self.dialect.as_ref()
    }

    /// Replace top-level placeholders only; repeat markers are left alone
    pub fn substitute_placeholders(&self, text: &str, context: &DataContext) -> String {
        placeholder_syntax().substitute(text, context.as_value())
    }

    /// Expand repeat regions only; placeholders outside rows are left alone
    pub fn expand_repeats(&self, html: &str, context: &DataContext) -> String {
        let mut report = ProcessReport::new();
        expand(html, self.dialect(), context.as_value(), &mut report).concat()
    }

    /// Expand repeat regions, then substitute placeholders against the full context
    pub fn process(&self, template: &str, context: &DataContext) -> String {
        self.process_with_report(template, context).0
    }

    /// [`process`](Self::process), also returning what happened to each region
    /// and which placeholders stayed unresolved
    pub fn process_with_report(
        &self,
        template: &str,
        context: &DataContext,
    ) -> (String, ProcessReport) {
        let mut report = ProcessReport::new();
        let pieces = expand(template, self.dialect(), context.as_value(), &mut report);
        let html = fill(&pieces, context.as_value(), &mut report);

        debug!(
            "Processed template: {} regions, {} rows, {} unresolved placeholders",
            report.regions.len(),
            report.expanded_rows(),
            report.unresolved.len()
        );

        (html, report)
    }
}

impl Default for TemplateProcessor {
    fn default() -> Self {
        Self::new().expect("Failed to compile marker patterns")
    }
}

fn fill(pieces: &Pieces<'_>, context: &Value, report: &mut ProcessReport) -> String {
    let syntax = placeholder_syntax();
    let mut out = String::with_capacity(pieces.len_hint());

    for piece in pieces.iter() {
        match piece {
            Piece::Markup(text) => syntax.substitute_into(text, context, &mut out, &mut report.unresolved),
            Piece::Literal(text) => out.push_str(text),
        }
    }

    out
}

static GLOBAL_PROCESSOR: OnceLock<TemplateProcessor> = OnceLock::new();

/// Shared processor for the default dialect
pub fn global_processor() -> &'static TemplateProcessor {
    GLOBAL_PROCESSOR.get_or_init(TemplateProcessor::default)
}

/// Expand comment-dialect repeat regions in `html`
pub fn expand_repeats(html: &str, context: &DataContext) -> String {
    global_processor().expand_repeats(html, context)
}

/// Fully process a comment-dialect template
pub fn process_template(template: &str, context: &DataContext) -> String {
    global_processor().process(template, context)
}
