use std::path::PathBuf;

use anyhow::{Context, Result};
use mailweave_core::{DataContext, MailweaveConfig, ProcessReport, TemplateProcessor};
use tracing::{info, warn};

use crate::utils::{read_context, read_file, write_output};

#[derive(Debug)]
pub struct ProcessArgs {
    pub template: PathBuf,
    pub data: PathBuf,
    pub report: bool,
    pub out: Option<PathBuf>,
}

/// Fill a template with a data context
pub fn run(args: ProcessArgs, config: &MailweaveConfig) -> Result<()> {
    let template = read_file(&args.template)?;
    let context = read_context(&args.data)?;

    let (html, report) = process(&template, &context, config)?;
    write_output(args.out.as_ref(), &html)?;

    if args.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        eprintln!("{}", json);
    }
    Ok(())
}

pub fn process(
    template: &str,
    context: &DataContext,
    config: &MailweaveConfig,
) -> Result<(String, ProcessReport)> {
    let processor = TemplateProcessor::from_config(config)?;
    let (html, report) = processor.process_with_report(template, context);

    info!(
        "📬 Expanded {} regions into {} rows",
        report.regions.len(),
        report.expanded_rows()
    );
    if !report.unresolved.is_empty() {
        warn!(
            "{} placeholders left unresolved: {}",
            report.unresolved.len(),
            report
                .unresolved
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok((html, report))
}
