use std::path::PathBuf;

use anyhow::Result;
use mailweave_core::{validate_template, MailweaveConfig, TemplateProcessor, ValidationReport};

use crate::utils::{read_context, read_file};

#[derive(Debug)]
pub struct ValidateArgs {
    pub template: PathBuf,
    pub data: Option<PathBuf>,
}

/// Check marker balance and, given sample data, repeat bindings.
/// Returns whether the template is free of errors.
pub fn run(args: ValidateArgs, config: &MailweaveConfig) -> Result<bool> {
    let template = read_file(&args.template)?;
    let report = validate(&template, args.data.as_ref(), config)?;

    for issue in &report.errors {
        eprintln!("❌ {}", issue);
    }
    for issue in &report.warnings {
        eprintln!("⚠️  {}", issue);
    }

    if report.is_valid() {
        println!(
            "✅ {} is valid ({} warnings)",
            args.template.display(),
            report.warnings.len()
        );
    } else {
        println!(
            "❌ {} has {} errors",
            args.template.display(),
            report.errors.len()
        );
    }
    Ok(report.is_valid())
}

pub fn validate(
    template: &str,
    data: Option<&PathBuf>,
    config: &MailweaveConfig,
) -> Result<ValidationReport> {
    let processor = TemplateProcessor::from_config(config)?;
    let mut report = validate_template(template, processor.dialect());

    if let Some(path) = data {
        let context = read_context(path)?;
        report.check_context(template, processor.dialect(), &context);
    }
    Ok(report)
}
