use anyhow::{Context, Result};
use mailweave_core::{format_variable, VariableCatalog};

/// Print the built-in variable catalog
pub fn run(json: bool) -> Result<()> {
    let catalog = VariableCatalog::builtin();
    if json {
        let output = serde_json::to_string_pretty(&catalog).context("Failed to encode catalog")?;
        println!("{}", output);
    } else {
        print!("{}", format_catalog(&catalog));
    }
    Ok(())
}

pub fn format_catalog(catalog: &VariableCatalog) -> String {
    let mut out = String::new();
    for category in &catalog.categories {
        out.push_str(&format!("{} {}\n", category.icon, category.label));
        for variable in &category.variables {
            out.push_str(&format!(
                "  {:<36} {:<28} {}\n",
                format_variable(&variable.key),
                variable.label,
                variable.example
            ));
        }
        out.push('\n');
    }
    out.push_str(&format!("{} variables\n", catalog.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_listing() {
        let text = format_catalog(&VariableCatalog::builtin());
        assert!(text.contains("[[müşteri_adı]]"));
        assert!(text.contains("Yurtiçi Kargo"));
        assert!(text.ends_with("33 variables\n"));
    }
}
