use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mailweave_core::{DataContext, DialectKind, MailweaveConfig};

/// Load configuration from `path` (or defaults), apply `MAILWEAVE_*` overrides,
/// then the `--dialect` flag
pub fn load_config(path: Option<&Path>, dialect: Option<DialectKind>) -> Result<MailweaveConfig> {
    let mut config = match path {
        Some(path) => MailweaveConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MailweaveConfig::from_env().context("Invalid MAILWEAVE_* environment")?,
    };

    if let Some(dialect) = dialect {
        config.dialect = dialect;
    }
    Ok(config)
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn read_context(path: &Path) -> Result<DataContext> {
    let json = read_file(path)?;
    DataContext::from_json_str(&json)
        .with_context(|| format!("Invalid data context in {}", path.display()))
}

/// Write `content` to `out`, or to stdout when no file is given
pub fn write_output(out: Option<&PathBuf>, content: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✅ Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

pub fn parse_dialect(value: &str) -> Result<DialectKind, String> {
    value.parse::<DialectKind>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dialect_flag_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mailweave.yaml");
        fs::write(&path, "dialect: comment\ndocument:\n  container_width: 640px\n").unwrap();

        let config = load_config(Some(&path), Some(DialectKind::Attribute)).unwrap();
        assert_eq!(config.dialect, DialectKind::Attribute);
        assert_eq!(config.document.container_width, "640px");
    }

    #[test]
    fn test_missing_files_name_the_path() {
        let err = read_context(Path::new("/nonexistent/ctx.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/ctx.json"));
    }

    #[test]
    fn test_context_file_parsing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ctx.json");

        fs::write(&path, "[1, 2]").unwrap();
        let context = read_context(&path).unwrap();
        assert_eq!(context.resolve("data.0"), None);
        assert!(context.resolve("data").is_some());

        fs::write(&path, "{ \"order\": ").unwrap();
        assert!(read_context(&path).is_err());
    }

    #[test]
    fn test_parse_dialect() {
        assert_eq!(parse_dialect("attribute"), Ok(DialectKind::Attribute));
        assert!(parse_dialect("xml").is_err());
    }
}
