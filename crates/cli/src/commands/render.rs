use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mailweave_core::MailweaveConfig;
use mailweave_render::{CanvasElement, RawElement, TemplateRenderer};
use serde::Deserialize;
use tracing::info;

use crate::utils::{read_file, write_output};

#[derive(Debug)]
pub struct RenderArgs {
    pub input: PathBuf,
    pub name: Option<String>,
    pub out: Option<PathBuf>,
    pub strict: bool,
}

/// Editor export: a bare element list or a saved template record
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EditorDocument {
    Elements(Vec<RawElement>),
    Template {
        #[serde(default)]
        name: Option<String>,
        elements: Vec<RawElement>,
    },
}

/// Render an editor document into a template
pub fn run(args: RenderArgs, config: &MailweaveConfig) -> Result<()> {
    let html = render_file(&args, config)?;
    write_output(args.out.as_ref(), &html)
}

pub fn render_file(args: &RenderArgs, config: &MailweaveConfig) -> Result<String> {
    let json = read_file(&args.input)?;
    let document: EditorDocument = serde_json::from_str(&json)
        .with_context(|| format!("Invalid editor document {}", args.input.display()))?;

    let (stored_name, elements) = match document {
        EditorDocument::Elements(elements) => (None, elements),
        EditorDocument::Template { name, elements } => (name, elements),
    };
    let name = args
        .name
        .clone()
        .or(stored_name)
        .unwrap_or_else(|| file_stem(&args.input));

    let renderer = TemplateRenderer::new(config)?;
    info!("🎨 Rendering '{}' ({} elements)", name, elements.len());

    if args.strict {
        let elements = elements
            .into_iter()
            .map(CanvasElement::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(renderer.try_render(&elements, &name)?)
    } else {
        Ok(renderer.render_raw(&elements, &name))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
