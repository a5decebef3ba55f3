//! Document shell wrapped around rendered element fragments.

use mailweave_core::DocumentConfig;
use tera::{Context, Tera};
use tracing::error;

use crate::error::RenderError;

const DOCUMENT_NAME: &str = "document.html";
const FALLBACK_NAME: &str = "fallback.html";

/// Full document around the element fragments
pub static DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>{{ title }}</title>
</head>
<body style="margin:0;padding:0;background-color:{{ background_color }}">
  <table role="presentation" border="0" cellpadding="0" cellspacing="0" width="100%" style="background-color:{{ background_color }}">
    <tr>
      <td align="center">
        <table role="presentation" border="0" cellpadding="0" cellspacing="0" width="100%" style="max-width:{{ container_width }};background-color:{{ container_background }}">
          <tr>
            <td>{{ body | safe }}</td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#;

/// Static preview document returned when rendering fails
pub static FALLBACK_TEMPLATE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>{{ title }}</title>
</head>
<body style="margin: 0; padding: 0; background-color: {{ background_color }};">
  <table border="0" cellpadding="0" cellspacing="0" width="100%" style="background-color: {{ background_color }};">
    <tr>
      <td align="center" style="padding: 20px 0;">
        <table border="0" cellpadding="0" cellspacing="0" width="{{ container_width_attr }}" style="background-color: {{ container_background }};">
          <tr><td>Template Preview</td></tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#;

/// Returned if even the fallback shell cannot be rendered
const MINIMAL_DOCUMENT: &str = "<!DOCTYPE html><html><head><title>Template Preview</title></head><body><p>Template Preview</p></body></html>";

/// Tera-backed document shell.
///
/// Both shells are `.html` templates, so Tera escapes every context value
/// except the already-rendered body.
#[derive(Debug)]
pub struct DocumentShell {
    tera: Tera,
}

impl DocumentShell {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (DOCUMENT_NAME, DOCUMENT_TEMPLATE),
            (FALLBACK_NAME, FALLBACK_TEMPLATE),
        ])?;

        Ok(Self { tera })
    }

    /// Wrap rendered fragments in the full document
    pub fn document(
        &self,
        title: &str,
        body: &str,
        config: &DocumentConfig,
    ) -> Result<String, RenderError> {
        let mut context = Self::context(title, config);
        context.insert("body", body);
        Ok(self.tera.render(DOCUMENT_NAME, &context)?)
    }

    /// The static preview shell
    pub fn fallback(&self, title: &str, config: &DocumentConfig) -> String {
        match self.tera.render(FALLBACK_NAME, &Self::context(title, config)) {
            Ok(html) => html,
            Err(e) => {
                error!("Failed to render fallback shell: {}", e);
                MINIMAL_DOCUMENT.to_string()
            }
        }
    }

    fn context(title: &str, config: &DocumentConfig) -> Context {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("background_color", &config.background_color);
        context.insert("container_background", &config.container_background);
        context.insert("container_width", &config.container_width);
        context.insert(
            "container_width_attr",
            config.container_width.trim().trim_end_matches("px"),
        );
        context
    }
}
