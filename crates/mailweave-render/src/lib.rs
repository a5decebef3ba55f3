//! # mailweave-render
//!
//! Turns an email editor document into a mail-safe HTML template that the
//! `mailweave-core` substitution engine fills at send time.
//!
//! ```no_run
//! use mailweave_render::{RawElement, TemplateRenderer};
//! use mailweave_core::DialectKind;
//!
//! let elements: Vec<RawElement> = serde_json::from_str(r#"[
//!     { "id": "1", "type": "heading", "props": { "content": "Siparişiniz alındı" } },
//!     { "id": "2", "type": "product_row", "props": { "displayMode": "table" } }
//! ]"#).unwrap();
//!
//! let renderer = TemplateRenderer::with_dialect(DialectKind::Comment).unwrap();
//! let template = renderer.render_raw(&elements, "Sipariş Onayı");
//! ```

pub mod element;
pub mod error;
pub mod renderer;
pub mod shell;
pub mod style;

pub use element::*;
pub use error::*;
pub use renderer::*;
pub use shell::*;
pub use style::*;
