//! # mailweave-core
//!
//! Substitution engine for email templates produced by the mailweave renderer.
//!
//! ## Features
//!
//! - `[[path]]` placeholders resolved against a nested JSON data context
//! - Repeat regions expanded once per array element, with item-scoped placeholders
//! - Swappable marker dialects (HTML comments or `data-repeat-*` attributes)
//! - Save-time validation of marker balance and repeat bindings
//! - Built-in variable catalog for previews

pub mod config;
pub mod context;
pub mod error;
pub mod markers;
pub mod placeholder;
pub mod processor;
mod repeat;
pub mod report;
pub mod validation;
pub mod variables;

pub use config::*;
pub use context::*;
pub use error::*;
pub use markers::*;
pub use placeholder::*;
pub use processor::*;
pub use report::*;
pub use validation::*;
pub use variables::*;
