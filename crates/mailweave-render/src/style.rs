//! Inline CSS helpers.
//!
//! Email clients only reliably honour inline `style` attributes, so every
//! fragment builds its declarations through [`Style`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Four discrete side values in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Sides {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl fmt::Display for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            px(self.top),
            px(self.right),
            px(self.bottom),
            px(self.left)
        )
    }
}

/// Margin or padding value: an explicit shorthand wins over the sides
pub fn resolve_spacing(shorthand: Option<&str>, sides: Sides) -> String {
    match shorthand.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.to_string(),
        None => sides.to_string(),
    }
}

/// Editor spacing props shared by text, image and info-table elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxSpacing {
    pub margin: Option<String>,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub padding: Option<String>,
    pub padding_top: f64,
    pub padding_right: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
}

impl BoxSpacing {
    pub fn margin(&self) -> String {
        resolve_spacing(
            self.margin.as_deref(),
            Sides::new(self.margin_top, self.margin_right, self.margin_bottom, self.margin_left),
        )
    }

    pub fn padding(&self) -> String {
        resolve_spacing(
            self.padding.as_deref(),
            Sides::new(
                self.padding_top,
                self.padding_right,
                self.padding_bottom,
                self.padding_left,
            ),
        )
    }

    pub fn margin_sides(&self) -> Sides {
        Sides::new(self.margin_top, self.margin_right, self.margin_bottom, self.margin_left)
    }
}

/// `16` → `16px`
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Image or column size given either as a number of pixels or a CSS string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(f64),
    Css(String),
}

impl Dimension {
    /// Value for an HTML `width`/`height` attribute, `None` when blank
    pub fn attribute(&self) -> Option<String> {
        match self {
            Dimension::Pixels(value) if *value > 0.0 => Some(value.to_string()),
            Dimension::Pixels(_) => None,
            Dimension::Css(value) => {
                let value = value.trim().trim_end_matches("px");
                (!value.is_empty()).then(|| value.to_string())
            }
        }
    }
}

/// Ordered list of CSS declarations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    declarations: Vec<(&'static str, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration; blank values are skipped
    pub fn set(mut self, property: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.declarations.push((property, value));
        }
        self
    }

    pub fn set_px(self, property: &'static str, value: f64) -> Self {
        self.set(property, px(value))
    }

    /// Background colour, skipped when blank or `transparent`
    pub fn background(self, color: &str) -> Self {
        if color.trim().eq_ignore_ascii_case("transparent") {
            self
        } else {
            self.set("background-color", color)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// `prop:value;prop:value`
    pub fn css(&self) -> String {
        self.declarations
            .iter()
            .map(|(property, value)| format!("{}:{}", property, value))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// HTML-escaped declarations, ready for a `style="..."` attribute
    pub fn attribute(&self) -> String {
        tera::escape_html(&self.css())
    }
}
