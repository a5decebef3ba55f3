//! Data context and dotted-path resolution.
//!
//! A [`DataContext`] is the per-send data a template is filled with: an
//! arbitrary-depth JSON object. Paths such as `order.total` address values
//! inside it, one mapping key per dot-separated segment.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::error::TemplateError;

/// Runtime data a template is processed against.
///
/// The root is always a JSON object; a non-object value is stored under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct DataContext {
    root: Value,
}

impl DataContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Insert a top-level key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        if let Value::Object(map) = &mut self.root {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Parse a context from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, TemplateError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from(value))
    }

    /// Resolve a dotted path against this context
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        resolve(&self.root, path)
    }

    /// Borrow the underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

impl Default for DataContext {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Map<String, Value>> for DataContext {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            root: Value::Object(map),
        }
    }
}

impl From<Value> for DataContext {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from(map),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                Self::from(map)
            }
        }
    }
}

impl From<DataContext> for Value {
    fn from(context: DataContext) -> Self {
        context.root
    }
}

/// Conversion of caller data into a [`DataContext`]
pub trait IntoDataContext {
    fn into_context(self) -> Result<DataContext, TemplateError>;
}

impl<T: Serialize> IntoDataContext for T {
    fn into_context(self) -> Result<DataContext, TemplateError> {
        Ok(DataContext::from(serde_json::to_value(self)?))
    }
}

/// Resolve `path` inside `context`.
///
/// Every segment must name a key of a mapping holding a non-null value;
/// otherwise the path is unresolved. An intermediate object is never
/// returned for a partially matching path.
pub fn resolve<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = context;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => match map.get(segment) {
                Some(Value::Null) | None => return None,
                Some(value) => value,
            },
            _ => return None,
        };
    }

    Some(current)
}

/// Text for a resolved value, or `None` when the value cannot stand in for a
/// placeholder (mappings, sequences, null).
///
/// Numbers are written as their JSON text; any locale formatting must already
/// be present in the context as a string.
pub fn stringify(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
