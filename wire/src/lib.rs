//! Shared wire contract for committing canvas edits back into page sources.
//!
//! This crate owns the JSON shapes exchanged between the editor (`canvas`),
//! the patch endpoint (`server`) and the `cli`. It also owns the length
//! formatting rules so every layer writes `"115px"` the same way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Units accepted after the numeric part of a length value.
const LENGTH_UNITS: [&str; 7] = ["", "px", "%", "em", "rem", "vw", "vh"];

/// Error returned by the `validate` methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// A patch field is not a plain length such as `"12px"` or `"50%"`.
    #[error("`{field}` is not a length: {value:?}")]
    InvalidLength { field: &'static str, value: String },
    /// The request does not name a target element.
    #[error("selectedId must not be empty")]
    MissingTarget,
}

/// Partial geometry update. Only present fields are merged into the element's style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
}

impl LayoutPatch {
    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.top.is_none() && self.left.is_none()
    }

    /// Present fields as `(style key, value)` pairs in canonical emission order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("width", self.width.as_deref()),
            ("height", self.height.as_deref()),
            ("top", self.top.as_deref()),
            ("left", self.left.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
    }

    /// Check every present field is a plain length.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidLength`] for the first offending field.
    pub fn validate(&self) -> Result<(), WireError> {
        for (field, value) in self.fields() {
            if !is_length(value) {
                return Err(WireError::InvalidLength { field, value: value.to_owned() });
            }
        }
        Ok(())
    }
}

/// `POST /api/projects/{project}/update-element` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateElementRequest {
    /// Stable identifier attribute value of the edited element.
    #[serde(rename = "selectedId")]
    pub selected_id: String,
    pub patch: LayoutPatch,
}

impl UpdateElementRequest {
    #[must_use]
    pub fn new(selected_id: impl Into<String>, patch: LayoutPatch) -> Self {
        Self { selected_id: selected_id.into(), patch }
    }

    /// # Errors
    ///
    /// Returns [`WireError::MissingTarget`] for an empty id, or the patch's
    /// validation error.
    pub fn validate(&self) -> Result<(), WireError> {
        if self.selected_id.trim().is_empty() {
            return Err(WireError::MissingTarget);
        }
        self.patch.validate()
    }
}

/// Response body for the update endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateElementResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Grepable error code, e.g. `E_AMBIGUOUS_TARGET`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl UpdateElementResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self { success: true, error: None, code: None }
    }

    #[must_use]
    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self { success: false, error: Some(message.into()), code: Some(code.to_owned()) }
    }
}

/// A tagged element as listed by `GET /api/projects/{project}/elements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSummary {
    pub id: String,
    pub tag: String,
    /// Style declarations whose values are plain literals.
    pub style: BTreeMap<String, String>,
}

impl ElementSummary {
    /// Numeric value of a style key such as `"left"`, if it is a length.
    #[must_use]
    pub fn length(&self, key: &str) -> Option<f64> {
        self.style.get(key).and_then(|v| parse_px(v))
    }
}

/// Path of the update endpoint for a project.
#[must_use]
pub fn update_element_path(project: &str) -> String {
    format!("/api/projects/{project}/update-element")
}

/// Path of the element listing endpoint for a project.
#[must_use]
pub fn elements_path(project: &str) -> String {
    format!("/api/projects/{project}/elements")
}

/// Format a canvas-local number as a pixel length.
///
/// At most three decimals are kept and trailing zeros are trimmed.
#[must_use]
pub fn px(value: f64) -> String {
    if !value.is_finite() {
        return "0px".to_owned();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    let mut text = format!("{rounded:.3}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    if text == "-0" {
        text = "0".to_owned();
    }
    format!("{text}px")
}

/// Parse `"12px"`, `"12"` or `"-3.5px"` into a number.
#[must_use]
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    match number.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

/// `-?digits(.digits)?unit` with a known unit and no surrounding whitespace.
fn is_length(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let numeric_end = unsigned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(unsigned.len());
    let (number, unit) = unsigned.split_at(numeric_end);

    let mut parts = number.split('.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();
    if parts.next().is_some() {
        return false;
    }
    let has_digits = !whole.is_empty() || fraction.is_some_and(|f| !f.is_empty());
    let fraction_ok = fraction.is_none_or(|f| !f.is_empty());
    has_digits && fraction_ok && LENGTH_UNITS.contains(&unit)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
