//! Wire-format data model for a fetched project snapshot.
//!
//! One snapshot is fetched per run and owned transiently by that run; it is
//! never persisted. Field names follow the API's camelCase JSON.

use serde::Deserialize;

/// One fetched, immutable copy of a project's design-token state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub color_status: bool,
    pub typo_status: bool,
    pub font_status: bool,
    pub grid_status: bool,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub typographies: Vec<Typography>,
    #[serde(default)]
    pub grids: Vec<GridValue>,
}

impl ProjectSnapshot {
    /// Readiness gate: every token category must be marked complete upstream
    /// before any artifact or asset task is allowed to run.
    pub fn is_ready(&self) -> bool {
        self.color_status && self.typo_status && self.font_status && self.grid_status
    }
}

/// A named color token.
#[derive(Debug, Clone, Deserialize)]
pub struct Color {
    pub name: String,
    pub value: String,
}

/// One typeface record. `weight` arrives from the API either as a single
/// label or as a list of labels; [`WeightField`] absorbs both shapes so the
/// builders only ever see an ordered sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub family: String,
    pub weight: WeightField,
    #[serde(default)]
    pub has_italic: bool,
    pub base_size: f64,
}

/// Tagged union over the API's duck-typed weight field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WeightField {
    One(String),
    Many(Vec<String>),
}

impl WeightField {
    /// The weight labels as an ordered slice, regardless of wire shape.
    pub fn labels(&self) -> &[String] {
        match self {
            WeightField::One(label) => std::slice::from_ref(label),
            WeightField::Many(labels) => labels,
        }
    }
}

/// One grid entry. Only index 0 of the snapshot's sequence is ever consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct GridValue {
    pub value: String,
}
