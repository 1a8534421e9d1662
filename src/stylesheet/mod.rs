//! Stylesheet artifact builders.
//!
//! Pure text renderers: no network or filesystem access, deterministic for a
//! given snapshot. Each builder returns the fully rendered artifact so the
//! caller always observes complete text before writing it anywhere.

pub mod typography;

pub use typography::{
    build_typography_groups, render_embed, render_usage_settings, TypographyGroup,
};

use std::collections::HashSet;

use tracing::debug;

use crate::error::SyncError;
use crate::snapshot::{Color, GridValue};

pub(crate) const GENERATED_HEADER: &str = "// Generated by parlor. Do not edit by hand.\n";

/// Renders the custom-colors artifact.
///
/// Colors are deduplicated by name in input order: the first occurrence of a
/// name wins and later duplicates are dropped entirely, not renamed.
pub fn build_colors(colors: &[Color]) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = String::from(GENERATED_HEADER);
    out.push('\n');
    for color in colors {
        if !seen.insert(color.name.as_str()) {
            debug!(name = %color.name, "Dropping color with duplicate name");
            continue;
        }
        out.push_str(&format!("${}: {};\n", color.name, color.value));
    }
    out
}

/// Renders the grid artifact from the snapshot's first grid entry.
///
/// Entries past index 0 are ignored on purpose: the API reports a single
/// column count per project and the trailing entries are historical noise.
pub fn build_grid(grids: &[GridValue]) -> Result<String, SyncError> {
    let first = grids.first().ok_or(SyncError::EmptyGrid)?;
    Ok(format!(
        "{GENERATED_HEADER}\n$grid-columns: {};\n",
        first.value
    ))
}
