//! Typography grouping and the two typography artifacts.
//!
//! The embed artifact works on typefaces grouped per family; the
//! usage-settings artifact works on the raw ungrouped sequence, preserving
//! its order.

use std::collections::BTreeSet;

use crate::snapshot::Typography;
use crate::weights::{normalize, NormalizedWeight};

use super::GENERATED_HEADER;

/// Fixed grid unit the usage-settings size expression divides by.
const GRID_UNIT: u32 = 80;

/// Typefaces aggregated per family.
///
/// Group order equals first-seen family order in the snapshot. The weight
/// set collapses duplicates; its enumeration order is an implementation
/// detail and not part of the contract.
#[derive(Debug, Clone)]
pub struct TypographyGroup {
    pub family: String,
    pub members: Vec<Typography>,
    pub weights: BTreeSet<NormalizedWeight>,
    pub has_italic: bool,
}

/// Groups typographies by family, accumulating every weight label across all
/// member records and marking the group italic if any member is.
pub fn build_typography_groups(typographies: &[Typography]) -> Vec<TypographyGroup> {
    let mut groups: Vec<TypographyGroup> = Vec::new();
    for typo in typographies {
        let idx = match groups.iter().position(|g| g.family == typo.family) {
            Some(idx) => idx,
            None => {
                groups.push(TypographyGroup {
                    family: typo.family.clone(),
                    members: Vec::new(),
                    weights: BTreeSet::new(),
                    has_italic: false,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        for label in typo.weight.labels() {
            group.weights.insert(NormalizedWeight::from_label(label));
        }
        group.has_italic |= typo.has_italic;
        group.members.push(typo.clone());
    }
    groups
}

/// Renders the embed artifact: one font-face block per (family, weight)
/// pair, plus an italic variant per pair when the group has italic members.
pub fn render_embed(groups: &[TypographyGroup]) -> String {
    let mut out = String::from(GENERATED_HEADER);
    out.push('\n');
    for group in groups {
        for weight in &group.weights {
            out.push_str(&font_face(&group.family, weight, false));
            if group.has_italic {
                out.push_str(&font_face(&group.family, weight, true));
            }
        }
    }
    out
}

fn font_face(family: &str, weight: &NormalizedWeight, italic: bool) -> String {
    let style = if italic { "italic" } else { "normal" };
    let suffix = if italic { "-italic" } else { "" };
    // The weight label keys the font file names the embed points at.
    let file_stem = format!("{}-{}{}", slug(family), weight.label, suffix);
    format!(
        "@font-face {{\n  font-family: \"{family}\";\n  src: url(\"fonts/{file_stem}.woff2\") format(\"woff2\"),\n       url(\"fonts/{file_stem}.woff\") format(\"woff\");\n  font-weight: {};\n  font-style: {style};\n}}\n\n",
        weight.numeric
    )
}

/// Renders the usage-settings artifact over the ungrouped sequence, one
/// mixin block per (entry, weight) pair in original order.
pub fn render_usage_settings(typographies: &[Typography]) -> String {
    let mut out = String::from(GENERATED_HEADER);
    out.push('\n');
    for typo in typographies {
        for label in typo.weight.labels() {
            let numeric = normalize(label);
            out.push_str(&format!(
                "@mixin {}-{} {{\n  font-family: \"{}\";\n  font-size: grid({}/{GRID_UNIT});\n  font-weight: {numeric};\n}}\n\n",
                slug(&typo.family),
                label.to_ascii_lowercase(),
                typo.family,
                typo.base_size
            ));
        }
    }
    out
}

fn slug(family: &str) -> String {
    family.to_ascii_lowercase().replace(' ', "-")
}
