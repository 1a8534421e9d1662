//! Font-weight label normalisation.

/// A weight label paired with the numeric value it renders as.
///
/// Ordering is (numeric, label) so a set of these enumerates
/// deterministically; consumers must not rely on that order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedWeight {
    pub numeric: u16,
    pub label: String,
}

impl NormalizedWeight {
    pub fn from_label(label: &str) -> Self {
        Self {
            numeric: normalize(label),
            label: label.to_ascii_lowercase(),
        }
    }
}

/// Maps a human-readable weight label to its numeric stylesheet value.
///
/// Lookup is case-insensitive; an unrecognised label maps to 400 rather than
/// erroring, so a new label upstream never breaks a sync.
pub fn normalize(label: &str) -> u16 {
    match label.to_ascii_lowercase().as_str() {
        "thin" => 200,
        "light" => 300,
        "regular" => 400,
        "medium" => 500,
        "semibold" => 600,
        "bold" => 700,
        "heavy" => 900,
        _ => 400,
    }
}
