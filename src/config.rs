//! Immutable run configuration.

use std::path::PathBuf;

use tracing::{debug, info};

pub const DEFAULT_HOST: &str = "https://api.parlor.app";
pub const DEFAULT_COLORS_FILE: &str = "_parlor-custom-colors.scss";
pub const DEFAULT_GRID_FILE: &str = "_parlor-grid.scss";
pub const DEFAULT_EMBED_FILE: &str = "_parlor-embed.scss";
pub const DEFAULT_USAGE_FILE: &str = "_parlor-usage.scss";

/// Configuration for one pipeline run.
///
/// Constructed once by `load_config` and passed by reference into the
/// orchestrator and every task; no task mutates it.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub username: String,
    pub password: String,
    pub project_id: String,
    pub colors: ArtifactTarget,
    pub grid: ArtifactTarget,
    pub typo: TypographyTarget,
    pub fonts_dir: PathBuf,
    pub images_dir: PathBuf,
}

/// Output location for a single-file stylesheet artifact.
#[derive(Debug, Clone)]
pub struct ArtifactTarget {
    pub path: PathBuf,
    pub filename: String,
}

/// Output location for the two typography artifacts.
#[derive(Debug, Clone)]
pub struct TypographyTarget {
    pub path: PathBuf,
    pub embed_filename: String,
    pub usage_filename: String,
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(
            host = %self.host,
            project_id = %self.project_id,
            colors = %self.colors.path.join(&self.colors.filename).display(),
            fonts_dir = %self.fonts_dir.display(),
            images_dir = %self.images_dir.display(),
            "Loaded Config"
        );
        debug!(host = %self.host, project_id = %self.project_id, "Config loaded (credentials elided)");
    }
}
