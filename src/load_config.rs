use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::{
    ArtifactTarget, Config, TypographyTarget, DEFAULT_COLORS_FILE, DEFAULT_EMBED_FILE,
    DEFAULT_GRID_FILE, DEFAULT_HOST, DEFAULT_USAGE_FILE,
};

#[derive(Deserialize)]
struct StaticConfig {
    #[serde(default)]
    host: Option<String>,
    project_id: String,
    output: OutputSection,
}

#[derive(Deserialize)]
struct OutputSection {
    colors: TargetSection,
    grid: TargetSection,
    typo: TypoSection,
    fonts: std::path::PathBuf,
    images: std::path::PathBuf,
}

#[derive(Deserialize)]
struct TargetSection {
    path: std::path::PathBuf,
    #[serde(default)]
    filename: Option<String>,
}

#[derive(Deserialize)]
struct TypoSection {
    path: std::path::PathBuf,
    #[serde(default)]
    embed_filename: Option<String>,
    #[serde(default)]
    usage_filename: Option<String>,
}

/// Loads a static YAML config file (no secrets) and injects required env
/// vars for credentials. Returns a fully merged [`Config`] or an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let static_conf: StaticConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let username = match std::env::var("PARLOR_USERNAME") {
        Ok(v) => v,
        Err(e) => {
            error!(error = ?e, "PARLOR_USERNAME environment variable not set");
            return Err(anyhow::anyhow!(
                "PARLOR_USERNAME environment variable not set: {e}"
            ));
        }
    };
    let password = match std::env::var("PARLOR_PASSWORD") {
        Ok(v) => v,
        Err(e) => {
            error!(error = ?e, "PARLOR_PASSWORD environment variable not set");
            return Err(anyhow::anyhow!(
                "PARLOR_PASSWORD environment variable not set: {e}"
            ));
        }
    };

    let config = Config {
        host: static_conf
            .host
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .trim_end_matches('/')
            .to_string(),
        username,
        password,
        project_id: static_conf.project_id,
        colors: ArtifactTarget {
            path: static_conf.output.colors.path,
            filename: static_conf
                .output
                .colors
                .filename
                .unwrap_or_else(|| DEFAULT_COLORS_FILE.to_string()),
        },
        grid: ArtifactTarget {
            path: static_conf.output.grid.path,
            filename: static_conf
                .output
                .grid
                .filename
                .unwrap_or_else(|| DEFAULT_GRID_FILE.to_string()),
        },
        typo: TypographyTarget {
            path: static_conf.output.typo.path,
            embed_filename: static_conf
                .output
                .typo
                .embed_filename
                .unwrap_or_else(|| DEFAULT_EMBED_FILE.to_string()),
            usage_filename: static_conf
                .output
                .typo
                .usage_filename
                .unwrap_or_else(|| DEFAULT_USAGE_FILE.to_string()),
        },
        fonts_dir: static_conf.output.fonts,
        images_dir: static_conf.output.images,
    };

    config.trace_loaded();
    Ok(config)
}
