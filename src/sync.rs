//! Pipeline orchestrator: fan out one independent task per requested kind.
//!
//! Control flow: snapshot → readiness gate → one async task per kind → per-kind
//! [`KindOutcome`]. Tasks for distinct kinds have no ordering guarantee and no
//! shared mutable state beyond the read-only [`Config`]; each task is
//! internally sequential. A failing task is caught at its boundary and never
//! aborts its siblings, so partial success is a valid run outcome.

use std::fmt;
use std::str::FromStr;

use futures::future::join_all;
use tracing::{error, info};

use crate::api::ParlorApi;
use crate::assets::{self, AssetKind};
use crate::config::Config;
use crate::error::SyncError;
use crate::output::write_artifact;
use crate::snapshot::ProjectSnapshot;
use crate::stylesheet;

/// One synchronisable category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    Colors,
    Grid,
    Typo,
    Fonts,
    Images,
}

/// Every kind, in the order a full run reports them.
pub const ALL_KINDS: [SyncKind; 5] = [
    SyncKind::Colors,
    SyncKind::Grid,
    SyncKind::Typo,
    SyncKind::Fonts,
    SyncKind::Images,
];

impl SyncKind {
    pub fn name(self) -> &'static str {
        match self {
            SyncKind::Colors => "colors",
            SyncKind::Grid => "grid",
            SyncKind::Typo => "typo",
            SyncKind::Fonts => "fonts",
            SyncKind::Images => "images",
        }
    }
}

impl fmt::Display for SyncKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SyncKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "colors" => Ok(SyncKind::Colors),
            "grid" => Ok(SyncKind::Grid),
            "typo" => Ok(SyncKind::Typo),
            "fonts" => Ok(SyncKind::Fonts),
            "images" => Ok(SyncKind::Images),
            other => Err(format!(
                "unknown kind '{other}' (expected colors, grid, typo, fonts or images)"
            )),
        }
    }
}

/// Result of one kind's task.
#[derive(Debug)]
pub struct KindOutcome {
    pub kind: SyncKind,
    pub result: Result<(), SyncError>,
}

/// Per-kind results of one orchestrator run.
#[derive(Debug)]
pub struct SyncReport {
    pub outcomes: Vec<KindOutcome>,
}

impl SyncReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Runs the pipeline for the requested kinds against one snapshot.
///
/// Returns `Err(NotReady)` before dispatching anything if the snapshot's
/// readiness gate fails; otherwise always returns a full report, one outcome
/// per distinct requested kind. Duplicate kinds collapse to a single task so
/// concurrent tasks always target disjoint output paths.
pub async fn run<A>(
    api: &A,
    snapshot: &ProjectSnapshot,
    kinds: &[SyncKind],
    config: &Config,
) -> Result<SyncReport, SyncError>
where
    A: ParlorApi + ?Sized,
{
    if !snapshot.is_ready() {
        error!("Project not finished: all four token categories must be complete before syncing");
        return Err(SyncError::NotReady);
    }
    let mut requested: Vec<SyncKind> = Vec::new();
    for &kind in kinds {
        if !requested.contains(&kind) {
            requested.push(kind);
        }
    }
    info!(kinds = ?requested, "Project ready, dispatching sync tasks");

    let tasks = requested.iter().map(|&kind| async move {
        let result = run_kind(api, snapshot, kind, config).await;
        match &result {
            Ok(()) => info!(kind = %kind, "Sync task finished"),
            Err(e) => error!(kind = %kind, error = %e, "Sync task failed"),
        }
        KindOutcome { kind, result }
    });

    let outcomes = join_all(tasks).await;
    Ok(SyncReport { outcomes })
}

async fn run_kind<A>(
    api: &A,
    snapshot: &ProjectSnapshot,
    kind: SyncKind,
    config: &Config,
) -> Result<(), SyncError>
where
    A: ParlorApi + ?Sized,
{
    match kind {
        SyncKind::Colors => {
            let text = stylesheet::build_colors(&snapshot.colors);
            write_artifact(&config.colors.path, &config.colors.filename, &text).await
        }
        SyncKind::Grid => {
            let text = stylesheet::build_grid(&snapshot.grids)?;
            write_artifact(&config.grid.path, &config.grid.filename, &text).await
        }
        SyncKind::Typo => {
            let groups = stylesheet::build_typography_groups(&snapshot.typographies);
            let embed = stylesheet::render_embed(&groups);
            let usage = stylesheet::render_usage_settings(&snapshot.typographies);
            write_artifact(&config.typo.path, &config.typo.embed_filename, &embed).await?;
            write_artifact(&config.typo.path, &config.typo.usage_filename, &usage).await
        }
        SyncKind::Fonts => assets::sync_assets(api, AssetKind::Fonts, &config.fonts_dir).await,
        SyncKind::Images => assets::sync_assets(api, AssetKind::Images, &config.images_dir).await,
    }
}
