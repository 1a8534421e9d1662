use std::io;
use std::io::Write as _;
use std::path::Path;

use bytes::Bytes;
use futures::StreamExt;
use mockall::predicate::eq;
use tempfile::tempdir;

use parlor::api::{ByteStream, MockParlorApi};
use parlor::assets::{sync_assets, AssetKind};
use parlor::config::{ArtifactTarget, Config, TypographyTarget};
use parlor::error::SyncError;
use parlor::snapshot::{Color, GridValue, ProjectSnapshot, Typography, WeightField};
use parlor::sync::{run, SyncKind, ALL_KINDS};

fn test_config(root: &Path) -> Config {
    Config {
        host: "https://api.parlor.app".to_string(),
        username: "user".to_string(),
        password: "secret".to_string(),
        project_id: "proj-1".to_string(),
        colors: ArtifactTarget {
            path: root.join("styles"),
            filename: "_parlor-custom-colors.scss".to_string(),
        },
        grid: ArtifactTarget {
            path: root.join("styles"),
            filename: "_parlor-grid.scss".to_string(),
        },
        typo: TypographyTarget {
            path: root.join("styles"),
            embed_filename: "_parlor-embed.scss".to_string(),
            usage_filename: "_parlor-usage.scss".to_string(),
        },
        fonts_dir: root.join("assets"),
        images_dir: root.join("assets"),
    }
}

fn ready_snapshot() -> ProjectSnapshot {
    ProjectSnapshot {
        color_status: true,
        typo_status: true,
        font_status: true,
        grid_status: true,
        colors: vec![Color {
            name: "red".to_string(),
            value: "#f00".to_string(),
        }],
        typographies: vec![Typography {
            family: "Sans".to_string(),
            weight: WeightField::One("regular".to_string()),
            has_italic: false,
            base_size: 16.0,
        }],
        grids: vec![GridValue {
            value: "12".to_string(),
        }],
    }
}

/// Builds an in-memory zip archive with the given entries.
fn zip_bundle(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut cursor = io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options = zip::write::FileOptions::default();
        for (name, data) in entries {
            writer.start_file(*name, options).expect("start zip entry");
            writer.write_all(data).expect("write zip entry");
        }
        writer.finish().expect("finish zip");
    }
    cursor.into_inner()
}

fn stream_of(bytes: Vec<u8>) -> ByteStream {
    futures::stream::iter(vec![Ok(Bytes::from(bytes))]).boxed()
}

#[tokio::test]
async fn not_ready_blocks_every_task() {
    let out = tempdir().expect("tempdir");
    let config = test_config(out.path());
    let mut snapshot = ready_snapshot();
    snapshot.font_status = false;

    // No expectations: any API call would panic the mock.
    let api = MockParlorApi::new();

    let result = run(&api, &snapshot, &ALL_KINDS, &config).await;
    assert!(matches!(result, Err(SyncError::NotReady)));
    assert!(
        !config.colors.path.join(&config.colors.filename).exists(),
        "no partial artifacts may be written when the gate fails"
    );
}

#[tokio::test]
async fn full_run_writes_artifacts_and_unpacks_bundles() {
    let out = tempdir().expect("tempdir");
    let config = test_config(out.path());
    let snapshot = ready_snapshot();

    let fonts_zip = zip_bundle(&[("Sans-Regular.woff", b"font-bytes" as &[u8])]);
    let images_zip = zip_bundle(&[("logo.png", b"png-bytes" as &[u8])]);

    let mut api = MockParlorApi::new();
    api.expect_fetch_bundle()
        .with(eq(AssetKind::Fonts))
        .returning(move |_| Ok(stream_of(fonts_zip.clone())));
    api.expect_fetch_bundle()
        .with(eq(AssetKind::Images))
        .returning(move |_| Ok(stream_of(images_zip.clone())));

    let report = run(&api, &snapshot, &ALL_KINDS, &config)
        .await
        .expect("gate passes");
    assert!(report.all_succeeded());
    assert_eq!(report.outcomes.len(), 5);

    let styles = out.path().join("styles");
    let colors = std::fs::read_to_string(styles.join("_parlor-custom-colors.scss")).unwrap();
    assert!(colors.contains("$red: #f00;"));
    let grid = std::fs::read_to_string(styles.join("_parlor-grid.scss")).unwrap();
    assert!(grid.contains("$grid-columns: 12;"));
    let embed = std::fs::read_to_string(styles.join("_parlor-embed.scss")).unwrap();
    assert!(embed.contains("@font-face"));
    let usage = std::fs::read_to_string(styles.join("_parlor-usage.scss")).unwrap();
    assert!(usage.contains("grid(16/80)"));

    assert!(out.path().join("assets/fonts/Sans-Regular.woff").exists());
    assert!(out.path().join("assets/images/logo.png").exists());
}

#[tokio::test]
async fn fonts_failure_does_not_abort_sibling_builders() {
    let out = tempdir().expect("tempdir");
    let config = test_config(out.path());
    let snapshot = ready_snapshot();

    let mut api = MockParlorApi::new();
    api.expect_fetch_bundle()
        .with(eq(AssetKind::Fonts))
        .returning(|_| Err(SyncError::Network("connection reset".to_string())));

    let kinds = [SyncKind::Colors, SyncKind::Grid, SyncKind::Typo, SyncKind::Fonts];
    let report = run(&api, &snapshot, &kinds, &config)
        .await
        .expect("gate passes");

    assert!(!report.all_succeeded());
    for outcome in &report.outcomes {
        match outcome.kind {
            SyncKind::Fonts => {
                assert!(matches!(outcome.result, Err(SyncError::Network(_))));
            }
            _ => assert!(outcome.result.is_ok(), "{} should succeed", outcome.kind),
        }
    }

    // Sibling artifacts landed on disk despite the fonts failure.
    let styles = out.path().join("styles");
    assert!(styles.join("_parlor-custom-colors.scss").exists());
    assert!(styles.join("_parlor-grid.scss").exists());
    assert!(styles.join("_parlor-embed.scss").exists());
    assert!(styles.join("_parlor-usage.scss").exists());
}

#[tokio::test]
async fn empty_grid_is_a_per_kind_failure_only() {
    let out = tempdir().expect("tempdir");
    let config = test_config(out.path());
    let mut snapshot = ready_snapshot();
    snapshot.grids.clear();

    let api = MockParlorApi::new();
    let kinds = [SyncKind::Colors, SyncKind::Grid];
    let report = run(&api, &snapshot, &kinds, &config)
        .await
        .expect("gate passes");

    assert!(matches!(report.outcomes[1].result, Err(SyncError::EmptyGrid)));
    assert!(report.outcomes[0].result.is_ok());
    assert!(config.colors.path.join(&config.colors.filename).exists());
}

#[tokio::test]
async fn duplicate_requested_kinds_dispatch_one_task_per_distinct_kind() {
    let out = tempdir().expect("tempdir");
    let config = test_config(out.path());
    let snapshot = ready_snapshot();

    let bundle = zip_bundle(&[("Sans-Regular.woff", b"font-bytes" as &[u8])]);
    let mut api = MockParlorApi::new();
    // A duplicated fonts request must still download the bundle exactly once;
    // two concurrent extractions into the same directory would race.
    api.expect_fetch_bundle()
        .with(eq(AssetKind::Fonts))
        .times(1)
        .returning(move |_| Ok(stream_of(bundle.clone())));

    let kinds = [SyncKind::Fonts, SyncKind::Fonts, SyncKind::Colors];
    let report = run(&api, &snapshot, &kinds, &config)
        .await
        .expect("gate passes");

    assert!(report.all_succeeded());
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.outcomes[0].kind, SyncKind::Fonts);
    assert_eq!(report.outcomes[1].kind, SyncKind::Colors);
    assert!(out.path().join("assets/fonts/Sans-Regular.woff").exists());
    assert!(config.colors.path.join(&config.colors.filename).exists());
}

#[tokio::test]
async fn asset_target_ending_in_kind_folder_is_not_nested_again() {
    let out = tempdir().expect("tempdir");
    let bundle = zip_bundle(&[("Sans-Bold.woff", b"bold" as &[u8])]);

    let mut api = MockParlorApi::new();
    api.expect_fetch_bundle()
        .with(eq(AssetKind::Fonts))
        .returning(move |_| Ok(stream_of(bundle.clone())));

    // Caller already appended the canonical subfolder.
    let target = out.path().join("out/fonts");
    sync_assets(&api, AssetKind::Fonts, &target)
        .await
        .expect("sync succeeds");

    assert!(out.path().join("out/fonts/Sans-Bold.woff").exists());
    assert!(
        !out.path().join("out/fonts/fonts").exists(),
        "duplicate fonts/fonts nesting must be prevented"
    );

    // A bare target resolves to the same place.
    let target = out.path().join("out");
    sync_assets(&api, AssetKind::Fonts, &target)
        .await
        .expect("sync succeeds");
    assert!(out.path().join("out/fonts/Sans-Bold.woff").exists());
}

#[tokio::test]
async fn temporary_archive_is_removed_on_success_and_failure() {
    let out = tempdir().expect("tempdir");

    let bundle = zip_bundle(&[("a.png", b"img" as &[u8])]);
    let mut api = MockParlorApi::new();
    api.expect_fetch_bundle()
        .with(eq(AssetKind::Images))
        .times(1)
        .returning(move |_| Ok(stream_of(bundle.clone())));

    sync_assets(&api, AssetKind::Images, out.path())
        .await
        .expect("sync succeeds");
    let images_dir = out.path().join("images");
    let entries: Vec<_> = std::fs::read_dir(&images_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["a.png".to_string()]);

    // A stream that dies mid-download must not leave the archive behind.
    let mut api = MockParlorApi::new();
    api.expect_fetch_bundle().returning(|_| {
        Ok(futures::stream::iter(vec![
            Ok(Bytes::from_static(b"PK")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        ])
        .boxed())
    });

    let result = sync_assets(&api, AssetKind::Images, out.path()).await;
    assert!(matches!(result, Err(SyncError::Network(_))));
    let entries: Vec<_> = std::fs::read_dir(&images_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        entries,
        vec!["a.png".to_string()],
        "failed download must not leave a temporary archive"
    );
}

#[tokio::test]
async fn corrupt_bundle_is_a_filesystem_failure_and_cleans_up() {
    let out = tempdir().expect("tempdir");

    let mut api = MockParlorApi::new();
    api.expect_fetch_bundle()
        .returning(|_| Ok(stream_of(b"this is not a zip archive".to_vec())));

    let result = sync_assets(&api, AssetKind::Fonts, out.path()).await;
    assert!(matches!(result, Err(SyncError::FileSystem(_))));

    let fonts_dir = out.path().join("fonts");
    let leftovers = std::fs::read_dir(&fonts_dir).unwrap().count();
    assert_eq!(leftovers, 0, "extraction failure must not leave the archive");
}
