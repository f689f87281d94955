//! Saved state and configuration tests
//!
//! State round-trips through JSON files, YAML config loading, and config paths.

mod common;

use common::{attach_all, settle, test_layout, unlaid_layout, HEIGHT, WIDTH};
use edgedrawer::config::{DrawerConfig, ShadowStrategy};
use edgedrawer::config_paths;
use edgedrawer::geometry::Size;
use edgedrawer::panel::{DrawerEdge, Gravity, LayoutDirection, LockMode};
use edgedrawer::state::SavedState;

// ========================================================================
// Saved State
// ========================================================================

#[test]
fn test_round_trip_locked_open_left() {
    let (mut layout, _) = test_layout();
    layout
        .set_lock_mode(LockMode::LockedOpen, Gravity::Left)
        .unwrap();
    settle(&mut layout);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");
    layout.save_state().save(&path).unwrap();

    let (mut restored, _) = test_layout();
    let state = SavedState::load(&path).unwrap();
    restored.restore_state(&state).unwrap();
    settle(&mut restored);

    assert!(restored.is_open(Gravity::Left).unwrap());
    assert_eq!(
        restored.lock_mode(Gravity::Left).unwrap(),
        LockMode::LockedOpen
    );
}

#[test]
fn test_restore_before_layout_snaps_open() {
    let state = SavedState {
        open_edge: Some(DrawerEdge::Right),
        lock_end: LockMode::LockedClosed,
        ..SavedState::default()
    };

    let mut layout = unlaid_layout(DrawerConfig::default());
    attach_all(&mut layout);
    layout.restore_state(&state).unwrap();

    // END resolves to the right edge, so the lock closes what was reopened
    assert!(!layout.is_visible(Gravity::Right).unwrap());
    assert_eq!(
        layout.lock_mode(Gravity::End).unwrap(),
        LockMode::LockedClosed
    );

    layout.set_container_size(Size::new(WIDTH, HEIGHT));
    assert!(!layout.model().any_settling());
}

#[test]
fn test_save_captures_logical_slots() {
    let (mut layout, _) = test_layout();
    layout
        .set_lock_mode(LockMode::LockedClosed, Gravity::Start)
        .unwrap();
    layout.open(Gravity::Bottom).unwrap();

    let state = layout.save_state();
    assert_eq!(state.open_edge, Some(DrawerEdge::Bottom));
    assert_eq!(state.lock_start, LockMode::LockedClosed);
    assert_eq!(state.lock_left, LockMode::Undefined);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        SavedState::load(&dir.path().join("missing.json")),
        Err(edgedrawer::DrawerError::Io(_))
    ));
}

// ========================================================================
// Config
// ========================================================================

#[test]
fn test_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let config = DrawerConfig {
        edge_size: 32.0,
        bottom_reveal: 48.0,
        direction: LayoutDirection::Rtl,
        shadow: ShadowStrategy::Elevation { elevation: 6.0 },
        ..DrawerConfig::default()
    };
    config.save(&path).unwrap();

    let loaded = DrawerConfig::load(&path);
    assert_eq!(loaded.edge_size, 32.0);
    assert_eq!(loaded.bottom_reveal, 48.0);
    assert_eq!(loaded.direction, LayoutDirection::Rtl);
    assert_eq!(loaded.shadow, ShadowStrategy::Elevation { elevation: 6.0 });
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "edge_size: [not, a, number]\n").unwrap();

    let loaded = DrawerConfig::load(&path);
    assert_eq!(loaded.edge_size, DrawerConfig::default().edge_size);
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = DrawerConfig::load(&dir.path().join("nope.yaml"));
    assert_eq!(loaded.touch_slop, 8.0);
}

#[test]
fn test_bottom_reveal_keeps_drawer_partly_on_screen() {
    let config = DrawerConfig {
        bottom_reveal: 40.0,
        ..DrawerConfig::default()
    };
    let (layout, panels) = common::test_layout_with(config);
    let rect = layout.panel_rect(panels.bottom).unwrap();
    assert_eq!(rect.y, HEIGHT - 40.0);
}

// ========================================================================
// Config Paths
// ========================================================================

#[test]
fn test_config_paths_share_app_dir() {
    let Some(dir) = config_paths::config_dir() else {
        return;
    };
    assert!(dir.ends_with("edgedrawer"));
    assert_eq!(config_paths::config_file(), Some(dir.join("config.yaml")));
    assert_eq!(config_paths::state_file(), Some(dir.join("state.json")));
    assert_eq!(config_paths::logs_dir(), Some(dir.join("logs")));
}
