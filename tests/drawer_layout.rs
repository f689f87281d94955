//! Drawer layout behavior tests
//!
//! Programmatic open/close, lock modes, mutual exclusion and notifications.

mod common;

use common::{listen, ms, openness, settle, test_layout, unlaid_layout, WIDTH};
use edgedrawer::config::DrawerConfig;
use edgedrawer::geometry::{Point, Size};
use edgedrawer::messages::PointerEvent;
use edgedrawer::motion::DrawerEvent;
use edgedrawer::panel::{DrawerEdge, Gravity, LayoutDirection, LockMode};
use edgedrawer::tracker::DragPhase;
use edgedrawer::{Cmd, DrawerError};

// ========================================================================
// Open / Close
// ========================================================================

#[test]
fn test_open_animates_then_reports_open() {
    let (mut layout, _) = test_layout();
    let log = listen(&mut layout);

    let cmd = layout.open(Gravity::Left).unwrap();
    assert!(cmd.needs_frame());
    assert!(!layout.is_open(Gravity::Left).unwrap());
    assert_eq!(layout.state(), DragPhase::Settling);

    settle(&mut layout);
    assert!(layout.is_open(Gravity::Left).unwrap());
    assert!(layout.is_visible(Gravity::Left).unwrap());
    assert_eq!(log.opened(DrawerEdge::Left), 1);
    assert_eq!(log.states(), vec![DragPhase::Settling, DragPhase::Idle]);
    assert!(!layout.is_content_interactive());
}

#[test]
fn test_slides_are_monotonic_and_end_at_one() {
    let (mut layout, _) = test_layout();
    let log = listen(&mut layout);
    layout.open(Gravity::Right).unwrap();
    settle(&mut layout);

    let slides = log.slides(DrawerEdge::Right);
    assert!(!slides.is_empty());
    assert!(slides.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(slides.last(), Some(&1.0));
}

#[test]
fn test_opened_follows_last_slide() {
    let (mut layout, _) = test_layout();
    let log = listen(&mut layout);
    layout.open(Gravity::Bottom).unwrap();
    settle(&mut layout);

    let events = log.events();
    let opened = events
        .iter()
        .position(|e| matches!(e, DrawerEvent::Opened { .. }))
        .unwrap();
    assert!(matches!(
        events[opened - 1],
        DrawerEvent::Slide { openness, .. } if openness == 1.0
    ));
}

#[test]
fn test_close_is_idempotent() {
    let (mut layout, _) = test_layout();
    layout.open(Gravity::Left).unwrap();
    settle(&mut layout);
    let log = listen(&mut layout);

    layout.close(Gravity::Left).unwrap();
    layout.close(Gravity::Left).unwrap();
    settle(&mut layout);
    layout.close(Gravity::Left).unwrap();
    settle(&mut layout);

    assert_eq!(log.closed(DrawerEdge::Left), 1);
    assert_eq!(openness(&layout, DrawerEdge::Left), 0.0);
    assert!(layout.is_content_interactive());
}

#[test]
fn test_close_already_closed_is_silent() {
    let (mut layout, _) = test_layout();
    let log = listen(&mut layout);
    let cmd = layout.close(Gravity::Right).unwrap();
    assert_eq!(cmd, Cmd::None);
    assert!(log.events().is_empty());
}

#[test]
fn test_open_closes_other_drawer() {
    let (mut layout, _) = test_layout();
    layout.open(Gravity::Right).unwrap();
    settle(&mut layout);
    let log = listen(&mut layout);

    layout.open(Gravity::Left).unwrap();
    settle(&mut layout);

    assert_eq!(openness(&layout, DrawerEdge::Right), 0.0);
    assert_eq!(openness(&layout, DrawerEdge::Left), 1.0);
    assert_eq!(log.closed(DrawerEdge::Right), 1);
    assert_eq!(log.opened(DrawerEdge::Left), 1);
}

#[test]
fn test_close_all_includes_locked_open() {
    let (mut layout, _) = test_layout();
    layout
        .set_lock_mode(LockMode::LockedOpen, Gravity::Bottom)
        .unwrap();
    settle(&mut layout);
    assert!(layout.is_open(Gravity::Bottom).unwrap());

    layout.close_all();
    settle(&mut layout);
    assert!(!layout.is_visible(Gravity::Bottom).unwrap());
}

#[test]
fn test_target_by_panel_id() {
    let (mut layout, panels) = test_layout();
    layout.open(panels.right).unwrap();
    settle(&mut layout);
    assert!(layout.is_open(DrawerEdge::Right).unwrap());

    assert!(matches!(
        layout.open(panels.content),
        Err(DrawerError::NotADrawer(_))
    ));
}

#[test]
fn test_open_before_layout_snaps_without_notifications() {
    let mut layout = unlaid_layout(DrawerConfig::default());
    let log = listen(&mut layout);
    layout
        .attach_drawer(Gravity::Left, Size::new(200.0, 600.0))
        .unwrap();

    let cmd = layout.open(Gravity::Left).unwrap();
    assert!(!cmd.needs_frame());
    assert_eq!(openness(&layout, DrawerEdge::Left), 1.0);
    assert!(layout.is_open(Gravity::Left).unwrap());

    layout.set_container_size(Size::new(800.0, 600.0));
    assert!(log.events().is_empty());
}

// ========================================================================
// Lock Modes
// ========================================================================

#[test]
fn test_locked_open_opens_and_rejects_drag() {
    let (mut layout, _) = test_layout();
    layout
        .set_lock_mode(LockMode::LockedOpen, Gravity::Left)
        .unwrap();
    settle(&mut layout);
    assert!(layout.is_open(Gravity::Left).unwrap());

    let now = layout.model().now();
    layout.handle_pointer(PointerEvent::down(0, 150.0, 300.0, now));
    layout.handle_pointer(PointerEvent::moved(0, 120.0, 300.0, now + ms(10)));
    layout.handle_pointer(PointerEvent::moved(0, 40.0, 300.0, now + ms(20)));
    assert!(!layout.model().any_dragging());
    layout.handle_pointer(PointerEvent::up(0, 40.0, 300.0, now + ms(30)));
    settle(&mut layout);
    assert_eq!(openness(&layout, DrawerEdge::Left), 1.0);
}

#[test]
fn test_locked_closed_closes_open_drawer() {
    let (mut layout, _) = test_layout();
    layout.open(Gravity::Right).unwrap();
    settle(&mut layout);

    layout
        .set_lock_mode(LockMode::LockedClosed, Gravity::Right)
        .unwrap();
    settle(&mut layout);
    assert!(!layout.is_visible(Gravity::Right).unwrap());
}

#[test]
fn test_lock_mid_drag_cancels_drag() {
    let (mut layout, _) = test_layout();
    layout.handle_pointer(PointerEvent::down(0, 5.0, 300.0, ms(0)));
    layout.handle_pointer(PointerEvent::moved(0, 20.0, 300.0, ms(10)));
    layout.handle_pointer(PointerEvent::moved(0, 100.0, 300.0, ms(20)));
    assert!(layout.model().any_dragging());

    layout
        .set_lock_mode(LockMode::LockedClosed, Gravity::Left)
        .unwrap();
    assert!(!layout.model().any_dragging());
    settle(&mut layout);
    assert_eq!(openness(&layout, DrawerEdge::Left), 0.0);
}

#[test]
fn test_same_lock_mode_is_noop() {
    let (mut layout, _) = test_layout();
    layout
        .set_lock_mode(LockMode::LockedClosed, Gravity::Left)
        .unwrap();
    let cmd = layout
        .set_lock_mode(LockMode::LockedClosed, Gravity::Left)
        .unwrap();
    assert_eq!(cmd, Cmd::None);
}

#[test]
fn test_start_lock_follows_direction() {
    let (mut layout, _) = test_layout();
    layout
        .set_lock_mode(LockMode::LockedClosed, Gravity::Start)
        .unwrap();
    assert_eq!(layout.lock_mode(Gravity::Left).unwrap(), LockMode::LockedClosed);
    assert_eq!(layout.lock_mode(Gravity::Right).unwrap(), LockMode::Unlocked);

    layout.set_direction(LayoutDirection::Rtl).unwrap();
    assert_eq!(layout.lock_mode(Gravity::Left).unwrap(), LockMode::Unlocked);
    assert_eq!(layout.lock_mode(Gravity::Right).unwrap(), LockMode::LockedClosed);
}

#[test]
fn test_explicit_side_lock_beats_logical_lock() {
    let (mut layout, _) = test_layout();
    layout
        .set_lock_mode(LockMode::LockedClosed, Gravity::Start)
        .unwrap();
    layout
        .set_lock_mode(LockMode::Unlocked, Gravity::Left)
        .unwrap();
    assert_eq!(layout.lock_mode(Gravity::Left).unwrap(), LockMode::Unlocked);
}

#[test]
fn test_locked_open_survives_mutual_exclusion() {
    let (mut layout, _) = test_layout();
    layout
        .set_lock_mode(LockMode::LockedOpen, Gravity::Right)
        .unwrap();
    settle(&mut layout);
    layout.open(Gravity::Left).unwrap();
    settle(&mut layout);
    assert!(layout.is_open(Gravity::Right).unwrap());
    assert!(layout.is_open(Gravity::Left).unwrap());
}

// ========================================================================
// Back Button
// ========================================================================

#[test]
fn test_back_bubbles_when_nothing_visible() {
    let (mut layout, _) = test_layout();
    assert_eq!(layout.handle_back(), None);
}

#[test]
fn test_back_closes_visible_drawer() {
    let (mut layout, _) = test_layout();
    layout.open(Gravity::Left).unwrap();
    settle(&mut layout);
    assert!(layout.handle_back().is_some());
    settle(&mut layout);
    assert!(!layout.is_visible(Gravity::Left).unwrap());
}

#[test]
fn test_back_consumed_by_locked_drawer() {
    let (mut layout, _) = test_layout();
    layout
        .set_lock_mode(LockMode::LockedOpen, Gravity::Left)
        .unwrap();
    settle(&mut layout);
    assert!(layout.handle_back().is_some());
    settle(&mut layout);
    assert!(layout.is_open(Gravity::Left).unwrap());
}

// ========================================================================
// Panels and Direction
// ========================================================================

#[test]
fn test_second_drawer_on_edge_rejected() {
    let (mut layout, _) = test_layout();
    assert!(matches!(
        layout.attach_drawer(Gravity::Start, Size::new(100.0, 600.0)),
        Err(DrawerError::EdgeConflict {
            edge: DrawerEdge::Left
        })
    ));
}

#[test]
fn test_second_content_rejected() {
    let (mut layout, _) = test_layout();
    assert!(matches!(
        layout.attach_content(Size::new(800.0, 600.0)),
        Err(DrawerError::DuplicateContent)
    ));
}

#[test]
fn test_detach_frees_edge_and_stops_motion() {
    let (mut layout, panels) = test_layout();
    layout.open(Gravity::Left).unwrap();
    layout.detach(panels.left).unwrap();
    assert!(!layout.model().any_settling());
    assert!(layout
        .attach_drawer(Gravity::Left, Size::new(150.0, 600.0))
        .is_ok());
}

#[test]
fn test_panel_rect_tracks_openness() {
    let (mut layout, panels) = test_layout();
    let closed = layout.panel_rect(panels.right).unwrap();
    assert_eq!(closed.x, WIDTH);

    layout.open(Gravity::Right).unwrap();
    settle(&mut layout);
    let open = layout.panel_rect(panels.right).unwrap();
    assert_eq!(open.x, WIDTH - 200.0);
    assert_eq!(layout.panel_at(Point::new(700.0, 300.0)), Some(panels.right));
}

#[test]
fn test_direction_flip_moves_start_drawer() {
    let mut layout = unlaid_layout(DrawerConfig::default());
    let nav = layout
        .attach_drawer(Gravity::Start, Size::new(200.0, 600.0))
        .unwrap();
    layout.set_container_size(Size::new(800.0, 600.0));

    layout.set_direction(LayoutDirection::Rtl).unwrap();
    assert_eq!(layout.direction(), LayoutDirection::Rtl);
    assert_eq!(layout.registry().find_panel(DrawerEdge::Right), Some(nav));
    assert_eq!(layout.registry().find_panel(DrawerEdge::Left), None);
}

// ========================================================================
// Listeners
// ========================================================================

#[test]
fn test_removed_listener_gets_nothing() {
    let (mut layout, _) = test_layout();
    let log = common::EventLog::default();
    let id = layout.add_listener(log.clone());
    assert!(layout.remove_listener(id));
    assert!(!layout.remove_listener(id));

    layout.open(Gravity::Left).unwrap();
    settle(&mut layout);
    assert!(log.events().is_empty());
}
