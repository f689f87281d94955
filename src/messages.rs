//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::time::Duration;

use crate::geometry::{Point, Size};
use crate::panel::{DrawerEdge, DrawerTarget, LayoutDirection, LockMode, PanelId};
use crate::tracker::PeekHandle;

/// Host-assigned pointer identifier (finger, mouse button, pen)
pub type PointerId = u32;

/// Phase of a raw pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    /// The gesture was taken away by the host; no position is meaningful
    Cancel,
}

/// One raw pointer event in container coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pointer: PointerId,
    pub position: Point,
    /// Monotonic timestamp from the host's clock
    pub time: Duration,
}

impl PointerEvent {
    pub fn new(action: PointerAction, pointer: PointerId, position: Point, time: Duration) -> Self {
        Self {
            action,
            pointer,
            position,
            time,
        }
    }

    pub fn down(pointer: PointerId, x: f32, y: f32, time: Duration) -> Self {
        Self::new(PointerAction::Down, pointer, Point::new(x, y), time)
    }

    pub fn moved(pointer: PointerId, x: f32, y: f32, time: Duration) -> Self {
        Self::new(PointerAction::Move, pointer, Point::new(x, y), time)
    }

    pub fn up(pointer: PointerId, x: f32, y: f32, time: Duration) -> Self {
        Self::new(PointerAction::Up, pointer, Point::new(x, y), time)
    }

    pub fn cancel(time: Duration) -> Self {
        Self::new(PointerAction::Cancel, 0, Point::default(), time)
    }
}

/// Drawer commands from the application
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerMsg {
    /// Animate a drawer fully open
    Open(DrawerTarget),
    /// Animate a drawer closed
    Close(DrawerTarget),
    /// Animate every drawer closed
    CloseAll,
    /// Record a lock mode and apply it
    SetLockMode(LockMode, DrawerTarget),
    /// Back button: close visible drawers if allowed
    Back,
    /// Content asks the router not to steal the current gesture
    RequestDisallowIntercept(bool),
}

/// Measurement and direction updates from the host layout pass
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutMsg {
    /// Container was measured
    Resize(Size),
    /// A panel was measured
    PanelMeasured { panel: PanelId, size: Size },
    /// Layout direction changed
    SetDirection(LayoutDirection),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Pointer(PointerEvent),
    /// Render tick: advance settling animations
    Frame { now: Duration },
    /// A scheduled peek delay elapsed
    PeekElapsed { edge: DrawerEdge, handle: PeekHandle },
    Drawer(DrawerMsg),
    Layout(LayoutMsg),
}

impl Msg {
    /// Short name for tracing
    pub fn name(&self) -> &'static str {
        match self {
            Msg::Pointer(event) => match event.action {
                PointerAction::Down => "Pointer::Down",
                PointerAction::Move => "Pointer::Move",
                PointerAction::Up => "Pointer::Up",
                PointerAction::Cancel => "Pointer::Cancel",
            },
            Msg::Frame { .. } => "Frame",
            Msg::PeekElapsed { .. } => "PeekElapsed",
            Msg::Drawer(msg) => match msg {
                DrawerMsg::Open(_) => "Drawer::Open",
                DrawerMsg::Close(_) => "Drawer::Close",
                DrawerMsg::CloseAll => "Drawer::CloseAll",
                DrawerMsg::SetLockMode(..) => "Drawer::SetLockMode",
                DrawerMsg::Back => "Drawer::Back",
                DrawerMsg::RequestDisallowIntercept(_) => "Drawer::RequestDisallowIntercept",
            },
            Msg::Layout(msg) => match msg {
                LayoutMsg::Resize(_) => "Layout::Resize",
                LayoutMsg::PanelMeasured { .. } => "Layout::PanelMeasured",
                LayoutMsg::SetDirection(_) => "Layout::SetDirection",
            },
        }
    }
}
