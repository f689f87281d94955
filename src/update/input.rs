//! Pointer, frame and timer message handlers

use std::time::Duration;

use crate::commands::Cmd;
use crate::messages::PointerEvent;
use crate::model::DrawerLayout;
use crate::panel::DrawerEdge;
use crate::tracker::PeekHandle;

/// Route one raw pointer event through the gesture router
pub fn update_pointer(layout: &mut DrawerLayout, event: PointerEvent) -> Cmd {
    layout.handle_pointer(event)
}

/// Render tick
pub fn update_frame(layout: &mut DrawerLayout, now: Duration) -> Cmd {
    layout.frame(now)
}

/// Deferred peek callback; stale handles are ignored
pub fn update_peek(layout: &mut DrawerLayout, edge: DrawerEdge, handle: PeekHandle) -> Cmd {
    layout.peek_elapsed(edge, handle)
}
