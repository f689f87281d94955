//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod drawer;
mod input;
mod layout;

use crate::commands::Cmd;
use crate::error::Result;
use crate::messages::Msg;
use crate::model::DrawerLayout;

#[cfg(debug_assertions)]
use crate::tracing::DrawerSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use drawer::update_drawer;
pub use input::{update_frame, update_peek, update_pointer};
pub use layout::update_layout;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(layout: &mut DrawerLayout, msg: Msg) -> Result<Option<Cmd>> {
    #[cfg(debug_assertions)]
    {
        update_traced(layout, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(layout, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(layout: &mut DrawerLayout, msg: Msg) -> Result<Option<Cmd>> {
    let cmd = match msg {
        Msg::Pointer(event) => update_pointer(layout, event),
        Msg::Frame { now } => update_frame(layout, now),
        Msg::PeekElapsed { edge, handle } => update_peek(layout, edge, handle),
        Msg::Drawer(m) => update_drawer(layout, m)?,
        Msg::Layout(m) => update_layout(layout, m)?,
    };
    Ok(cmd.into_option())
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after drawer state and logs diffs for debugging.
/// Frames and pointer moves are too frequent to log individually.
#[cfg(debug_assertions)]
fn update_traced(layout: &mut DrawerLayout, msg: Msg) -> Result<Option<Cmd>> {
    use crate::messages::PointerAction;

    let is_noisy = matches!(
        &msg,
        Msg::Frame { .. }
            | Msg::Pointer(crate::messages::PointerEvent {
                action: PointerAction::Move,
                ..
            })
    );

    let msg_name = msg.name();
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = DrawerSnapshot::from_model(layout.model());

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(layout, msg);

    let after = DrawerSnapshot::from_model(layout.model());
    if let Some(diff) = before.diff(&after) {
        if is_noisy {
            tracing::trace!(target: "drawer", %diff, "state changed");
        } else {
            debug!(target: "drawer", %diff, "state changed");
        }
    }

    if let Err(ref e) = result {
        tracing::warn!(msg = %msg_name, error = %e, "update rejected");
    }

    result
}
