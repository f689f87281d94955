//! Keyboard input handling
//!
//! The playground binds a handful of keys to drawer messages:
//! - `Esc` - back
//! - `L` / `R` / `B` - toggle the left, right or bottom drawer
//! - `1` / `2` / `3` - cycle the lock mode of the left, right or bottom drawer
//! - `A` - close every drawer
//! - `D` - flip the layout direction

use winit::keyboard::{KeyCode, PhysicalKey};

use edgedrawer::messages::{DrawerMsg, LayoutMsg, Msg};
use edgedrawer::model::DrawerLayout;
use edgedrawer::panel::{DrawerEdge, DrawerTarget};

/// Map a pressed key to a message, or `None` if the key is unbound
pub fn key_to_msg(layout: &DrawerLayout, key: PhysicalKey) -> Option<Msg> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };

    let msg = match code {
        KeyCode::Escape => DrawerMsg::Back,
        KeyCode::KeyL => toggle(layout, DrawerEdge::Left),
        KeyCode::KeyR => toggle(layout, DrawerEdge::Right),
        KeyCode::KeyB => toggle(layout, DrawerEdge::Bottom),
        KeyCode::Digit1 => cycle_lock(layout, DrawerEdge::Left),
        KeyCode::Digit2 => cycle_lock(layout, DrawerEdge::Right),
        KeyCode::Digit3 => cycle_lock(layout, DrawerEdge::Bottom),
        KeyCode::KeyA => DrawerMsg::CloseAll,
        KeyCode::KeyD => {
            return Some(Msg::Layout(LayoutMsg::SetDirection(
                layout.direction().flipped(),
            )))
        }
        _ => return None,
    };
    Some(Msg::Drawer(msg))
}

fn toggle(layout: &DrawerLayout, edge: DrawerEdge) -> DrawerMsg {
    let target = DrawerTarget::from(edge);
    // Visible counts as open so a half-dragged drawer closes on toggle
    if layout.is_visible(target).unwrap_or(false) {
        DrawerMsg::Close(target)
    } else {
        DrawerMsg::Open(target)
    }
}

fn cycle_lock(layout: &DrawerLayout, edge: DrawerEdge) -> DrawerMsg {
    let target = DrawerTarget::from(edge);
    let current = layout.registry().lock_mode(edge.into());
    DrawerMsg::SetLockMode(current.cycle_next(), target)
}
