//! Panel system - drawers anchored to the left, right and bottom edges
//!
//! ## Architecture
//!
//! - `DrawerEdge`: Left, Right, or Bottom anchor
//! - `Gravity`: requested anchor, including direction-relative START/END
//! - `LockMode`: per-edge policy for user-driven open/close
//! - `EdgeGeometry`: openness <-> position math for one edge
//! - `DrawerRegistry`: panel records, edge assignment and lock slots
//!
//! ## Integration
//!
//! The registry is owned by `DrawerModel` and is read by:
//! - Edge trackers in `tracker/` (drag and settle)
//! - Gesture routing in `gesture.rs`
//! - Notifications in `motion.rs` and visuals in `render.rs`

mod edge;
mod registry;

pub use edge::{Axis, DrawerEdge, EdgeGeometry, Gravity, LayoutDirection, LockMode};
pub use registry::{DrawerRegistry, DrawerTarget, LockModes, OpenState, Panel, PanelId};
