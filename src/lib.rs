//! edgedrawer - slide-in drawers on the left, right and bottom edges
//!
//! This crate provides the layout model, gesture routing, drag/settle motion
//! and render state for a container with up to three edge drawers, driven
//! through the Elm Architecture pattern (`Msg` in, `Cmd` out).

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod messages;
pub mod model;
pub mod motion;
pub mod panel;
pub mod render;
pub mod state;
pub mod theme;
pub mod tracing;
pub mod tracker;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::DrawerConfig;
pub use error::{DrawerError, Result};
pub use messages::{DrawerMsg, LayoutMsg, Msg, PointerEvent};
pub use model::DrawerLayout;
pub use motion::{DrawerEvent, DrawerListener, ListenerId};
pub use panel::{DrawerEdge, DrawerTarget, Gravity, LayoutDirection, LockMode, PanelId};
pub use render::RenderState;
pub use theme::Theme;
pub use tracker::DragPhase;
