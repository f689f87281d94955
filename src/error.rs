use thiserror::Error;

use crate::panel::{DrawerEdge, PanelId};

/// Result type used throughout the drawer crate
pub type Result<T> = std::result::Result<T, DrawerError>;

/// Configuration errors surfaced by the drawer layout
///
/// These are fatal for the operation that raised them: the layout is left
/// unchanged. No-op conditions (closing a closed drawer, re-applying a lock
/// mode) are never reported as errors.
#[derive(Debug, Error)]
pub enum DrawerError {
    #[error("a drawer is already attached to the {edge} edge")]
    EdgeConflict { edge: DrawerEdge },
    #[error("a content panel is already attached")]
    DuplicateContent,
    #[error("panel {0} is not a drawer")]
    NotADrawer(PanelId),
    #[error("panel {0} is not attached")]
    UnknownPanel(PanelId),
    #[error("no drawer attached to the {0} edge")]
    NoDrawer(DrawerEdge),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid saved state: {0}")]
    State(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
