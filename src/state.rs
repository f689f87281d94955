//! Saved drawer state
//!
//! Which edge is open plus the lock-mode slots, as JSON. Restoring replays
//! `open` and `set_lock_mode` so the usual rules (mutual exclusion, lock
//! application) hold for the restored layout too.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::DrawerModel;
use crate::panel::{DrawerEdge, DrawerTarget, Gravity, LockMode, OpenState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(default)]
    pub open_edge: Option<DrawerEdge>,
    #[serde(default)]
    pub lock_left: LockMode,
    #[serde(default)]
    pub lock_right: LockMode,
    #[serde(default)]
    pub lock_start: LockMode,
    #[serde(default)]
    pub lock_end: LockMode,
    #[serde(default)]
    pub lock_bottom: LockMode,
}

impl SavedState {
    /// Snapshot the model
    ///
    /// The open edge is the first drawer that is open or opening.
    pub fn capture(model: &DrawerModel) -> Self {
        let registry = model.registry();
        let open_edge = registry
            .drawers()
            .find(|panel| matches!(panel.open_state, OpenState::Opened | OpenState::Opening))
            .and_then(|panel| panel.edge);
        let locks = registry.lock_modes();
        Self {
            open_edge,
            lock_left: locks.left,
            lock_right: locks.right,
            lock_start: locks.start,
            lock_end: locks.end,
            lock_bottom: locks.bottom,
        }
    }

    /// Replay into `model`
    ///
    /// A saved open edge with no drawer attached any more is skipped.
    pub fn restore(&self, model: &mut DrawerModel) -> Result<()> {
        if let Some(edge) = self.open_edge {
            if model.registry().find_panel(edge).is_some() {
                model.open(DrawerTarget::from(edge))?;
            } else {
                tracing::warn!(%edge, "saved open drawer is no longer attached");
            }
        }
        let slots = [
            (Gravity::Left, self.lock_left),
            (Gravity::Right, self.lock_right),
            (Gravity::Start, self.lock_start),
            (Gravity::End, self.lock_end),
            (Gravity::Bottom, self.lock_bottom),
        ];
        for (gravity, mode) in slots {
            if mode != LockMode::Undefined {
                model.set_lock_mode(mode, gravity.into())?;
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Write to disk, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        tracing::debug!("Saved drawer state to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
