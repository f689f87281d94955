//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging gesture
//! routing, settle animations and drawer state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=drawer=debug,message=debug` - scoped filtering
//! - `RUST_LOG=edgedrawer::gesture=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/edgedrawer/logs/edgedrawer.log` with daily
//! rotation. File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::DrawerModel;
use crate::panel::{DrawerEdge, OpenState};
use crate::tracker::DragPhase;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// the config directory's `logs/` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "edgedrawer.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of drawer state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerSnapshot {
    pub edges: [Option<EdgeInfo>; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeInfo {
    pub openness: f32,
    pub open_state: OpenState,
    pub phase: DragPhase,
    pub peeking: bool,
}

impl DrawerSnapshot {
    pub fn from_model(model: &DrawerModel) -> Self {
        let edges = DrawerEdge::ALL.map(|edge| {
            model.registry().drawer(edge).map(|panel| EdgeInfo {
                openness: panel.openness,
                open_state: panel.open_state,
                phase: model.tracker(edge).phase(),
                peeking: panel.is_peeking,
            })
        });
        Self { edges }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &DrawerSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        for edge in DrawerEdge::ALL {
            let (before, after) = (self.edges[edge.index()], other.edges[edge.index()]);
            match (before, after) {
                (None, None) => {}
                (None, Some(_)) => changes.push(format!("{}: attached", edge)),
                (Some(_), None) => changes.push(format!("{}: detached", edge)),
                (Some(before), Some(after)) => {
                    if before.phase != after.phase {
                        changes.push(format!("{}: {:?} → {:?}", edge, before.phase, after.phase));
                    }
                    if before.open_state != after.open_state {
                        changes.push(format!(
                            "{}: {:?} → {:?}",
                            edge, before.open_state, after.open_state
                        ));
                    }
                    if before.openness != after.openness {
                        changes.push(format!(
                            "{}: {:.3} → {:.3}",
                            edge, before.openness, after.openness
                        ));
                    }
                    if before.peeking != after.peeking {
                        let status = if after.peeking { "peeking" } else { "peek ended" };
                        changes.push(format!("{}: {}", edge, status));
                    }
                }
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
