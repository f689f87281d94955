//! Drawer configuration
//!
//! Motion thresholds, scrim and shadow appearance, and the bottom reveal
//! margin. Stored as YAML (by default in `~/.config/edgedrawer/config.yaml`).
//! Distances are logical pixels and are multiplied by `scale_factor`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DrawerError, Result};
use crate::panel::LayoutDirection;
use crate::theme::{Color, Theme};

/// Drawer configuration that persists across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawerConfig {
    /// Width of the edge-sensing margin for edge drags and peeks
    #[serde(default = "default_edge_size")]
    pub edge_size: f32,

    /// Distance a pointer travels before a gesture counts as a drag
    #[serde(default = "default_touch_slop")]
    pub touch_slop: f32,

    /// Release speeds below this (px/s) are treated as zero
    #[serde(default = "default_min_fling_velocity")]
    pub min_fling_velocity: f32,

    /// Release speeds are clamped to this (px/s)
    #[serde(default = "default_max_fling_velocity")]
    pub max_fling_velocity: f32,

    /// Delay between an edge touch and the peek
    #[serde(default = "default_peek_delay_ms")]
    pub peek_delay_ms: u64,

    /// Settle duration baseline for zero-velocity slides
    #[serde(default = "default_base_settle_ms")]
    pub base_settle_ms: u64,

    /// Upper bound on any settle animation
    #[serde(default = "default_max_settle_ms")]
    pub max_settle_ms: u64,

    /// Scrim color at full opacity
    #[serde(default = "default_scrim_color")]
    pub scrim_color: Color,

    #[serde(default)]
    pub shadow: ShadowStrategy,

    /// Part of the bottom drawer left on screen when it is closed
    #[serde(default)]
    pub bottom_reveal: f32,

    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,

    #[serde(default)]
    pub direction: LayoutDirection,

    #[serde(default)]
    pub theme: Theme,
}

fn default_edge_size() -> f32 {
    20.0
}

fn default_touch_slop() -> f32 {
    8.0
}

fn default_min_fling_velocity() -> f32 {
    400.0
}

fn default_max_fling_velocity() -> f32 {
    8_000.0
}

fn default_peek_delay_ms() -> u64 {
    160
}

fn default_base_settle_ms() -> u64 {
    256
}

fn default_max_settle_ms() -> u64 {
    600
}

fn default_scrim_color() -> Color {
    Color::rgba(0, 0, 0, 0x99)
}

fn default_scale_factor() -> f64 {
    1.0
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            edge_size: default_edge_size(),
            touch_slop: default_touch_slop(),
            min_fling_velocity: default_min_fling_velocity(),
            max_fling_velocity: default_max_fling_velocity(),
            peek_delay_ms: default_peek_delay_ms(),
            base_settle_ms: default_base_settle_ms(),
            max_settle_ms: default_max_settle_ms(),
            scrim_color: default_scrim_color(),
            shadow: ShadowStrategy::default(),
            bottom_reveal: 0.0,
            scale_factor: default_scale_factor(),
            direction: LayoutDirection::default(),
            theme: Theme::default(),
        }
    }
}

/// How drawers show depth against the content
///
/// Chosen once when the layout is built; the two are never mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShadowStrategy {
    /// Platform depth rendering; no manual edge shadow is computed
    Elevation {
        #[serde(default = "default_elevation")]
        elevation: f32,
    },
    /// Painted gradient strip along the inner edge of left/right drawers
    Drawable(ShadowSides),
}

fn default_elevation() -> f32 {
    10.0
}

impl Default for ShadowStrategy {
    fn default() -> Self {
        ShadowStrategy::Drawable(ShadowSides::default())
    }
}

/// Edge shadows by side; LEFT/RIGHT override START/END
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowSides {
    #[serde(default)]
    pub left: Option<ShadowSpec>,
    #[serde(default)]
    pub right: Option<ShadowSpec>,
    #[serde(default)]
    pub start: Option<ShadowSpec>,
    #[serde(default)]
    pub end: Option<ShadowSpec>,
}

impl Default for ShadowSides {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
            start: Some(ShadowSpec::default()),
            end: Some(ShadowSpec::default()),
        }
    }
}

impl ShadowSides {
    /// Shadow for the left drawer under the given direction
    pub fn resolve_left(&self, direction: LayoutDirection) -> Option<ShadowSpec> {
        self.left.or(match direction {
            LayoutDirection::Ltr => self.start,
            LayoutDirection::Rtl => self.end,
        })
    }

    /// Shadow for the right drawer under the given direction
    pub fn resolve_right(&self, direction: LayoutDirection) -> Option<ShadowSpec> {
        self.right.or(match direction {
            LayoutDirection::Ltr => self.end,
            LayoutDirection::Rtl => self.start,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowSpec {
    #[serde(default = "default_shadow_width")]
    pub width: f32,
    #[serde(default = "default_shadow_color")]
    pub color: Color,
}

fn default_shadow_width() -> f32 {
    8.0
}

fn default_shadow_color() -> Color {
    Color::rgba(0, 0, 0, 0x66)
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            width: default_shadow_width(),
            color: default_shadow_color(),
        }
    }
}

impl DrawerConfig {
    fn scaled(&self, logical: f32) -> f32 {
        logical * self.scale_factor as f32
    }

    pub fn edge_size_px(&self) -> f32 {
        self.scaled(self.edge_size)
    }

    pub fn touch_slop_px(&self) -> f32 {
        self.scaled(self.touch_slop)
    }

    pub fn min_fling_px(&self) -> f32 {
        self.scaled(self.min_fling_velocity)
    }

    pub fn max_fling_px(&self) -> f32 {
        self.scaled(self.max_fling_velocity)
    }

    pub fn bottom_reveal_px(&self) -> f32 {
        self.scaled(self.bottom_reveal)
    }

    pub fn peek_delay(&self) -> Duration {
        Duration::from_millis(self.peek_delay_ms)
    }

    pub fn base_settle(&self) -> Duration {
        Duration::from_millis(self.base_settle_ms)
    }

    pub fn max_settle(&self) -> Duration {
        Duration::from_millis(self.max_settle_ms)
    }

    /// Reject values the motion math cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.scale_factor > 0.0) {
            return Err(DrawerError::Config(format!(
                "scale_factor must be positive, got {}",
                self.scale_factor
            )));
        }
        if self.edge_size < 0.0 || self.touch_slop < 0.0 || self.bottom_reveal < 0.0 {
            return Err(DrawerError::Config(
                "edge_size, touch_slop and bottom_reveal must not be negative".to_string(),
            ));
        }
        if self.min_fling_velocity < 0.0 || self.min_fling_velocity > self.max_fling_velocity {
            return Err(DrawerError::Config(format!(
                "fling velocity range [{}, {}] is empty",
                self.min_fling_velocity, self.max_fling_velocity
            )));
        }
        Ok(())
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: DrawerConfig =
            serde_yaml::from_str(content).map_err(|e| DrawerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from disk, or return defaults if missing or invalid
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            serde_yaml::to_string(self).map_err(|e| DrawerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
