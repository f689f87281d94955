//! Command-line argument parsing for the demo host
//!
//! Supports:
//! - An explicit config file
//! - Right-to-left layout
//! - Bottom drawer reveal margin override
//! - Skipping saved state restore

use clap::Parser;
use std::path::PathBuf;

use crate::config::DrawerConfig;
use crate::panel::LayoutDirection;

/// Interactive drawer playground
#[derive(Parser, Debug)]
#[command(name = "edgedrawer", version, about = "Three-edge drawer playground")]
pub struct CliArgs {
    /// Config file to use instead of the default location
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Lay out right-to-left (START drawer on the right)
    #[arg(long)]
    pub rtl: bool,

    /// Pixels of the bottom drawer that stay visible when closed
    #[arg(long, value_name = "PX")]
    pub bottom_reveal: Option<f32>,

    /// Start with all drawers closed (ignore saved state)
    #[arg(short = 'n', long)]
    pub no_restore: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub config: DrawerConfig,
    /// Restore the previous session's open drawer and locks
    pub restore: bool,
}

impl CliArgs {
    /// Load the config file and apply command-line overrides
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let path = self.config.or_else(crate::config_paths::config_file);
        let mut config = match &path {
            Some(path) => DrawerConfig::load(path),
            None => DrawerConfig::default(),
        };

        if self.rtl {
            config.direction = LayoutDirection::Rtl;
        }
        if let Some(reveal) = self.bottom_reveal {
            if reveal < 0.0 {
                return Err(format!("--bottom-reveal must not be negative, got {}", reveal));
            }
            config.bottom_reveal = reveal;
        }

        Ok(StartupConfig {
            config,
            restore: !self.no_restore,
        })
    }
}
