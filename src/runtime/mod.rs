//! Runtime module - winit/platform integration
//!
//! This module contains the platform code for running the drawer playground:
//! - `app` - ApplicationHandler, window management and timers
//! - `input` - Keyboard event to message mapping

pub mod app;
pub mod input;

pub use app::App;
