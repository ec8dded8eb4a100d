//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides:
//! - The customer data form
//! - The prediction result view

mod app;
mod styles;
mod ui;

pub use app::{App, SessionPhase};
pub use styles::ChurnTheme;
