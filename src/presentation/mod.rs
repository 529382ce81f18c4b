//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the table using ratatui and provides the key
//! sources that feed it.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
