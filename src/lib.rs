//! gridsel - Terminal Table Library
//!
//! A terminal table component with keyboard-driven cell selection and
//! automatic column/row sizing from measured cell content.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
