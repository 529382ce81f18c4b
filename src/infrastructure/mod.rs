//! Infrastructure layer providing external service integrations.
//!
//! Loading grid definitions and table styles from disk.

pub mod persistence;
pub mod config;

pub use persistence::*;
pub use config::*;
