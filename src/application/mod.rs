//! Application layer managing table state.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it owns the size aggregator and the selection controller and feeds them
//! from the render loop and the input handler.

pub mod state;

pub use state::*;
