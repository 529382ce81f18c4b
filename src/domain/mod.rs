pub mod models;
pub mod services;
pub mod errors;
pub mod style;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use style::*;
