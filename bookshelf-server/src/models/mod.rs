//! Domain models with validation at construction
//!
//! Request input is validated when building these types.
//! Invalid input returns ValidationError, not panic.

pub mod book;
pub mod validation;

pub use book::{Book, NewBook, MAX_FIELD_LEN};
pub use validation::ValidationError;
