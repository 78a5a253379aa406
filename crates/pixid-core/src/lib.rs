pub mod config;
pub mod error;
pub mod image;
pub mod persona;
pub mod secret;
pub mod session;
pub mod wallet;

// Re-export common error types
pub use error::{ErrorKind, FlowError, PixidError};
