//! Persona catalog.
//!
//! A persona is the named identity revealed to the user after a successful
//! interaction. The catalog is fixed at compile time.

pub mod catalog;
pub mod model;

pub use catalog::{CRYPTO_PERSONAS, PersonaCatalog};
pub use model::Persona;
