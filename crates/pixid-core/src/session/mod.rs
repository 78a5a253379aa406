//! Session state for one interaction front-end.

pub mod model;
pub mod result;
pub mod status;

pub use model::{Phase, Session};
pub use result::{ErrorRecord, GenerationResult, ImagePayload};
pub use status::Status;
