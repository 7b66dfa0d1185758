//! Session store use case and its persistence.

mod loading_guard;
pub mod persistence;
mod store;

pub use persistence::SessionPersistence;
pub use store::{SessionStore, SignupOutcome, GENERIC_ERROR_MESSAGE};
