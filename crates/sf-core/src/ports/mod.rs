//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `sf-app` and the
//! infrastructure adapters in `sf-infra`. Use cases only ever see these
//! traits, so storage medium, clock and timers are swappable in tests.

mod clock;
pub mod signup_api;
pub mod storage;
pub mod timer;

pub use clock::*;
pub use signup_api::SignupApiPort;
pub use storage::{KeyValueStoragePort, StorageError};
pub use timer::{DeferredTask, TimerPort};
