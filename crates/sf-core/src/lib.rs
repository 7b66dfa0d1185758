//! # sf-core
//!
//! Core domain models and business rules for the signup form.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod config;
pub mod ports;
pub mod routing;
pub mod session;
pub mod signup;

// Re-export commonly used types at the crate root
pub use config::SignupConfig;
pub use routing::{GuardDecision, Route};
pub use session::{SessionSnapshot, SessionState, SessionToken, SessionUser, TokenClaims};
pub use signup::{ErrorKey, FieldErrors, SignupField, SignupInput, ValidatedSignup};
