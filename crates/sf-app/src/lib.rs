//! Signup form application layer
//!
//! This crate contains the use cases that drive the signup flow: the session
//! store, the form controller and the route guard.

pub mod app;
pub mod deps;
pub mod usecases;

pub use app::SignupApp;
pub use deps::SignupDeps;
pub use usecases::{RouteGuard, SessionStore, SignupFormController, SignupOutcome};
