//! Business logic use cases
//!
//! SignupFormController (UI-facing buffer and flags)
//!         ↓ submit
//! SessionStore::sign_up → validate → SignupApiPort → persist
//!         ↓
//! RouteGuard (reads the store before entering the success view)

pub mod route_guard;
pub mod session;
pub mod signup_form;

pub use route_guard::RouteGuard;
pub use session::{SessionStore, SignupOutcome};
pub use signup_form::SignupFormController;
