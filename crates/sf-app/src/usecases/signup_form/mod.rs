//! Signup form use case.

mod controller;

pub use controller::{SignupFormController, PASSWORD_MASK_CHAR};
