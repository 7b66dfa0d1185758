//! Signup domain module.
//!
//! Input shape, field names, the field error map and the validation schema.

mod errors;
mod field;
mod input;
pub mod schema;

pub use errors::FieldErrors;
pub use field::{ErrorKey, ParseFieldError, SignupField};
pub use input::{SignupInput, ValidatedSignup};
pub use schema::validate;
