//! Signup validation schema.
//!
//! Every rule runs independently and all violations are collected, so a
//! single pass reports everything the user needs to fix.

use validator::ValidateEmail;

use super::errors::FieldErrors;
use super::field::SignupField;
use super::input::{SignupInput, ValidatedSignup};

pub const PASSWORD_MIN_LEN: usize = 8;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
pub const PASSWORD_MISSING_UPPERCASE: &str =
    "Password must contain at least one uppercase letter";
pub const PASSWORD_MISSING_LOWERCASE: &str =
    "Password must contain at least one lowercase letter";
pub const PASSWORD_MISSING_DIGIT: &str = "Password must contain at least one number";

/// Validate signup input.
///
/// Returns the normalized input (trimmed email) or the error map with one
/// entry per invalid field. Messages within a field follow rule order.
pub fn validate(input: &SignupInput) -> Result<ValidatedSignup, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = input.email.trim();
    for message in email_violations(email) {
        errors.push(SignupField::Email, message);
    }
    for message in password_violations(&input.password) {
        errors.push(SignupField::Password, message);
    }

    if errors.is_empty() {
        Ok(ValidatedSignup::new(
            email.to_string(),
            input.password.clone(),
            input.accept_updates,
        ))
    } else {
        Err(errors)
    }
}

fn email_violations(email: &str) -> Vec<&'static str> {
    if email.is_empty() {
        return vec![EMAIL_REQUIRED];
    }
    if !email.validate_email() || !has_public_domain(email) {
        return vec![EMAIL_INVALID];
    }
    Vec::new()
}

/// The domain must be dotted and end in an alphabetic TLD of two or more
/// letters, so `user@localhost` and `a@b.c` are rejected.
fn has_public_domain(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let labels: Vec<&str> = domain.split('.').collect();
    let [.., tld] = labels.as_slice() else {
        return false;
    };
    labels.len() >= 2
        && labels.iter().all(|label| !label.is_empty())
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn password_violations(password: &str) -> Vec<&'static str> {
    if password.is_empty() {
        return vec![PASSWORD_REQUIRED];
    }

    let checks: [(bool, &'static str); 4] = [
        (
            password.chars().count() >= PASSWORD_MIN_LEN,
            PASSWORD_TOO_SHORT,
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            PASSWORD_MISSING_UPPERCASE,
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            PASSWORD_MISSING_LOWERCASE,
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            PASSWORD_MISSING_DIGIT,
        ),
    ];

    checks
        .into_iter()
        .filter(|(passed, _)| !passed)
        .map(|(_, message)| message)
        .collect()
}
