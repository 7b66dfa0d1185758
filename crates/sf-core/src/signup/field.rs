use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Fields of the signup form.
///
/// The wire names match the keys used by the form payload, so error maps
/// can be rendered next to the inputs without hand-typed strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignupField {
    Email,
    Password,
    AcceptUpdates,
}

impl SignupField {
    pub const ALL: [SignupField; 3] = [
        SignupField::Email,
        SignupField::Password,
        SignupField::AcceptUpdates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignupField::Email => "email",
            SignupField::Password => "password",
            SignupField::AcceptUpdates => "acceptUpdates",
        }
    }
}

impl fmt::Display for SignupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown signup field: {0}")]
pub struct ParseFieldError(pub String);

impl FromStr for SignupField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignupField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

/// Key of the field error map.
///
/// `General` is reserved for failures that are not tied to a single field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub enum ErrorKey {
    Field(SignupField),
    General,
}

impl ErrorKey {
    pub const GENERAL: &'static str = "general";

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKey::Field(field) => field.as_str(),
            ErrorKey::General => Self::GENERAL,
        }
    }
}

impl From<SignupField> for ErrorKey {
    fn from(field: SignupField) -> Self {
        ErrorKey::Field(field)
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorKey {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::GENERAL {
            return Ok(ErrorKey::General);
        }
        s.parse::<SignupField>().map(ErrorKey::Field)
    }
}
