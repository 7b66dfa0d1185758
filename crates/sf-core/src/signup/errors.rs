use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::ErrorKey;

/// Map from error key to its ordered messages.
///
/// Invariant: every key present holds at least one message. A field that is
/// absent from the map is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ErrorKey, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single entry under the reserved `general` key.
    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(ErrorKey::General, message);
        errors
    }

    pub fn push(&mut self, key: impl Into<ErrorKey>, message: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(message.into());
    }

    /// Replaces the messages for `key`. An empty list removes the key.
    pub fn insert(&mut self, key: impl Into<ErrorKey>, messages: Vec<String>) {
        let key = key.into();
        if messages.is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, messages);
        }
    }

    pub fn remove(&mut self, key: impl Into<ErrorKey>) -> Option<Vec<String>> {
        self.0.remove(&key.into())
    }

    pub fn get(&self, key: impl Into<ErrorKey>) -> &[String] {
        self.0.get(&key.into()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, key: impl Into<ErrorKey>) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    pub fn contains(&self, key: impl Into<ErrorKey>) -> bool {
        self.0.contains_key(&key.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = ErrorKey> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKey, &[String])> {
        self.0.iter().map(|(key, messages)| (*key, messages.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(ErrorKey, Vec<String>)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (ErrorKey, Vec<String>)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (key, messages) in iter {
            errors.insert(key, messages);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::SignupField;

    #[test]
    fn missing_field_reads_as_empty() {
        let errors = FieldErrors::new();

        assert!(errors.get(SignupField::Email).is_empty());
        assert_eq!(errors.first(SignupField::Email), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn push_keeps_insertion_order_within_a_field() {
        let mut errors = FieldErrors::new();
        errors.push(SignupField::Password, "first");
        errors.push(SignupField::Password, "second");

        assert_eq!(errors.get(SignupField::Password), ["first", "second"]);
        assert_eq!(errors.first(SignupField::Password), Some("first"));
    }

    #[test]
    fn inserting_empty_list_removes_key() {
        let mut errors = FieldErrors::new();
        errors.push(SignupField::Email, "bad");
        errors.insert(SignupField::Email, Vec::new());

        assert!(!errors.contains(SignupField::Email));
        assert!(errors.is_empty());
    }

    #[test]
    fn serializes_as_object_keyed_by_wire_name() {
        let mut errors = FieldErrors::general("boom");
        errors.push(SignupField::AcceptUpdates, "nope");

        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(json["general"][0], "boom");
        assert_eq!(json["acceptUpdates"][0], "nope");
    }
}
