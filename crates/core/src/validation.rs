//! Field-level validation rules for user and role drafts.
//!
//! These are advisory checks run by the admin console before a submission.
//! The service only enforces presence of a name.

use std::collections::BTreeMap;

use validator::ValidateEmail;

/// Minimum password length accepted by the console.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Field name -> human-readable message, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` when no field failed, otherwise the errors themselves.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Require a non-blank name.
pub fn check_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    Ok(())
}

/// Require a `local@domain` email address.
pub fn check_email(email: &str) -> Result<(), String> {
    let email = email.trim().to_string();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if !email.validate_email() {
        return Err("Email must look like name@domain".to_string());
    }
    Ok(())
}

/// Check a password against [`MIN_PASSWORD_LENGTH`].
///
/// When `required` is false an empty password passes (meaning "unchanged"),
/// but a non-empty one must still meet the minimum length.
pub fn check_password(password: &str, required: bool) -> Result<(), String> {
    if password.is_empty() && !required {
        return Ok(());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}
