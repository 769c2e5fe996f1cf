//! Error taxonomy for auth flows and client-side form validation.
//!
//! ERROR HANDLING
//! ==============
//! Auth errors render as a single message near the submit control, so each
//! variant's `Display` is the user-facing text. Validation errors are field
//! scoped and never reach the network layer.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;

/// Failures surfaced by [`crate::state::auth::AuthService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No stored user matched the submitted email and password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The backend refused to create the user.
    #[error("Registration failed: {0}")]
    Registration(String),

    /// The request never produced a usable response.
    #[error("Request failed: {0}")]
    Transport(String),
}

/// Why a single form field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Must be at least {0} characters")]
    TooShort(usize),
    #[error("Phone must look like 07XXXXXXXX")]
    InvalidPhone,
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Enter a valid date")]
    InvalidDate,
    #[error("Passwords do not match")]
    Mismatch,
}

/// Field-level validation failures keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} invalid field(s)", .fields.len())]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, FieldError>,
}

impl ValidationErrors {
    /// Record the first error for `field`; later errors for the same field are ignored.
    pub fn add(&mut self, field: &'static str, error: FieldError) {
        self.fields.entry(field).or_insert(error);
    }

    pub fn get(&self, field: &str) -> Option<FieldError> {
        self.fields.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected errors when at least one field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}
