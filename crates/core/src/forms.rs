//! Client-side validation for the sign-in, password-recovery and registration forms.
//!
//! Format rules are declared with `validator`; "required" checks run first so an
//! empty field reports "X is required" rather than a format message.

use std::borrow::Cow;
use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors};

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// First error message per field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, String>,
}

impl FormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.insert(field, message);
        }
    }

    fn insert(&mut self, field: &str, message: &str) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    fn merge(&mut self, errors: &ValidationErrors) {
        for (field, list) in errors.field_errors() {
            let Some(first) = list.first() else {
                continue;
            };
            let message = first
                .message
                .as_ref()
                .map_or_else(|| first.code.to_string(), ToString::to_string);
            self.insert(&field, &message);
        }
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .fields
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for FormErrors {}

//
// ─── SIGN IN ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct SignInForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    pub password: String,
}

impl SignInForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `FormErrors` with one message per invalid field.
    pub fn check(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("email", &self.email, "Email is required");
        errors.require("password", &self.password, "Password is required");
        if let Err(found) = self.validate() {
            errors.merge(&found);
        }
        errors.into_result()
    }
}

//
// ─── FORGOT PASSWORD ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ForgotPasswordForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

impl ForgotPasswordForm {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }

    /// # Errors
    ///
    /// Returns `FormErrors` keyed by `email` when the address is missing or malformed.
    pub fn check(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("email", &self.email, "Email is required");
        if let Err(found) = self.validate() {
            errors.merge(&found);
        }
        errors.into_result()
    }
}

//
// ─── REGISTER ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 2, message = "First Name must be at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last Name must be at least 2 characters"))]
    pub last_name: String,
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub re_password: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

impl RegisterForm {
    /// # Errors
    ///
    /// Returns `FormErrors` with one message per invalid field.
    pub fn check(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("first_name", &self.first_name, "First Name is required");
        errors.require("last_name", &self.last_name, "Last Name is required");
        errors.require("username", &self.username, "Username is required");
        errors.require("email", &self.email, "Email is required");
        errors.require("password", &self.password, "Password is required");
        errors.require("phone", &self.phone, "Phone number is required");
        if let Err(found) = self.validate() {
            errors.merge(&found);
        }
        errors.into_result()
    }
}

fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < 8 {
        return Err(ValidationError::new("password_length")
            .with_message(Cow::Borrowed("Password must be at least 8 characters")));
    }

    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if allowed && has_lower && has_upper && has_digit && has_special {
        return Ok(());
    }
    Err(ValidationError::new("password_strength").with_message(Cow::Borrowed(
        "Password must include uppercase, lowercase, number, and special character",
    )))
}

/// Egyptian mobile numbers: `01`, an operator digit (0, 1, 2 or 5), then eight digits.
fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let bytes = value.as_bytes();
    let valid = bytes.len() == 11
        && bytes.starts_with(b"01")
        && matches!(bytes[2], b'0' | b'1' | b'2' | b'5')
        && bytes[3..].iter().all(u8::is_ascii_digit);
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("phone_format")
            .with_message(Cow::Borrowed("Enter a valid phone number (01023456789)")))
    }
}
