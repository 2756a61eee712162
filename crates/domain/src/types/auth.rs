//! Auth endpoint payloads

use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::UserProfile;
use crate::constants::PASSWORD_MISMATCH_MESSAGE;
use crate::errors::{ReelviewError, Result};

/// Body of `POST /auth/login`
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub user: UserProfile,
}

/// Response of `POST /auth/refresh`
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Response of `POST /auth/register`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl RegisterResponse {
    #[must_use]
    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or("Account created successfully")
    }
}

/// Response of `GET /auth/google/login`
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleLoginResponse {
    /// Provider authorization URL the browser is sent to
    pub url: String,
}

/// Error body returned by the backend on rejected requests
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Extract a human-readable `detail` message from a raw response body.
    ///
    /// Validation errors come back as a list of objects carrying `msg`; the
    /// first one is used.
    #[must_use]
    pub fn detail_from(body: &str) -> Option<String> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(message) => Some(message),
            serde_json::Value::Array(items) => items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }
}

/// Avatar uploaded with the sign-up form
#[derive(Clone, PartialEq, Eq)]
pub struct ProfileImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ProfileImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Sign-up form sent as multipart to `POST /auth/register`
#[derive(Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub dob: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub image: Option<ProfileImage>,
}

impl RegistrationForm {
    /// Client-side checks performed before anything is sent.
    ///
    /// # Errors
    /// Returns `ReelviewError::InvalidInput` when the passwords differ or the
    /// email/password are blank.
    pub fn validate(&self) -> Result<()> {
        if self.password != self.confirm_password {
            return Err(ReelviewError::InvalidInput(PASSWORD_MISMATCH_MESSAGE.to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(ReelviewError::InvalidInput("Email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(ReelviewError::InvalidInput("Password is required".to_string()));
        }
        Ok(())
    }

    /// Text fields in the order the backend form expects them
    #[must_use]
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("first_name", self.first_name.clone()),
            ("last_name", self.last_name.clone()),
            ("username", self.username.clone()),
            ("dob", self.dob.clone()),
            ("email", self.email.clone()),
            ("password", self.password.clone()),
            ("confirm_password", self.confirm_password.clone()),
        ]
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("dob", &self.dob)
            .field("email", &self.email)
            .field("image", &self.image)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            username: "ada".into(),
            dob: "1815-12-10".into(),
            email: "ada@example.com".into(),
            password: "analytical".into(),
            confirm_password: "analytical".into(),
            image: None,
        }
    }

    #[test]
    fn mismatched_passwords_rejected() {
        let mut form = form();
        form.confirm_password = "engine".into();

        let err = form.validate().unwrap_err();
        assert_eq!(err, ReelviewError::InvalidInput("Passwords do not match".into()));
    }

    #[test]
    fn valid_form_passes() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn debug_output_hides_passwords() {
        let rendered = format!("{:?}", form());
        assert!(!rendered.contains("analytical"));

        let login = LoginRequest { email: "a@b.c".into(), password: "hunter2".into() };
        assert!(!format!("{login:?}").contains("hunter2"));
    }

    #[test]
    fn detail_extraction() {
        assert_eq!(
            ErrorBody::detail_from(r#"{"detail":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            ErrorBody::detail_from(r#"{"detail":[{"msg":"field required","loc":["email"]}]}"#)
                .as_deref(),
            Some("field required")
        );
        assert_eq!(ErrorBody::detail_from("Internal Server Error"), None);
    }
}
