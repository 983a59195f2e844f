// src/models/user.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

/// The shape check the original applied: something@something.tld. This is
/// deliberately not RFC-grade address validation.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex must compile"));

/// A registered account in the 'users' collection.
///
/// The password is stored and compared in plain text. This is inherited
/// legacy behavior from the client-only original and is NOT a safe default;
/// it stays only because the system is an explicit demo. The field still
/// never leaves the process: API responses carry the `Session` projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub username: String,

    /// Always lowercased; uniqueness is enforced against the lowercased form.
    pub email: String,

    pub password: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Projection of a `User` handed out to callers and held for the lifetime
/// of a session. Never contains the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The user's id.
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl Session {
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// DTO for registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Username is required."))]
    pub username: String,
    #[validate(custom(function = validate_email_shape))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters."))]
    pub password: String,
}

/// DTO for login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

fn validate_email_shape(email: &str) -> Result<(), validator::ValidationError> {
    if !EMAIL_RE.is_match(email) {
        return Err(validator::ValidationError::new("invalid_email"));
    }
    Ok(())
}
