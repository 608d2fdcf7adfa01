use chrono::NaiveDateTime;
use models::user::Role;
use serde::{Deserialize, Serialize};

/// Signup input. Fields are optional so a missing one becomes a validation error
/// with a useful message instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "user_type")]
    pub role: Option<String>,
}

/// Signin input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SigninInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordResetInput {
    pub token: Option<String>,
    pub new_password: Option<String>,
}

/// Domain user (business view, no secrets)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(with = "common::datetime::display")]
    pub created_at: NaiveDateTime,
    #[serde(with = "common::datetime::display_opt")]
    pub last_login: Option<NaiveDateTime>,
}

impl From<models::user::Model> for AuthUser {
    fn from(u: models::user::Model) -> Self {
        Self { id: u.id, username: u.username, email: u.email, role: u.role, created_at: u.created_at, last_login: u.last_login }
    }
}

/// User plus stored password hash, as read for credential checks
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: AuthUser,
    pub password_hash: String,
}

/// New account with an already hashed password
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Signin result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}
