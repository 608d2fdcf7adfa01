use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::domain::{AuthUser, NewUser, StoredUser};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError>;
    async fn create_user(&self, user: NewUser) -> Result<AuthUser, AuthError>;

    async fn record_login(&self, user_id: i32, at: NaiveDateTime) -> Result<AuthUser, AuthError>;
    async fn set_password(&self, user_id: i32, password_hash: String) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<i32, StoredUser>>, // key: user id
    }

    impl MockAuthRepository {
        fn find_by(&self, pred: impl Fn(&StoredUser) -> bool) -> Option<StoredUser> {
            let users = self.users.lock().ok()?;
            users.values().find(|u| pred(u)).cloned()
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError> {
            Ok(self.find_by(|u| u.user.username == username))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError> {
            Ok(self.find_by(|u| u.user.email == email))
        }

        async fn create_user(&self, new: NewUser) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            if users.values().any(|u| u.user.username == new.username || u.user.email == new.email) {
                return Err(AuthError::Conflict("User already exists.".into()));
            }
            let user = AuthUser {
                id: users.len() as i32 + 1,
                username: new.username,
                email: new.email,
                role: new.role,
                created_at: common::datetime::now(),
                last_login: None,
            };
            users.insert(user.id, StoredUser { user: user.clone(), password_hash: new.password_hash });
            Ok(user)
        }

        async fn record_login(&self, user_id: i32, at: NaiveDateTime) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            let stored = users.get_mut(&user_id).ok_or_else(|| AuthError::NotFound("User not found.".into()))?;
            stored.user.last_login = Some(at);
            Ok(stored.user.clone())
        }

        async fn set_password(&self, user_id: i32, password_hash: String) -> Result<(), AuthError> {
            let mut users = self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            let stored = users.get_mut(&user_id).ok_or_else(|| AuthError::NotFound("User not found.".into()))?;
            stored.password_hash = password_hash;
            Ok(())
        }
    }
}
