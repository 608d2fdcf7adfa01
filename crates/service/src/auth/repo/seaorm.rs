use chrono::NaiveDateTime;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::auth::domain::{AuthUser, NewUser, StoredUser};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn stored(u: models::user::Model) -> StoredUser {
    let password_hash = u.password_hash.clone();
    StoredUser { user: u.into(), password_hash }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError> {
        let res = models::user::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(stored))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError> {
        let res = models::user::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(stored))
    }

    async fn create_user(&self, new: NewUser) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, &new.username, &new.email, new.password_hash, new.role)
            .await
            .map_err(|e| match e {
                models::errors::ModelError::Validation(m) => AuthError::Validation(m),
                models::errors::ModelError::Db(m) => AuthError::Repository(m),
            })?;
        Ok(created.into())
    }

    async fn record_login(&self, user_id: i32, at: NaiveDateTime) -> Result<AuthUser, AuthError> {
        let found = models::user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?
            .ok_or_else(|| AuthError::NotFound("User not found.".into()))?;
        let mut am: models::user::ActiveModel = found.into();
        am.last_login = Set(Some(at));
        let updated = am.update(&self.db).await.map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(updated.into())
    }

    async fn set_password(&self, user_id: i32, password_hash: String) -> Result<(), AuthError> {
        let found = models::user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?
            .ok_or_else(|| AuthError::NotFound("User not found.".into()))?;
        let mut am: models::user::ActiveModel = found.into();
        am.password_hash = Set(password_hash);
        am.update(&self.db).await.map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(())
    }
}
