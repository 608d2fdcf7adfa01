//! Account maintenance outside the auth flows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::user::{self, Role};

use crate::access::{require_admin_or_owner, Identity};
use crate::auth::password;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "user_type")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoginActivity {
    pub user_id: i32,
    pub username: String,
    #[serde(with = "common::datetime::display")]
    pub last_login: chrono::NaiveDateTime,
    pub role: Role,
}

pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".into()))
}

pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    Ok(user::Entity::find().order_by_asc(user::Column::Id).all(db).await?)
}

/// Admin or the account itself. Only admins may change a role.
#[instrument(skip(db, input), fields(user_id = who.user_id))]
pub async fn update_user(db: &DatabaseConnection, who: &Identity, id: i32, input: UserUpdate) -> Result<user::Model, ServiceError> {
    let txn = db.begin().await?;
    let found = user::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
    require_admin_or_owner(who, found.id)?;
    let mut am: user::ActiveModel = found.into();

    if let Some(username) = input.username.as_deref().map(str::trim) {
        user::validate_username(username)?;
        let taken = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::Id.ne(id))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(ServiceError::Conflict("Username already exists.".into()));
        }
        am.username = Set(username.to_string());
    }
    if let Some(email) = input.email.as_deref().map(str::trim) {
        let taken = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Id.ne(id))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(ServiceError::Conflict("Email already exists.".into()));
        }
        user::validate_email(email)?;
        am.email = Set(email.to_string());
    }
    if let Some(raw) = input.password.as_deref() {
        password::check_policy(raw)?;
        am.password_hash = Set(password::hash(raw)?);
    }
    if let Some(raw) = input.role.as_deref() {
        if !who.is_admin() {
            return Err(ServiceError::Forbidden("Only admins can change user type.".into()));
        }
        let role = Role::parse(raw).ok_or_else(|| ServiceError::Validation("Invalid user type.".into()))?;
        am.role = Set(role);
    }

    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(target_user = id, "user_updated");
    Ok(updated)
}

/// Removes the account and, through the foreign key, its artist profile.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = user::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::NotFound("User not found".into()));
    }
    info!(target_user = id, "user_deleted");
    Ok(())
}

/// Ten most recent logins; accounts that never logged in are skipped.
pub async fn recent_activity(db: &DatabaseConnection) -> Result<Vec<LoginActivity>, ServiceError> {
    let users = user::Entity::find()
        .filter(user::Column::LastLogin.is_not_null())
        .order_by_desc(user::Column::LastLogin)
        .limit(10)
        .all(db)
        .await?;
    Ok(users
        .into_iter()
        .filter_map(|u| {
            u.last_login.map(|last_login| LoginActivity { user_id: u.id, username: u.username, last_login, role: u.role })
        })
        .collect())
}
