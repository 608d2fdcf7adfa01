use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::artist;

/// Account role carried in session tokens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "artist")]
    Artist,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Artist => "artist",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "artist" => Some(Role::Artist),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[serde(with = "common::datetime::display")]
    pub created_at: DateTime,
    #[serde(with = "common::datetime::display_opt")]
    pub last_login: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Artist,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Artist => Entity::has_many(artist::Entity).into() }
    }
}

impl Related<artist::Entity> for Entity {
    fn to() -> RelationDef { Relation::Artist.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    let trimmed = username.trim();
    if trimmed.is_empty() { return Err(errors::ModelError::Validation("Username is required.".into())); }
    if trimmed.chars().count() > 50 { return Err(errors::ModelError::Validation("Username must be at most 50 characters.".into())); }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !common::validate::is_valid_email(email) { return Err(errors::ModelError::Validation("Invalid email format.".into())); }
    Ok(())
}

/// Insert a user whose password is already hashed.
pub async fn create<C: ConnectionTrait>(db: &C, username: &str, email: &str, password_hash: String, role: Role) -> Result<Model, errors::ModelError> {
    validate_username(username)?;
    validate_email(email)?;
    let am = ActiveModel {
        username: Set(username.trim().to_string()),
        email: Set(email.trim().to_string()),
        password_hash: Set(password_hash),
        role: Set(role),
        created_at: Set(common::datetime::now()),
        last_login: Set(None),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find().filter(Column::Username.eq(username.trim())).one(db).await.map_err(Into::into)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find().filter(Column::Email.eq(email.trim())).one(db).await.map_err(Into::into)
}
