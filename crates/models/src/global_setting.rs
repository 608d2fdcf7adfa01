use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Site-wide boolean flag such as `maintenance_mode`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "global_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub key: String,
    pub value: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_key(key: &str) -> Result<(), errors::ModelError> {
    if key.trim().is_empty() || key.chars().count() > 50 {
        return Err(errors::ModelError::Validation("Setting key must be 1 to 50 characters".into()));
    }
    Ok(())
}

pub async fn find_by_key<C: ConnectionTrait>(db: &C, key: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find().filter(Column::Key.eq(key)).one(db).await.map_err(Into::into)
}

pub async fn create<C: ConnectionTrait>(db: &C, key: &str, value: bool) -> Result<Model, errors::ModelError> {
    validate_key(key)?;
    let am = ActiveModel { key: Set(key.to_string()), value: Set(value), ..Default::default() };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
