use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Newsletter recipient; `email` is unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscribers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(with = "common::datetime::display")]
    pub subscribed_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, email: &str) -> Result<Model, errors::ModelError> {
    if !common::validate::is_valid_email(email) {
        return Err(errors::ModelError::Validation("Invalid email address".into()));
    }
    let am = ActiveModel {
        email: Set(email.trim().to_string()),
        subscribed_at: Set(common::datetime::now()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find().filter(Column::Email.eq(email.trim())).one(db).await.map_err(Into::into)
}
