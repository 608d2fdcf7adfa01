use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "newsletters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub image: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    #[serde(with = "common::datetime::display")]
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, title: &str, image: Option<String>, body: &str) -> Result<Model, errors::ModelError> {
    if title.trim().is_empty() || body.trim().is_empty() {
        return Err(errors::ModelError::Validation("Title and body are required".into()));
    }
    let am = ActiveModel {
        title: Set(title.trim().to_string()),
        image: Set(image.filter(|i| !i.trim().is_empty())),
        body: Set(body.to_string()),
        created_at: Set(common::datetime::now()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
