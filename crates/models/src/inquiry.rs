use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inquiries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub inquiry: String,
    #[serde(with = "common::datetime::display")]
    pub submitted_at: DateTime,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, phone_number: Option<String>, email: &str, inquiry: &str) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() || email.trim().is_empty() || inquiry.trim().is_empty() {
        return Err(errors::ModelError::Validation("Name, email, and inquiry are required".into()));
    }
    if !common::validate::is_valid_email(email) {
        return Err(errors::ModelError::Validation("Invalid email format".into()));
    }
    let am = ActiveModel {
        name: Set(name.trim().to_string()),
        phone_number: Set(phone_number.filter(|p| !p.trim().is_empty())),
        email: Set(email.trim().to_string()),
        inquiry: Set(inquiry.to_string()),
        submitted_at: Set(common::datetime::now()),
        status: Set("pending".into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
