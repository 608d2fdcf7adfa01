use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::artist;
use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub artist_id: i32,
    pub star_rating: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub review_text: Option<String>,
    pub photo_url: Option<String>,
    #[serde(with = "common::datetime::display")]
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Artist,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Artist => Entity::belongs_to(artist::Entity).from(Column::ArtistId).to(artist::Column::Id).into() }
    }
}

impl Related<artist::Entity> for Entity {
    fn to() -> RelationDef { Relation::Artist.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_star_rating(rating: i32) -> Result<(), errors::ModelError> {
    if !(1..=5).contains(&rating) {
        return Err(errors::ModelError::Validation("Star rating must be between 1 and 5".into()));
    }
    Ok(())
}
