use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::artist;
use crate::errors;

/// Portfolio photo owned by an artist.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gallery")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub artist_id: i32,
    pub image_url: String,
    pub caption: Option<String>,
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

pub fn validate_image_url(url: &str) -> Result<(), errors::ModelError> {
    if url.trim().is_empty() || !common::validate::is_valid_url(url) {
        return Err(errors::ModelError::Validation("Valid image URL is required".into()));
    }
    Ok(())
}
