use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::artist;

/// Piercing appointment request. Unlike bookings the artist is optional.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "piercings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[serde(with = "common::datetime::display")]
    pub booking_date: DateTime,
    #[serde(with = "common::datetime::display")]
    pub appointment_date: DateTime,
    pub piercing_type: String,
    pub jewelry_type: String,
    pub placement: String,
    pub artist_id: Option<i32>,
    pub studio_location: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub payment_status: String,
    pub status: String,
    pub name: String,
    pub phone_number: String,
    pub call_or_text_preference: String,
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
