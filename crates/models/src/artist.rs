use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{booking, gallery, piercing, review, user};

/// Artist profile. `average_rating` is derived from `reviews` and never written by clients.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub specialties: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub social_media: Option<Json>,
    pub years_of_experience: Option<i32>,
    pub styles: Option<Json>,
    #[sea_orm(column_type = "Double")]
    pub average_rating: f64,
    pub location: Option<String>,
    pub profile_picture: Option<String>,
    pub availability_schedule: Option<Json>,
    #[sea_orm(column_type = "Text", nullable)]
    pub certifications: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub awards: Option<String>,
    pub is_active: bool,
    #[serde(with = "common::datetime::display")]
    pub created_at: DateTime,
    #[serde(with = "common::datetime::display")]
    pub updated_at: DateTime,
    pub created_by: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    Bookings,
    Piercings,
    Reviews,
    Gallery,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity).from(Column::CreatedBy).to(user::Column::Id).into(),
            Relation::Bookings => Entity::has_many(booking::Entity).into(),
            Relation::Piercings => Entity::has_many(piercing::Entity).into(),
            Relation::Reviews => Entity::has_many(review::Entity).into(),
            Relation::Gallery => Entity::has_many(gallery::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl Related<booking::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bookings.def() }
}

impl Related<piercing::Entity> for Entity {
    fn to() -> RelationDef { Relation::Piercings.def() }
}

impl Related<review::Entity> for Entity {
    fn to() -> RelationDef { Relation::Reviews.def() }
}

impl Related<gallery::Entity> for Entity {
    fn to() -> RelationDef { Relation::Gallery.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Style names stored in the `styles` JSON array; non-string entries are skipped.
    pub fn style_names(&self) -> Vec<String> {
        match &self.styles {
            Some(Json::Array(items)) => items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
            _ => Vec::new(),
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("Name is required".into())); }
    if name.trim().chars().count() > 100 { return Err(errors::ModelError::Validation("Name must be at most 100 characters".into())); }
    Ok(())
}

pub fn validate_years_of_experience(years: i32) -> Result<(), errors::ModelError> {
    if years < 0 { return Err(errors::ModelError::Validation("Years of experience cannot be negative".into())); }
    Ok(())
}

/// Owner lookup used by dashboards: the profile created by `user_id`, if any.
pub async fn find_by_owner<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find().filter(Column::CreatedBy.eq(user_id)).one(db).await.map_err(Into::into)
}
