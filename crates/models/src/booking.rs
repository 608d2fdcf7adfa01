use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::artist;
use crate::errors;

pub const PAYMENT_UNPAID: &str = "unpaid";
pub const PAYMENT_PAID: &str = "paid";
pub const STATUS_PENDING: &str = "pending";

/// Tattoo appointment request.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[serde(with = "common::datetime::display")]
    pub booking_date: DateTime,
    #[serde(with = "common::datetime::display")]
    pub appointment_date: DateTime,
    pub tattoo_style: String,
    pub tattoo_size: String,
    pub placement: String,
    pub artist_id: i32,
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

/// Shared by bookings and piercings.
pub fn validate_payment_status(value: &str) -> Result<(), errors::ModelError> {
    match value {
        PAYMENT_UNPAID | PAYMENT_PAID => Ok(()),
        _ => Err(errors::ModelError::Validation("Invalid payment status. Must be 'unpaid' or 'paid'".into())),
    }
}

/// Shared by bookings and piercings.
pub fn validate_contact_preference(value: &str) -> Result<(), errors::ModelError> {
    match value {
        "call" | "text" => Ok(()),
        _ => Err(errors::ModelError::Validation("Contact preference must be 'call' or 'text'".into())),
    }
}

pub fn validate_price(price: f64) -> Result<(), errors::ModelError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(errors::ModelError::Validation("Price must be a positive number".into()));
    }
    Ok(())
}
