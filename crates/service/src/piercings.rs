//! Piercing appointments. Same lifecycle as bookings with an optional artist.

use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::{booking, piercing};

use crate::appointments::{self, PaymentStatusInput};
use crate::errors::ServiceError;
use crate::pagination::{fetch_page, Page, Pagination};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PiercingInput {
    pub piercing_type: Option<String>,
    pub jewelry_type: Option<String>,
    pub placement: Option<String>,
    /// Absent leaves the artist alone; explicit `null` unassigns it.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub artist_id: Option<Option<i32>>,
    pub studio_location: Option<String>,
    pub appointment_date: Option<String>,
    pub price: Option<f64>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub call_or_text_preference: Option<String>,
    pub payment_status: Option<String>,
    pub status: Option<String>,
}

#[instrument(skip(db, input))]
pub async fn create_piercing(db: &DatabaseConnection, input: PiercingInput) -> Result<piercing::Model, ServiceError> {
    let now = common::datetime::now();
    let piercing_type = appointments::required(input.piercing_type)?;
    let jewelry_type = appointments::required(input.jewelry_type)?;
    let placement = appointments::required(input.placement)?;
    let studio_location = appointments::required(input.studio_location)?;
    let name = appointments::required(input.name)?;
    let phone_number = appointments::required(input.phone_number)?;
    let price = appointments::required_price(input.price)?;
    let preference = appointments::contact_preference(input.call_or_text_preference)?;
    let appointment_date = appointments::appointment(input.appointment_date, now)?;

    let txn = db.begin().await?;
    let artist_id = input.artist_id.flatten();
    if let Some(artist_id) = artist_id {
        appointments::ensure_artist(&txn, artist_id).await?;
    }
    let created = piercing::ActiveModel {
        booking_date: Set(now),
        appointment_date: Set(appointment_date),
        piercing_type: Set(piercing_type),
        jewelry_type: Set(jewelry_type),
        placement: Set(placement),
        artist_id: Set(artist_id),
        studio_location: Set(studio_location),
        price: Set(price),
        payment_status: Set(booking::PAYMENT_UNPAID.into()),
        status: Set(booking::STATUS_PENDING.into()),
        name: Set(name),
        phone_number: Set(phone_number),
        call_or_text_preference: Set(preference),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(piercing_id = created.id, artist_id = ?created.artist_id, "piercing_created");
    Ok(created)
}

pub async fn get_piercing(db: &DatabaseConnection, id: i32) -> Result<piercing::Model, ServiceError> {
    piercing::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("Piercing"))
}

pub async fn list_piercings(db: &DatabaseConnection, p: Pagination) -> Result<Page<piercing::Model>, ServiceError> {
    fetch_page(db, piercing::Entity::find().order_by_asc(piercing::Column::Id), p).await
}

#[instrument(skip(db, input))]
pub async fn update_piercing(db: &DatabaseConnection, id: i32, input: PiercingInput) -> Result<piercing::Model, ServiceError> {
    let now = common::datetime::now();
    let txn = db.begin().await?;
    let found = piercing::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Piercing"))?;
    let mut am: piercing::ActiveModel = found.into();

    if input.piercing_type.is_some() {
        am.piercing_type = Set(appointments::required(input.piercing_type)?);
    }
    if input.jewelry_type.is_some() {
        am.jewelry_type = Set(appointments::required(input.jewelry_type)?);
    }
    if input.placement.is_some() {
        am.placement = Set(appointments::required(input.placement)?);
    }
    if input.studio_location.is_some() {
        am.studio_location = Set(appointments::required(input.studio_location)?);
    }
    if input.appointment_date.is_some() {
        am.appointment_date = Set(appointments::appointment(input.appointment_date, now)?);
    }
    if input.price.is_some() {
        am.price = Set(appointments::required_price(input.price)?);
    }
    if input.payment_status.is_some() {
        am.payment_status = Set(appointments::payment_status(input.payment_status)?);
    }
    if let Some(status) = input.status {
        am.status = Set(status);
    }
    match input.artist_id {
        Some(Some(artist_id)) => {
            appointments::ensure_artist(&txn, artist_id).await?;
            am.artist_id = Set(Some(artist_id));
        }
        Some(None) => am.artist_id = Set(None),
        None => {}
    }
    if input.name.is_some() {
        am.name = Set(appointments::required(input.name)?);
    }
    if input.phone_number.is_some() {
        am.phone_number = Set(appointments::required(input.phone_number)?);
    }
    if input.call_or_text_preference.is_some() {
        am.call_or_text_preference = Set(appointments::contact_preference(input.call_or_text_preference)?);
    }

    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(piercing_id = id, "piercing_updated");
    Ok(updated)
}

#[instrument(skip(db, input))]
pub async fn set_payment_status(db: &DatabaseConnection, id: i32, input: PaymentStatusInput) -> Result<piercing::Model, ServiceError> {
    let found = get_piercing(db, id).await?;
    let status = appointments::payment_status(input.payment_status)?;
    let mut am: piercing::ActiveModel = found.into();
    am.payment_status = Set(status);
    Ok(am.update(db).await?)
}

#[instrument(skip(db))]
pub async fn delete_piercing(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = piercing::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Piercing"));
    }
    info!(piercing_id = id, "piercing_deleted");
    Ok(())
}

pub async fn search_piercings(db: &DatabaseConnection, name: Option<&str>) -> Result<Vec<piercing::Model>, ServiceError> {
    let pattern = appointments::search_term(name)?;
    let found = piercing::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(piercing::Column::Name))).like(pattern))
        .order_by_asc(piercing::Column::Id)
        .all(db)
        .await?;
    if found.is_empty() {
        return Err(ServiceError::NotFound("No piercings found matching the search query.".into()));
    }
    Ok(found)
}
