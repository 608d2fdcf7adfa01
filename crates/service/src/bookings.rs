//! Tattoo booking lifecycle: create, partial update, payment status, delete, search.

use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::booking;

use crate::appointments::{self, PaymentStatusInput};
use crate::errors::ServiceError;
use crate::pagination::{fetch_page, Page, Pagination};

/// Create and update body. On create `payment_status` and `status` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingInput {
    pub tattoo_style: Option<String>,
    pub tattoo_size: Option<String>,
    pub placement: Option<String>,
    pub artist_id: Option<i32>,
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
pub async fn create_booking(db: &DatabaseConnection, input: BookingInput) -> Result<booking::Model, ServiceError> {
    let now = common::datetime::now();
    let tattoo_style = appointments::required(input.tattoo_style)?;
    let tattoo_size = appointments::required(input.tattoo_size)?;
    let placement = appointments::required(input.placement)?;
    let artist_id = input.artist_id.ok_or_else(ServiceError::required_fields)?;
    let studio_location = appointments::required(input.studio_location)?;
    let name = appointments::required(input.name)?;
    let phone_number = appointments::required(input.phone_number)?;
    let price = appointments::required_price(input.price)?;
    let preference = appointments::contact_preference(input.call_or_text_preference)?;
    let appointment_date = appointments::appointment(input.appointment_date, now)?;

    let txn = db.begin().await?;
    appointments::ensure_artist(&txn, artist_id).await?;
    let created = booking::ActiveModel {
        booking_date: Set(now),
        appointment_date: Set(appointment_date),
        tattoo_style: Set(tattoo_style),
        tattoo_size: Set(tattoo_size),
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
    info!(booking_id = created.id, artist_id, "booking_created");
    Ok(created)
}

pub async fn get_booking(db: &DatabaseConnection, id: i32) -> Result<booking::Model, ServiceError> {
    booking::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("Booking"))
}

pub async fn list_bookings(db: &DatabaseConnection, p: Pagination) -> Result<Page<booking::Model>, ServiceError> {
    fetch_page(db, booking::Entity::find().order_by_asc(booking::Column::Id), p).await
}

/// Bookings of one artist. The artist must exist.
pub async fn list_for_artist(db: &DatabaseConnection, artist_id: i32) -> Result<Vec<booking::Model>, ServiceError> {
    appointments::ensure_artist(db, artist_id).await?;
    Ok(booking::Entity::find()
        .filter(booking::Column::ArtistId.eq(artist_id))
        .order_by_asc(booking::Column::Id)
        .all(db)
        .await?)
}

/// Apply the present fields of `input`, validating each like on create.
#[instrument(skip(db, input))]
pub async fn update_booking(db: &DatabaseConnection, id: i32, input: BookingInput) -> Result<booking::Model, ServiceError> {
    let now = common::datetime::now();
    let txn = db.begin().await?;
    let found = booking::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Booking"))?;
    let mut am: booking::ActiveModel = found.into();

    if input.tattoo_style.is_some() {
        am.tattoo_style = Set(appointments::required(input.tattoo_style)?);
    }
    if input.tattoo_size.is_some() {
        am.tattoo_size = Set(appointments::required(input.tattoo_size)?);
    }
    if input.placement.is_some() {
        am.placement = Set(appointments::required(input.placement)?);
    }
    if let Some(artist_id) = input.artist_id {
        appointments::ensure_artist(&txn, artist_id).await?;
        am.artist_id = Set(artist_id);
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
    if input.name.is_some() {
        am.name = Set(appointments::required(input.name)?);
    }
    if input.phone_number.is_some() {
        am.phone_number = Set(appointments::required(input.phone_number)?);
    }
    if input.call_or_text_preference.is_some() {
        am.call_or_text_preference = Set(appointments::contact_preference(input.call_or_text_preference)?);
    }
    if input.payment_status.is_some() {
        am.payment_status = Set(appointments::payment_status(input.payment_status)?);
    }
    if let Some(status) = input.status {
        am.status = Set(status);
    }

    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(booking_id = id, "booking_updated");
    Ok(updated)
}

#[instrument(skip(db, input))]
pub async fn set_payment_status(db: &DatabaseConnection, id: i32, input: PaymentStatusInput) -> Result<booking::Model, ServiceError> {
    let found = get_booking(db, id).await?;
    let status = appointments::payment_status(input.payment_status)?;
    let mut am: booking::ActiveModel = found.into();
    am.payment_status = Set(status);
    let updated = am.update(db).await?;
    info!(booking_id = id, payment_status = %updated.payment_status, "booking_payment_status_changed");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_booking(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = booking::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Booking"));
    }
    info!(booking_id = id, "booking_deleted");
    Ok(())
}

/// Case-insensitive substring match on the client name.
pub async fn search_bookings(db: &DatabaseConnection, name: Option<&str>) -> Result<Vec<booking::Model>, ServiceError> {
    let pattern = appointments::search_term(name)?;
    let found = booking::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(booking::Column::Name))).like(pattern))
        .order_by_asc(booking::Column::Id)
        .all(db)
        .await?;
    if found.is_empty() {
        return Err(ServiceError::NotFound("No bookings found matching the search query.".into()));
    }
    Ok(found)
}
