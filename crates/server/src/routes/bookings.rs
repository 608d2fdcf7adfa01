use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use common::types::Message;
use models::booking;
use service::appointments::PaymentStatusInput;
use service::bookings::{self, BookingInput};
use service::pagination::Page;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, PageQuery};
use crate::state::AppState;

/// `?name=` for the client-name search on bookings and piercings.
#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

pub async fn list(State(state): State<AppState>, ApiQuery(q): ApiQuery<PageQuery>) -> Result<Json<Page<booking::Model>>, ApiError> {
    Ok(Json(bookings::list_bookings(&state.db, q.pagination(10)).await?))
}

pub async fn create(State(state): State<AppState>, ApiJson(input): ApiJson<BookingInput>) -> Result<(StatusCode, Json<booking::Model>), ApiError> {
    let created = bookings::create_booking(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<booking::Model>, ApiError> {
    Ok(Json(bookings::get_booking(&state.db, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<BookingInput>,
) -> Result<Json<booking::Model>, ApiError> {
    Ok(Json(bookings::update_booking(&state.db, id, input).await?))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, ApiError> {
    bookings::delete_booking(&state.db, id).await?;
    Ok(Json(Message::new("Booking deleted successfully")))
}

pub async fn search(State(state): State<AppState>, ApiQuery(q): ApiQuery<NameQuery>) -> Result<Json<Vec<booking::Model>>, ApiError> {
    Ok(Json(bookings::search_bookings(&state.db, q.name.as_deref()).await?))
}

pub async fn payment_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<PaymentStatusInput>,
) -> Result<Json<Value>, ApiError> {
    let updated = bookings::set_payment_status(&state.db, id, input).await?;
    Ok(Json(json!({"message": "Payment status updated successfully", "booking": updated})))
}
