use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use common::types::Message;
use models::piercing;
use service::appointments::PaymentStatusInput;
use service::pagination::Page;
use service::piercings::{self, PiercingInput};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, PageQuery};
use crate::routes::bookings::NameQuery;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, ApiQuery(q): ApiQuery<PageQuery>) -> Result<Json<Page<piercing::Model>>, ApiError> {
    Ok(Json(piercings::list_piercings(&state.db, q.pagination(10)).await?))
}

pub async fn create(State(state): State<AppState>, ApiJson(input): ApiJson<PiercingInput>) -> Result<(StatusCode, Json<piercing::Model>), ApiError> {
    let created = piercings::create_piercing(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<piercing::Model>, ApiError> {
    Ok(Json(piercings::get_piercing(&state.db, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<PiercingInput>,
) -> Result<Json<piercing::Model>, ApiError> {
    Ok(Json(piercings::update_piercing(&state.db, id, input).await?))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, ApiError> {
    piercings::delete_piercing(&state.db, id).await?;
    Ok(Json(Message::new("Piercing deleted successfully")))
}

pub async fn search(State(state): State<AppState>, ApiQuery(q): ApiQuery<NameQuery>) -> Result<Json<Vec<piercing::Model>>, ApiError> {
    Ok(Json(piercings::search_piercings(&state.db, q.name.as_deref()).await?))
}

pub async fn payment_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<PaymentStatusInput>,
) -> Result<Json<Value>, ApiError> {
    let updated = piercings::set_payment_status(&state.db, id, input).await?;
    Ok(Json(json!({"message": "Payment status updated successfully", "piercing": updated})))
}
