use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use common::types::Message;
use models::user::Role;
use models::{artist, booking};
use service::access::require_role;
use service::artists::{self, ActivationInput, ArtistInput, ArtistSearch};
use service::bookings;
use service::pagination::Page;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, CurrentUser, PageQuery};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, ApiQuery(q): ApiQuery<PageQuery>) -> Result<Json<Page<artist::Model>>, ApiError> {
    Ok(Json(artists::list_artists(&state.db, q.pagination(100)).await?))
}

pub async fn create(
    State(state): State<AppState>,
    who: CurrentUser,
    ApiJson(input): ApiJson<ArtistInput>,
) -> Result<(StatusCode, Json<artist::Model>), ApiError> {
    require_role(&who, &[Role::Admin, Role::Artist])?;
    let created = artists::create_artist(&state.db, &who, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<artist::Model>, ApiError> {
    Ok(Json(artists::get_artist(&state.db, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    who: CurrentUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<ArtistInput>,
) -> Result<Json<artist::Model>, ApiError> {
    Ok(Json(artists::update_artist(&state.db, &who, id, input).await?))
}

pub async fn delete(State(state): State<AppState>, who: CurrentUser, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, ApiError> {
    artists::delete_artist(&state.db, &who, id).await?;
    Ok(Json(Message::new("Artist deleted successfully")))
}

pub async fn search(State(state): State<AppState>, ApiQuery(q): ApiQuery<ArtistSearch>) -> Result<Json<Vec<artist::Model>>, ApiError> {
    Ok(Json(artists::search_artists(&state.db, q).await?))
}

pub async fn deactivate(
    State(state): State<AppState>,
    who: CurrentUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<ActivationInput>,
) -> Result<Json<Value>, ApiError> {
    require_role(&who, &[Role::Admin])?;
    let updated = artists::set_active(&state.db, id, input).await?;
    let verb = if updated.is_active { "activated" } else { "deactivated" };
    Ok(Json(json!({"message": format!("Artist {verb} successfully"), "artist": updated})))
}

pub async fn bookings(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Vec<booking::Model>>, ApiError> {
    Ok(Json(bookings::list_for_artist(&state.db, id).await?))
}
