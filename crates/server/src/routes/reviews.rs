use axum::{extract::State, http::StatusCode, Json};

use common::types::Message;
use models::review;
use service::pagination::Page;
use service::reviews::{self, ReviewInput};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, PageQuery};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ApiPath(artist_id): ApiPath<i32>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Page<review::Model>>, ApiError> {
    Ok(Json(reviews::list_reviews(&state.db, artist_id, q.pagination(10)).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiPath(artist_id): ApiPath<i32>,
    ApiJson(input): ApiJson<ReviewInput>,
) -> Result<(StatusCode, Json<review::Model>), ApiError> {
    let created = reviews::create_review(&state.db, artist_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<ReviewInput>,
) -> Result<Json<review::Model>, ApiError> {
    Ok(Json(reviews::update_review(&state.db, id, input).await?))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, ApiError> {
    reviews::delete_review(&state.db, id).await?;
    Ok(Json(Message::new("Review deleted successfully")))
}
