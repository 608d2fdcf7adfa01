use axum::{extract::State, http::StatusCode, Json};

use common::types::Message;
use service::gallery::{self, GalleryPhoto, PhotoInput};
use service::pagination::Page;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, CurrentUser, PageQuery};
use crate::state::AppState;

pub async fn upload(
    State(state): State<AppState>,
    who: CurrentUser,
    ApiPath(artist_id): ApiPath<i32>,
    ApiJson(input): ApiJson<PhotoInput>,
) -> Result<(StatusCode, Json<GalleryPhoto>), ApiError> {
    let created = gallery::upload_photo(&state.db, &who, artist_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_for_artist(
    State(state): State<AppState>,
    ApiPath(artist_id): ApiPath<i32>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Page<GalleryPhoto>>, ApiError> {
    let page = gallery::list_for_artist(&state.db, artist_id, q.search.as_deref(), q.pagination(12)).await?;
    Ok(Json(page))
}

pub async fn list_all(State(state): State<AppState>, ApiQuery(q): ApiQuery<PageQuery>) -> Result<Json<Page<GalleryPhoto>>, ApiError> {
    Ok(Json(gallery::list_all(&state.db, q.pagination(12)).await?))
}

pub async fn delete(State(state): State<AppState>, who: CurrentUser, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, ApiError> {
    gallery::delete_photo(&state.db, &who, id).await?;
    Ok(Json(Message::new("Photo deleted successfully")))
}
