use axum::{extract::State, http::StatusCode, Json};

use common::types::Message;
use models::inquiry;
use models::user::Role;
use service::access::require_role;
use service::inquiries::{self, InquiryInput, InquiryStatusInput};
use service::pagination::Page;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, CurrentUser, PageQuery};
use crate::state::AppState;

const STAFF: &[Role] = &[Role::Admin, Role::Artist];

pub async fn create(State(state): State<AppState>, ApiJson(input): ApiJson<InquiryInput>) -> Result<(StatusCode, Json<inquiry::Model>), ApiError> {
    let created = inquiries::create_inquiry(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(State(state): State<AppState>, who: CurrentUser, ApiQuery(q): ApiQuery<PageQuery>) -> Result<Json<Page<inquiry::Model>>, ApiError> {
    require_role(&who, STAFF)?;
    Ok(Json(inquiries::list_inquiries(&state.db, q.pagination(10)).await?))
}

pub async fn update(
    State(state): State<AppState>,
    who: CurrentUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<InquiryStatusInput>,
) -> Result<Json<inquiry::Model>, ApiError> {
    require_role(&who, STAFF)?;
    Ok(Json(inquiries::update_status(&state.db, id, input).await?))
}

pub async fn delete(State(state): State<AppState>, who: CurrentUser, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, ApiError> {
    require_role(&who, STAFF)?;
    inquiries::delete_inquiry(&state.db, id).await?;
    Ok(Json(Message::new("Inquiry deleted successfully.")))
}
