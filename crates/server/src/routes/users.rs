use axum::{extract::State, Json};
use serde_json::{json, Value};

use common::types::Message;
use models::user::Role;
use service::access::require_role;
use service::users::{self, UserUpdate};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, CurrentUser};
use crate::state::AppState;

pub async fn update(
    State(state): State<AppState>,
    who: CurrentUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UserUpdate>,
) -> Result<Json<Value>, ApiError> {
    let updated = users::update_user(&state.db, &who, id, input).await?;
    Ok(Json(json!({"message": "User updated successfully.", "user": updated})))
}

pub async fn delete(State(state): State<AppState>, who: CurrentUser, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, ApiError> {
    require_role(&who, &[Role::Admin])?;
    users::delete_user(&state.db, id).await?;
    Ok(Json(Message::new("User deleted successfully.")))
}
