use axum::{extract::State, Json};
use serde_json::{json, Value};

use models::artist;
use models::user::Role;
use service::access::require_role;
use service::dashboard::{self, AdminDashboard, ArtistDashboard, BookingTrends, ProfileUpdate};
use service::users;

use crate::errors::ApiError;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

pub async fn artist_view(State(state): State<AppState>, who: CurrentUser) -> Result<Json<ArtistDashboard>, ApiError> {
    require_role(&who, &[Role::Artist])?;
    Ok(Json(dashboard::artist_dashboard(&state.db, &who).await?))
}

pub async fn artist_update(
    State(state): State<AppState>,
    who: CurrentUser,
    ApiJson(input): ApiJson<ProfileUpdate>,
) -> Result<Json<Value>, ApiError> {
    require_role(&who, &[Role::Artist])?;
    let updated: artist::Model = dashboard::update_artist_profile(&state.db, &who, input).await?;
    Ok(Json(json!({"message": "Profile updated successfully.", "artist": updated})))
}

pub async fn admin_view(State(state): State<AppState>, who: CurrentUser) -> Result<Json<AdminDashboard>, ApiError> {
    require_role(&who, &[Role::Admin])?;
    Ok(Json(dashboard::admin_dashboard(&state.db, &who).await?))
}

pub async fn activity(State(state): State<AppState>, who: CurrentUser) -> Result<Json<Value>, ApiError> {
    require_role(&who, &[Role::Admin])?;
    let recent = users::recent_activity(&state.db).await?;
    Ok(Json(json!({"recent_activity": recent})))
}

pub async fn trends(State(state): State<AppState>, who: CurrentUser) -> Result<Json<BookingTrends>, ApiError> {
    require_role(&who, &[Role::Admin])?;
    Ok(Json(dashboard::monthly_trends(&state.db, common::datetime::now()).await?))
}
