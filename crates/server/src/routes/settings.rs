use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{Map, Value};

use models::user::Role;
use service::access::require_role;
use service::settings;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SettingInput {
    pub value: Option<Value>,
}

fn keyed(key: String, value: bool, message: Option<&str>) -> Value {
    let mut body = Map::new();
    if let Some(m) = message {
        body.insert("message".into(), Value::from(m));
    }
    body.insert(key, Value::Bool(value));
    Value::Object(body)
}

/// `{"<key>": bool}`, creating the setting as false on first read.
pub async fn get(State(state): State<AppState>, ApiPath(key): ApiPath<String>) -> Result<Json<Value>, ApiError> {
    let value = settings::get_or_create(&state.db, &key).await?;
    Ok(Json(keyed(key, value, None)))
}

pub async fn update(
    State(state): State<AppState>,
    who: CurrentUser,
    ApiPath(key): ApiPath<String>,
    ApiJson(input): ApiJson<SettingInput>,
) -> Result<Json<Value>, ApiError> {
    require_role(&who, &[Role::Admin])?;
    let value = settings::set(&state.db, &key, input.value.as_ref()).await?;
    Ok(Json(keyed(key, value, Some("Setting updated successfully."))))
}
