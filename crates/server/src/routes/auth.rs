use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use common::types::Message;
use service::access::Identity;
use service::auth::domain::{PasswordResetInput, PasswordResetRequest, SigninInput, SignupInput};

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Routes reachable without a bearer token. `{}` matches one path segment.
const PUBLIC_ROUTES: &[(&str, &str)] = &[
    ("POST", "/api/signup"),
    ("POST", "/api/signin"),
    ("POST", "/api/request-password-reset"),
    ("POST", "/api/reset-password"),
    ("GET", "/api/artists"),
    ("GET", "/api/artists/search"),
    ("GET", "/api/artists/{}"),
    ("GET", "/api/artists/{}/bookings"),
    ("GET", "/api/artists/{}/reviews"),
    ("POST", "/api/artists/{}/reviews"),
    ("GET", "/api/artists/{}/gallery"),
    ("GET", "/api/bookings"),
    ("POST", "/api/bookings"),
    ("GET", "/api/bookings/search"),
    ("GET", "/api/bookings/{}"),
    ("PATCH", "/api/bookings/{}"),
    ("DELETE", "/api/bookings/{}"),
    ("GET", "/api/piercings"),
    ("POST", "/api/piercings"),
    ("GET", "/api/piercings/search"),
    ("GET", "/api/piercings/{}"),
    ("PATCH", "/api/piercings/{}"),
    ("DELETE", "/api/piercings/{}"),
    ("GET", "/api/galleries"),
    ("POST", "/api/inquiries"),
    ("GET", "/api/newsletters"),
    ("POST", "/api/newsletters"),
    ("DELETE", "/api/newsletters/{}"),
    ("POST", "/api/subscribe"),
    ("GET", "/api/subscribers"),
    ("DELETE", "/api/unsubscribe"),
    ("GET", "/api/global-settings/{}"),
];

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut want = pattern.split('/');
    let mut got = path.trim_end_matches('/').split('/');
    loop {
        match (want.next(), got.next()) {
            (None, None) => return true,
            (Some("{}"), Some(seg)) if !seg.is_empty() => continue,
            (Some(w), Some(g)) if w == g => continue,
            _ => return false,
        }
    }
}

/// Everything outside `/api/` (health, metrics, docs) is public, as is the allowlist.
pub fn is_public(method: &Method, path: &str) -> bool {
    if !path.starts_with("/api/") {
        return true;
    }
    PUBLIC_ROUTES.iter().any(|(m, p)| *m == method.as_str() && pattern_matches(p, path))
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Global gate: preflight gets an empty 204, public routes pass, everything else needs
/// a valid bearer token whose identity is attached to the request.
pub async fn require_bearer_token(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if *req.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    if is_public(req.method(), req.uri().path()) {
        return next.run(req).await;
    }

    let Some(token) = bearer(req.headers()) else {
        warn!(path = %req.uri().path(), "missing bearer token");
        return ApiError::Unauthorized("Token is missing".into()).into_response();
    };
    match state.tokens.verify(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(Identity::from(claims));
            next.run(req).await
        }
        Err(e) => {
            warn!(path = %req.uri().path(), error = %e, "token rejected");
            ApiError::Unauthorized(e.to_string()).into_response()
        }
    }
}

#[utoipa::path(post, path = "/api/signup", tag = "auth", request_body = crate::openapi::SignupRequest, responses((status = 201, description = "Created", body = crate::openapi::SignupResponse), (status = 400, description = "Validation error or duplicate", body = crate::openapi::ErrorBody)))]
pub async fn signup(State(state): State<AppState>, ApiJson(input): ApiJson<SignupInput>) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = state.auth.signup(input).await?;
    Ok((StatusCode::CREATED, Json(json!({"message": "User created successfully!", "user": user}))))
}

#[utoipa::path(post, path = "/api/signin", tag = "auth", request_body = crate::openapi::SigninRequest, responses((status = 200, description = "Signed in", body = crate::openapi::SigninResponse), (status = 401, description = "Bad credentials", body = crate::openapi::ErrorBody)))]
pub async fn signin(State(state): State<AppState>, ApiJson(input): ApiJson<SigninInput>) -> Result<Json<Value>, ApiError> {
    let session = state.auth.signin(input).await?;
    Ok(Json(json!({"message": "Sign-in successful!", "token": session.token, "user": session.user})))
}

#[utoipa::path(post, path = "/api/request-password-reset", tag = "auth", request_body = crate::openapi::ResetRequest, responses((status = 200, description = "Email sent", body = crate::openapi::MessageBody), (status = 404, description = "Unknown email", body = crate::openapi::ErrorBody), (status = 500, description = "Email failed", body = crate::openapi::ErrorBody)))]
pub async fn request_password_reset(State(state): State<AppState>, ApiJson(input): ApiJson<PasswordResetRequest>) -> Result<Json<Message>, ApiError> {
    state.auth.request_password_reset(input).await?;
    Ok(Json(Message::new("Password reset email sent successfully.")))
}

#[utoipa::path(post, path = "/api/reset-password", tag = "auth", request_body = crate::openapi::ResetPasswordRequest, responses((status = 200, description = "Password changed", body = crate::openapi::MessageBody), (status = 400, description = "Invalid or expired token", body = crate::openapi::ErrorBody)))]
pub async fn reset_password(State(state): State<AppState>, ApiJson(input): ApiJson<PasswordResetInput>) -> Result<Json<Message>, ApiError> {
    state.auth.reset_password(input).await?;
    Ok(Json(Message::new("Password reset successfully.")))
}
