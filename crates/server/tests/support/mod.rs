#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::AppState;
use service::auth::token::TokenService;
use service::notify::RecordingEmailSender;

pub const SECRET: &str = "test-secret";
pub const PASSWORD: &str = "Abcd123!";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub mailer: Arc<RecordingEmailSender>,
    pub tokens: TokenService,
}

/// Router over a fresh migrated in-memory database with a recording mailer.
pub async fn spawn_app() -> anyhow::Result<TestApp> {
    let db = models::db::connect_memory().await?;
    let mailer = Arc::new(RecordingEmailSender::default());
    let tokens = TokenService::with_defaults(SECRET);
    let state = AppState::new(db.clone(), tokens.clone(), mailer.clone(), "http://localhost:5173/reset-password");
    let router = server::routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());
    Ok(TestApp { router, db, mailer, tokens })
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(b) => req.header(header::CONTENT_TYPE, "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
            None => req.body(Body::empty())?,
        };
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        Ok((status, value))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> anyhow::Result<(StatusCode, Value)> {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> anyhow::Result<(StatusCode, Value)> {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Sign up and sign in; returns (user id, bearer token).
    pub async fn account(&self, username: &str, role: &str) -> anyhow::Result<(i64, String)> {
        let (status, body) = self
            .post(
                "/api/signup",
                None,
                json!({"username": username, "email": format!("{username}@x.com"), "password": PASSWORD, "user_type": role}),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "signup failed: {status} {body}");
        let (status, body) = self.post("/api/signin", None, json!({"username": username, "password": PASSWORD})).await?;
        anyhow::ensure!(status == StatusCode::OK, "signin failed: {status} {body}");
        let id = body["user"]["id"].as_i64().ok_or_else(|| anyhow::anyhow!("no user id"))?;
        let token = body["token"].as_str().ok_or_else(|| anyhow::anyhow!("no token"))?.to_string();
        Ok((id, token))
    }

    /// Create an artist profile owned by the caller; returns its id.
    pub async fn artist(&self, token: &str, name: &str) -> anyhow::Result<i64> {
        let (status, body) = self.post("/api/artists", Some(token), json!({"name": name, "styles": ["Blackwork"]})).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "artist create failed: {status} {body}");
        body["id"].as_i64().ok_or_else(|| anyhow::anyhow!("no artist id"))
    }
}

pub fn booking_body(artist_id: i64, appointment: &str) -> Value {
    json!({
        "tattoo_style": "traditional",
        "tattoo_size": "small",
        "placement": "forearm",
        "artist_id": artist_id,
        "studio_location": "Main St",
        "appointment_date": appointment,
        "price": 150.0,
        "name": "Kim Lee",
        "phone_number": "555-0100",
        "call_or_text_preference": "text"
    })
}
