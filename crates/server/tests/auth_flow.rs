mod support;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use models::user::Role;
use serde_json::json;

use support::{spawn_app, PASSWORD};

#[tokio::test]
async fn signup_hides_password_hash() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, body) = app
        .post("/api/signup", None, json!({"username": "amy", "email": "amy@x.com", "password": PASSWORD, "user_type": "artist"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully!");
    assert_eq!(body["user"]["username"], "amy");
    assert_eq!(body["user"]["role"], "artist");
    assert!(body["user"].get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn signup_rejects_weak_password_and_duplicates() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, _) = app
        .post("/api/signup", None, json!({"username": "amy", "email": "amy@x.com", "password": "abc", "user_type": "artist"}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.account("amy", "artist").await?;
    let (status, _) = app
        .post("/api/signup", None, json!({"username": "amy", "email": "other@x.com", "password": PASSWORD, "user_type": "artist"}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn signin_with_wrong_password_is_unauthorized() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    app.account("amy", "artist").await?;
    let (status, body) = app.post("/api/signin", None, json!({"username": "amy", "password": "Wrong123!"})).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password.");
    Ok(())
}

#[tokio::test]
async fn signin_records_last_login() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    app.account("amy", "artist").await?;
    let (status, body) = app.post("/api/signin", None, json!({"username": "amy", "password": PASSWORD})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sign-in successful!");
    assert!(body["user"]["last_login"].is_string());
    Ok(())
}

#[tokio::test]
async fn gate_rejects_missing_and_bad_tokens() -> anyhow::Result<()> {
    let app = spawn_app().await?;

    let (status, body) = app.get("/api/admin-dashboard", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token is missing");

    let (status, body) = app.get("/api/admin-dashboard", Some("not-a-jwt")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");

    let (id, _) = app.account("amy", "admin").await?;
    let stale = app.tokens.issue_at(id as i32, "amy", Role::Admin, Utc::now() - Duration::hours(7))?;
    let (status, body) = app.get("/api/admin-dashboard", Some(&stale)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token has expired");
    Ok(())
}

#[tokio::test]
async fn public_reads_need_no_token() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, body) = app.get("/api/artists", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 0);

    let (status, _) = app.get("/api/galleries", None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn preflight_short_circuits() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, _) = app.send(Method::OPTIONS, "/api/admin-dashboard", None, None).await?;
    assert!(status.is_success());
    Ok(())
}

#[tokio::test]
async fn password_reset_via_mailed_link() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    app.account("amy", "artist").await?;

    let (status, body) = app.post("/api/request-password-reset", None, json!({"email": "amy@x.com"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset email sent successfully.");

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "amy@x.com");
    let token = sent[0]
        .text
        .split("?token=")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .ok_or_else(|| anyhow::anyhow!("no reset link in mail"))?
        .to_string();

    let (status, body) = app.post("/api/reset-password", None, json!({"token": token, "new_password": "Newpass1!"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset successfully.");

    let (status, _) = app.post("/api/signin", None, json!({"username": "amy", "password": PASSWORD})).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.post("/api/signin", None, json!({"username": "amy", "password": "Newpass1!"})).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn password_reset_for_unknown_email_is_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, _) = app.post("/api/request-password-reset", None, json!({"email": "ghost@x.com"})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.mailer.sent().is_empty());
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_served() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, body) = app.get("/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.get("/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/signin").is_some());
    Ok(())
}
