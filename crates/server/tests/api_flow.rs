mod support;

use axum::http::StatusCode;
use serde_json::json;

use support::{booking_body, spawn_app};

const FUTURE: &str = "Thursday, April 04, 2030 05:00 PM";
const PAST: &str = "Monday, January 01, 2001 10:00 AM";

#[tokio::test]
async fn booking_in_the_past_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (_, token) = app.account("amy", "artist").await?;
    let artist_id = app.artist(&token, "Amy Ink").await?;

    let (status, body) = app.post("/api/bookings", None, booking_body(artist_id, PAST)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app.post("/api/bookings", None, booking_body(artist_id, FUTURE)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["payment_status"], "unpaid");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["appointment_date"], FUTURE);
    Ok(())
}

#[tokio::test]
async fn booking_for_unknown_artist_is_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, _) = app.post("/api/bookings", None, booking_body(999, FUTURE)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn reviews_drive_the_average_rating() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (_, token) = app.account("amy", "artist").await?;
    let artist_id = app.artist(&token, "Amy Ink").await?;
    let uri = format!("/api/artists/{artist_id}/reviews");

    let (status, _) = app.post(&uri, None, json!({"star_rating": 6, "review_text": "wow"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post(&uri, None, json!({"star_rating": 4, "review_text": "solid"})).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.post(&uri, None, json!({"star_rating": "5"})).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, artist) = app.get(&format!("/api/artists/{artist_id}"), None).await?;
    assert_eq!(artist["average_rating"].as_f64(), Some(4.5));

    let (_, page) = app.get(&uri, None).await?;
    assert_eq!(page["total_items"], 2);
    Ok(())
}

#[tokio::test]
async fn deleting_an_artist_removes_their_bookings() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (_, token) = app.account("amy", "artist").await?;
    let artist_id = app.artist(&token, "Amy Ink").await?;
    let (_, booking) = app.post("/api/bookings", None, booking_body(artist_id, FUTURE)).await?;
    let booking_id = booking["id"].as_i64().ok_or_else(|| anyhow::anyhow!("no booking id"))?;

    let (status, body) = app.delete(&format!("/api/artists/{artist_id}"), Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Artist deleted successfully");

    let (status, _) = app.get(&format!("/api/bookings/{booking_id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("/api/artists/{artist_id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn only_owner_or_admin_may_modify_an_artist() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (_, owner) = app.account("amy", "artist").await?;
    let (_, other) = app.account("bob", "artist").await?;
    let (_, admin) = app.account("root", "admin").await?;
    let artist_id = app.artist(&owner, "Amy Ink").await?;
    let uri = format!("/api/artists/{artist_id}");

    let (status, _) = app.patch(&uri, Some(&other), json!({"bio": "hijacked"})).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&uri, Some(&other)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.patch(&uri, Some(&admin), json!({"bio": "Fine line"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bio"], "Fine line");
    Ok(())
}

#[tokio::test]
async fn users_edit_only_themselves_and_only_admins_delete() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (amy_id, amy) = app.account("amy", "artist").await?;
    let (bob_id, _) = app.account("bob", "artist").await?;
    let (_, admin) = app.account("root", "admin").await?;

    let (status, _) = app.patch(&format!("/api/users/{bob_id}"), Some(&amy), json!({"username": "bobby"})).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.patch(&format!("/api/users/{amy_id}"), Some(&amy), json!({"username": "amelia"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully.");
    assert_eq!(body["user"]["username"], "amelia");

    let (status, _) = app.delete(&format!("/api/users/{bob_id}"), Some(&amy)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&format!("/api/users/{bob_id}"), Some(&admin)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn global_setting_defaults_to_false_and_admin_can_flip_it() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, body) = app.get("/api/global-settings/maintenance_mode", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"maintenance_mode": false}));

    let (_, artist) = app.account("amy", "artist").await?;
    let (status, _) = app.patch("/api/global-settings/maintenance_mode", Some(&artist), json!({"value": true})).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, admin) = app.account("root", "admin").await?;
    let (status, body) = app.patch("/api/global-settings/maintenance_mode", Some(&admin), json!({"value": true})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["maintenance_mode"], true);

    let (_, body) = app.get("/api/global-settings/maintenance_mode", None).await?;
    assert_eq!(body["maintenance_mode"], true);
    Ok(())
}

#[tokio::test]
async fn dashboards_enforce_roles() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (_, artist) = app.account("amy", "artist").await?;
    let (_, admin) = app.account("root", "admin").await?;

    let (status, _) = app.get("/api/admin-dashboard", Some(&artist)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.get("/api/artist-dashboard", Some(&admin)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get("/api/artist-dashboard", Some(&artist)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Artist profile not found.");

    app.artist(&artist, "Amy Ink").await?;
    let (status, body) = app.get("/api/artist-dashboard", Some(&artist)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["artist_details"]["name"], "Amy Ink");

    let (status, body) = app.get("/api/admin-dashboard", Some(&admin)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["platform_metrics"]["total_appointments"], 0);

    let (status, body) = app.get("/api/admin-dashboard/bookings-trends", Some(&admin)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monthly_trends"], json!([]));
    Ok(())
}

#[tokio::test]
async fn inquiries_are_public_to_create_and_staff_to_read() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    let (status, _) = app
        .post("/api/inquiries", None, json!({"name": "Kim", "email": "kim@x.com", "phone_number": "555", "inquiry": "Walk-ins?"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.get("/api/inquiries", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, artist) = app.account("amy", "artist").await?;
    let (status, body) = app.get("/api/inquiries", Some(&artist)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 1);
    Ok(())
}

#[tokio::test]
async fn metrics_count_requests_by_route() -> anyhow::Result<()> {
    let app = spawn_app().await?;
    app.get("/api/artists", None).await?;
    let (status, _) = app.get("/metrics", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, text) = server::observability::encode_metrics();
    assert!(text.contains("inkbook_http_requests_total"));
    Ok(())
}
