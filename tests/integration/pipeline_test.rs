//! Integration tests for the request pipeline: session resolution, flash
//! relay, fallback and error rendering.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use wanderlust_database::repositories::SessionBackend;

#[tokio::test]
async fn test_unknown_path_renders_not_found() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let response = client.get("/nonexistent").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Page Not Found !!!"));
    assert!(response.body.contains("<nav class=\"navbar\">"));
}

#[tokio::test]
async fn test_unsupported_method_renders_not_found() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let response = client.request("PATCH", "/listings", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Page Not Found !!!"));

    let response = client.get("/listings/abc/reviews").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_route_groups_are_reachable() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let listings = client.get("/listings").await;
    assert_eq!(listings.status, StatusCode::OK);
    assert!(listings.body.contains("All Listings"));

    let login = client.get("/login").await;
    assert_eq!(login.status, StatusCode::OK);

    // Review group shares the /listings prefix with the listing group.
    let review = client
        .post("/listings/abc/reviews", &[("rating", "5"), ("comment", "Lovely")])
        .await;
    assert_eq!(review.status, StatusCode::SEE_OTHER);
    assert_eq!(review.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_trailing_slash_reaches_the_same_route() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let listings = client.get("/listings/").await;
    assert_eq!(listings.status, StatusCode::OK);
    assert!(listings.body.contains("All Listings"));

    let login = client.get("/login/").await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_error_signal_renders_default_message() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let response = client.get("/test/boom").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Something Went Wrong..."));
}

#[tokio::test]
async fn test_error_signal_keeps_status_and_message() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let response = client.get("/test/teapot").await;

    assert_eq!(response.status, StatusCode::IM_A_TEAPOT);
    assert!(response.body.contains("Short and stout"));
    assert!(response.body.contains("418"));
}

#[tokio::test]
async fn test_panic_is_rendered_as_server_error() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let response = client.get("/test/panic").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Something Went Wrong..."));
    assert!(!response.body.contains("handler blew up"));

    // The application keeps serving afterwards.
    assert_eq!(client.get("/listings").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_flash_shown_exactly_once() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let redirect = client.get("/test/flash").await;
    assert_eq!(redirect.status, StatusCode::SEE_OTHER);
    assert_eq!(redirect.location.as_deref(), Some("/listings"));

    let first = client.get("/listings").await;
    assert!(first.body.contains(r#"<div class="alert alert-success" role="alert">Saved</div>"#));

    let second = client.get("/listings").await;
    assert!(!second.body.contains("Saved"));
}

#[tokio::test]
async fn test_flash_survives_error_page() {
    let app = helpers::TestApp::new();
    let client = app.client();

    client.get("/test/flash").await;
    let page = client.get("/nonexistent").await;

    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("Saved"));
}

#[tokio::test]
async fn test_session_persists_across_requests() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let first = client.get("/test/session-id").await;
    assert!(first.set_cookie.is_some(), "new session must set a cookie");

    let second = client.get("/test/session-id").await;
    assert_eq!(first.body, second.body);
    assert!(second.set_cookie.is_none(), "unchanged session keeps its cookie");

    assert_eq!(app.db.session_count(), 1);
}

#[tokio::test]
async fn test_new_client_gets_new_session() {
    let app = helpers::TestApp::new();

    let a = app.client().get("/test/session-id").await;
    let b = app.client().get("/test/session-id").await;

    assert_ne!(a.body, b.body);
}

#[tokio::test]
async fn test_tampered_cookie_starts_new_session() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let original = client.get("/test/session-id").await;
    let value = client.cookie().expect("cookie issued");

    client.set_cookie(Some(format!("x{value}")));
    let tampered = client.get("/test/session-id").await;

    assert_ne!(original.body, tampered.body);
    assert!(tampered.set_cookie.is_some());
}

#[tokio::test]
async fn test_expired_session_is_replaced() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let original = client.get("/test/session-id").await;
    let old_id = original.body.clone();

    let mut record = app
        .db
        .load(&old_id)
        .await
        .expect("load")
        .expect("session persisted");
    record.expires_at = Utc::now() - Duration::minutes(1);
    app.db.save(&record).await.expect("save");

    let renewed = client.get("/test/session-id").await;

    assert_ne!(renewed.body, old_id);
    assert!(renewed.set_cookie.is_some());
    assert!(app.db.load(&old_id).await.expect("load").is_none());
}

#[tokio::test]
async fn test_static_assets_bypass_sessions() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let response = client.get("/public/css/style.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookie.is_none());
    assert_eq!(app.db.session_count(), 0);
}
