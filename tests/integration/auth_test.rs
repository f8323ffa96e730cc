//! Integration tests for signup, login, logout and the login guard.

mod helpers;

use axum::http::StatusCode;

use wanderlust_database::repositories::SessionBackend;

#[tokio::test]
async fn test_signup_logs_in() {
    let app = helpers::TestApp::new();
    let client = app.client();

    let response = client
        .post(
            "/signup",
            &[
                ("username", "hana"),
                ("email", "hana@test.com"),
                ("password", "password123"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/listings"));

    let listings = client.get("/listings").await;
    assert!(listings.body.contains("Welcome to Wanderlust!"));
    assert!(listings.body.contains("Log out"));

    let profile = client.get("/profile").await;
    assert_eq!(profile.status, StatusCode::OK);
    assert!(profile.body.contains("hana"));
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = helpers::TestApp::new();
    app.create_user("hana", "password123").await;
    let client = app.client();

    let response = client
        .post(
            "/signup",
            &[
                ("username", "hana"),
                ("email", "other@test.com"),
                ("password", "password123"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/signup"));

    let form = client.get("/signup").await;
    assert!(form.body.contains("alert-error"));
    assert_eq!(client.get("/profile").await.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new();
    app.create_user("testuser", "password123").await;
    let client = app.client();

    let response = client.login("testuser", "password123").await;
    assert_eq!(response.location.as_deref(), Some("/listings"));

    let listings = client.get("/listings").await;
    assert!(listings.body.contains("Welcome back to Wanderlust!"));
    assert!(listings.body.contains("testuser"));
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new();
    app.create_user("testuser", "password123").await;
    let client = app.client();

    let response = client
        .post("/login", &[("username", "testuser"), ("password", "wrong")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));

    let form = client.get("/login").await;
    assert!(form.body.contains("Password or username is incorrect"));
}

#[tokio::test]
async fn test_login_nonexistent_user_gets_same_message() {
    let app = helpers::TestApp::new();
    let client = app.client();

    client
        .post("/login", &[("username", "nobody"), ("password", "password123")])
        .await;

    let form = client.get("/login").await;
    assert!(form.body.contains("Password or username is incorrect"));
}

#[tokio::test]
async fn test_login_regenerates_session() {
    let app = helpers::TestApp::new();
    app.create_user("testuser", "password123").await;
    let client = app.client();

    let before = client.get("/test/session-id").await.body;
    client.login("testuser", "password123").await;
    let after = client.get("/test/session-id").await.body;

    assert_ne!(before, after);
    assert!(app.db.load(&before).await.expect("load").is_none());
}

#[tokio::test]
async fn test_logout() {
    let app = helpers::TestApp::new();
    app.create_user("testuser", "password123").await;
    let client = app.client();
    client.login("testuser", "password123").await;

    let response = client.get("/logout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/listings"));

    let listings = client.get("/listings").await;
    assert!(listings.body.contains("you are logged out!"));
    assert!(listings.body.contains("Log in"));

    let profile = client.get("/profile").await;
    assert_eq!(profile.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_login_required_redirects_and_returns() {
    let app = helpers::TestApp::new();
    app.create_user("testuser", "password123").await;
    let client = app.client();

    let guarded = client.get("/listings/new").await;
    assert_eq!(guarded.status, StatusCode::SEE_OTHER);
    assert_eq!(guarded.location.as_deref(), Some("/login"));

    let form = client.get("/login").await;
    assert!(form.body.contains("you must be logged in first!"));

    let response = client.login("testuser", "password123").await;
    assert_eq!(response.location.as_deref(), Some("/listings/new"));

    let new_form = client.get("/listings/new").await;
    assert_eq!(new_form.status, StatusCode::OK);
}

#[tokio::test]
async fn test_redirect_url_not_kept_for_post() {
    let app = helpers::TestApp::new();
    app.create_user("testuser", "password123").await;
    let client = app.client();

    let guarded = client
        .post(
            "/listings",
            &[
                ("title", "Cabin"),
                ("description", "Cosy"),
                ("price", "100"),
                ("location", "Oslo"),
                ("country", "Norway"),
            ],
        )
        .await;
    assert_eq!(guarded.location.as_deref(), Some("/login"));

    let response = client.login("testuser", "password123").await;
    assert_eq!(response.location.as_deref(), Some("/listings"));
}

#[tokio::test]
async fn test_concurrent_invalid_logins_stay_anonymous() {
    let app = helpers::TestApp::new();
    app.create_user("testuser", "password123").await;
    let client = app.client();
    client.get("/listings").await;

    let attempts = (0..5).map(|i| {
        let client = client.clone();
        tokio::spawn(async move {
            let password = format!("wrong-{i}");
            client
                .post("/login", &[("username", "testuser"), ("password", &password)])
                .await
        })
    });

    for attempt in attempts.collect::<Vec<_>>() {
        let response = attempt.await.expect("task");
        assert!(!response.status.is_server_error());
        assert_eq!(response.location.as_deref(), Some("/login"));
    }

    let profile = client.get("/profile").await;
    assert_eq!(profile.location.as_deref(), Some("/login"));
}
