//! Integration tests for listing and review routes.

mod helpers;

use axum::http::StatusCode;

use wanderlust_database::repositories::{ListingRepository, ReviewRepository};
use wanderlust_entity::listing::Listing;

const CABIN: [(&str, &str); 6] = [
    ("title", "Lakeside Cabin"),
    ("description", "A quiet cabin by the lake"),
    ("image_url", ""),
    ("price", "1500"),
    ("location", "Oslo"),
    ("country", "Norway"),
];

async fn create_cabin(app: &helpers::TestApp, client: &helpers::TestClient) -> Listing {
    let response = client.post("/listings", &CABIN).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/listings"));

    app.state
        .listings
        .find_all()
        .await
        .expect("find_all")
        .into_iter()
        .find(|l| l.title == "Lakeside Cabin")
        .expect("listing created")
}

async fn logged_in(app: &helpers::TestApp, username: &str) -> helpers::TestClient {
    app.create_user(username, "password123").await;
    let client = app.client();
    client.login(username, "password123").await;
    client
}

#[tokio::test]
async fn test_create_and_show_listing() {
    let app = helpers::TestApp::new();
    let client = logged_in(&app, "owner").await;

    let listing = create_cabin(&app, &client).await;
    assert!(listing.image_url.is_none());

    let index = client.get("/listings").await;
    assert!(index.body.contains("New Listing Created!"));
    assert!(index.body.contains("Lakeside Cabin"));

    let show = client.get(&format!("/listings/{}", listing.id)).await;
    assert_eq!(show.status, StatusCode::OK);
    assert!(show.body.contains("A quiet cabin by the lake"));
    assert!(show.body.contains("/public/images/placeholder.svg"));
    assert!(show.body.contains(&format!("/listings/{}/edit", listing.id)));
}

#[tokio::test]
async fn test_create_listing_validation() {
    let app = helpers::TestApp::new();
    let client = logged_in(&app, "owner").await;

    let response = client
        .post(
            "/listings",
            &[
                ("title", ""),
                ("description", "x"),
                ("price", "10"),
                ("location", "Oslo"),
                ("country", "Norway"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("Title is required"));
}

#[tokio::test]
async fn test_unparseable_form_is_client_error() {
    let app = helpers::TestApp::new();
    let client = logged_in(&app, "owner").await;

    let response = client
        .post("/listings", &[("title", "Cabin"), ("price", "cheap")])
        .await;

    assert!(response.status.is_client_error());
    assert!(response.body.contains("error-page"));
}

#[tokio::test]
async fn test_missing_listing_redirects_with_flash() {
    let app = helpers::TestApp::new();
    let client = app.client();

    for path in ["/listings/not-a-uuid", "/listings/00000000-0000-0000-0000-000000000000"] {
        let response = client.get(path).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location.as_deref(), Some("/listings"));

        let index = client.get("/listings").await;
        assert!(index.body.contains("Listing you requested for does not exist!"));
    }
}

#[tokio::test]
async fn test_update_via_method_override() {
    let app = helpers::TestApp::new();
    let client = logged_in(&app, "owner").await;
    let listing = create_cabin(&app, &client).await;

    let mut form = CABIN;
    form[0] = ("title", "Renovated Cabin");
    let response = client
        .post(&format!("/listings/{}?_method=PUT", listing.id), &form)
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location,
        Some(format!("/listings/{}", listing.id))
    );

    let updated = app
        .state
        .listings
        .find_by_id(listing.id)
        .await
        .expect("find")
        .expect("still exists");
    assert_eq!(updated.title, "Renovated Cabin");
}

#[tokio::test]
async fn test_delete_via_method_override() {
    let app = helpers::TestApp::new();
    let client = logged_in(&app, "owner").await;
    let listing = create_cabin(&app, &client).await;

    let response = client
        .post(&format!("/listings/{}?_method=%44elete", listing.id), &[])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let index = client.get("/listings").await;
    assert!(index.body.contains("Listing Deleted!"));
    assert!(
        app.state
            .listings
            .find_by_id(listing.id)
            .await
            .expect("find")
            .is_none()
    );
}

#[tokio::test]
async fn test_non_owner_cannot_edit_or_delete() {
    let app = helpers::TestApp::new();
    let owner = logged_in(&app, "owner").await;
    let listing = create_cabin(&app, &owner).await;

    let intruder = logged_in(&app, "intruder").await;
    let show_path = format!("/listings/{}", listing.id);

    let edit = intruder.get(&format!("{show_path}/edit")).await;
    assert_eq!(edit.location.as_deref(), Some(show_path.as_str()));

    let delete = intruder
        .post(&format!("{show_path}?_method=DELETE"), &[])
        .await;
    assert_eq!(delete.location.as_deref(), Some(show_path.as_str()));

    let show = intruder.get(&show_path).await;
    assert!(show.body.contains("You are not the owner of this listing"));
    assert!(!show.body.contains("/edit\""));

    assert!(
        app.state
            .listings
            .find_by_id(listing.id)
            .await
            .expect("find")
            .is_some()
    );
}

#[tokio::test]
async fn test_review_lifecycle() {
    let app = helpers::TestApp::new();
    let owner = logged_in(&app, "owner").await;
    let listing = create_cabin(&app, &owner).await;
    let show_path = format!("/listings/{}", listing.id);

    let guest = logged_in(&app, "guest").await;
    let created = guest
        .post(
            &format!("{show_path}/reviews"),
            &[("rating", "4"), ("comment", "Great view")],
        )
        .await;
    assert_eq!(created.location.as_deref(), Some(show_path.as_str()));

    let show = guest.get(&show_path).await;
    assert!(show.body.contains("New Review Created!"));
    assert!(show.body.contains("Great view"));

    let review = app
        .state
        .reviews
        .find_by_listing(listing.id)
        .await
        .expect("reviews")
        .pop()
        .expect("review created");
    let review_path = format!("{show_path}/reviews/{}?_method=DELETE", review.id);

    let denied = owner.post(&review_path, &[]).await;
    assert_eq!(denied.location.as_deref(), Some(show_path.as_str()));
    assert!(owner.get(&show_path).await.body.contains("You are not the author of this review"));

    let deleted = guest.post(&review_path, &[]).await;
    assert_eq!(deleted.location.as_deref(), Some(show_path.as_str()));
    assert!(guest.get(&show_path).await.body.contains("Review Deleted!"));
    assert!(
        app.state
            .reviews
            .find_by_id(review.id)
            .await
            .expect("find")
            .is_none()
    );
}

#[tokio::test]
async fn test_review_rating_out_of_range() {
    let app = helpers::TestApp::new();
    let owner = logged_in(&app, "owner").await;
    let listing = create_cabin(&app, &owner).await;

    let response = owner
        .post(
            &format!("/listings/{}/reviews", listing.id),
            &[("rating", "9"), ("comment", "Too good")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("Rating must be between 1 and 5"));
}
