//! Review handlers, mounted under `/listings` next to the listing handlers.

use axum::extract::{Path, State};
use axum::response::Response;
use tracing::info;

use wanderlust_entity::flash::FlashCategory;
use wanderlust_entity::listing::CreateReview;

use super::listings::{find_listing, missing};
use super::{flash_redirect, parse_id};
use crate::dto::request::ReviewForm;
use crate::error::ErrorSignal;
use crate::extractors::{LoggedIn, SessionHandle, ValidatedForm};
use crate::state::AppState;

pub const NOT_AUTHOR: &str = "You are not the author of this review";

/// POST /listings/{id}/reviews
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    LoggedIn(user): LoggedIn,
    session: SessionHandle,
    ValidatedForm(form): ValidatedForm<ReviewForm>,
) -> Result<Response, ErrorSignal> {
    let Some(listing) = find_listing(&state, &id).await? else {
        return Ok(missing(&session).await);
    };

    let review = state
        .reviews
        .create(CreateReview {
            listing_id: listing.id,
            author_id: user.id,
            rating: form.rating,
            comment: form.comment,
        })
        .await?;

    info!(review_id = %review.id, listing_id = %listing.id, "Review created");
    let target = format!("/listings/{}", listing.id);
    Ok(flash_redirect(&session, FlashCategory::Success, "New Review Created!", &target).await)
}

/// DELETE /listings/{id}/reviews/{review_id}
pub async fn destroy(
    State(state): State<AppState>,
    Path((id, review_id)): Path<(String, String)>,
    LoggedIn(user): LoggedIn,
    session: SessionHandle,
) -> Result<Response, ErrorSignal> {
    let Some(listing) = find_listing(&state, &id).await? else {
        return Ok(missing(&session).await);
    };
    let target = format!("/listings/{}", listing.id);

    let review = match parse_id(&review_id) {
        Some(review_id) => state.reviews.find_by_id(review_id).await?,
        None => None,
    };
    let Some(review) = review.filter(|r| r.listing_id == listing.id) else {
        return Ok(flash_redirect(&session, FlashCategory::Error, "Review not found", &target).await);
    };

    if review.author_id != user.id {
        return Ok(flash_redirect(&session, FlashCategory::Error, NOT_AUTHOR, &target).await);
    }

    state.reviews.delete(review.id).await?;
    info!(review_id = %review.id, listing_id = %listing.id, "Review deleted");
    Ok(flash_redirect(&session, FlashCategory::Success, "Review Deleted!", &target).await)
}
