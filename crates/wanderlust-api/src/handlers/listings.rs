//! Listing handlers, mounted under `/listings`.

use axum::extract::{Path, State};
use axum::response::Response;
use tracing::info;
use uuid::Uuid;

use wanderlust_core::result::AppResult;
use wanderlust_entity::flash::FlashCategory;
use wanderlust_entity::listing::Listing;
use wanderlust_entity::user::User;

use super::{flash_redirect, parse_id};
use crate::dto::request::ListingForm;
use crate::error::ErrorSignal;
use crate::extractors::{LoggedIn, RequestContext, SessionHandle, ValidatedForm};
use crate::state::AppState;
use crate::views;

pub const LISTING_MISSING: &str = "Listing you requested for does not exist!";
pub const NOT_OWNER: &str = "You are not the owner of this listing";

/// GET /listings
pub async fn index(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, ErrorSignal> {
    let listings = state.listings.find_all().await?;
    Ok(views::listings::index(&ctx, &listings))
}

/// GET /listings/new
pub async fn new_form(_user: LoggedIn, ctx: RequestContext) -> Response {
    views::listings::new_form(&ctx)
}

/// POST /listings
pub async fn create(
    State(state): State<AppState>,
    LoggedIn(user): LoggedIn,
    session: SessionHandle,
    ValidatedForm(form): ValidatedForm<ListingForm>,
) -> Result<Response, ErrorSignal> {
    let listing = state.listings.create(form.into_create(user.id)).await?;
    info!(listing_id = %listing.id, owner_id = %user.id, "Listing created");
    Ok(flash_redirect(&session, FlashCategory::Success, "New Listing Created!", "/listings").await)
}

/// GET /listings/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: SessionHandle,
    ctx: RequestContext,
) -> Result<Response, ErrorSignal> {
    let Some(listing) = find_listing(&state, &id).await? else {
        return Ok(missing(&session).await);
    };
    let reviews = state.reviews.find_by_listing(listing.id).await?;
    Ok(views::listings::show(&ctx, &listing, &reviews))
}

/// GET /listings/{id}/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    LoggedIn(user): LoggedIn,
    session: SessionHandle,
    ctx: RequestContext,
) -> Result<Response, ErrorSignal> {
    match owned_listing(&state, &id, &user).await? {
        Ok(listing) => Ok(views::listings::edit_form(&ctx, &listing)),
        Err(denied) => Ok(denied.redirect(&session).await),
    }
}

/// PUT /listings/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    LoggedIn(user): LoggedIn,
    session: SessionHandle,
    ValidatedForm(form): ValidatedForm<ListingForm>,
) -> Result<Response, ErrorSignal> {
    let listing = match owned_listing(&state, &id, &user).await? {
        Ok(listing) => listing,
        Err(denied) => return Ok(denied.redirect(&session).await),
    };

    if state.listings.update(listing.id, form.into_update()).await?.is_none() {
        return Ok(missing(&session).await);
    }

    info!(listing_id = %listing.id, "Listing updated");
    let target = format!("/listings/{}", listing.id);
    Ok(flash_redirect(&session, FlashCategory::Success, "Listing Updated!", &target).await)
}

/// DELETE /listings/{id}
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    LoggedIn(user): LoggedIn,
    session: SessionHandle,
) -> Result<Response, ErrorSignal> {
    let listing = match owned_listing(&state, &id, &user).await? {
        Ok(listing) => listing,
        Err(denied) => return Ok(denied.redirect(&session).await),
    };

    state.listings.delete(listing.id).await?;
    info!(listing_id = %listing.id, "Listing deleted");
    Ok(flash_redirect(&session, FlashCategory::Success, "Listing Deleted!", "/listings").await)
}

pub(crate) async fn find_listing(state: &AppState, raw_id: &str) -> AppResult<Option<Listing>> {
    match parse_id(raw_id) {
        Some(id) => state.listings.find_by_id(id).await,
        None => Ok(None),
    }
}

pub(crate) async fn missing(session: &SessionHandle) -> Response {
    flash_redirect(session, FlashCategory::Error, LISTING_MISSING, "/listings").await
}

/// Why a user may not modify a listing.
enum Denied {
    Missing,
    NotOwner(Uuid),
}

impl Denied {
    async fn redirect(self, session: &SessionHandle) -> Response {
        match self {
            Self::Missing => missing(session).await,
            Self::NotOwner(id) => {
                let target = format!("/listings/{id}");
                flash_redirect(session, FlashCategory::Error, NOT_OWNER, &target).await
            }
        }
    }
}

async fn owned_listing(
    state: &AppState,
    raw_id: &str,
    user: &User,
) -> AppResult<Result<Listing, Denied>> {
    Ok(match find_listing(state, raw_id).await? {
        None => Err(Denied::Missing),
        Some(listing) if listing.is_owned_by(user.id) => Ok(listing),
        Some(listing) => Err(Denied::NotOwner(listing.id)),
    })
}
