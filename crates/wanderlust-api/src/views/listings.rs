//! Listing pages: index, detail with reviews, new and edit forms.

use axum::http::StatusCode;
use axum::response::Response;

use wanderlust_entity::listing::{Listing, Review};

use super::{escape, render};
use crate::pipeline::context::RequestContext;

const PLACEHOLDER_IMAGE: &str = "/public/images/placeholder.svg";

pub fn index(ctx: &RequestContext, listings: &[Listing]) -> Response {
    let cards: String = listings.iter().map(card).collect();
    let body = if listings.is_empty() {
        r#"<h3>All Listings</h3><p class="muted">No listings yet.</p>"#.to_string()
    } else {
        format!(r#"<h3>All Listings</h3><div class="listing-grid">{cards}</div>"#)
    };
    render(ctx, StatusCode::OK, "All Listings", &body)
}

fn card(listing: &Listing) -> String {
    format!(
        r#"<a class="listing-card" href="/listings/{id}">
<img src="{image}" alt="listing image">
<p><b>{title}</b><br>&#8377; {price} / night</p>
</a>"#,
        id = listing.id,
        image = escape(image_of(listing)),
        title = escape(&listing.title),
        price = format_price(listing.price),
    )
}

pub fn show(ctx: &RequestContext, listing: &Listing, reviews: &[Review]) -> Response {
    let owner_controls = if ctx.user_id() == Some(listing.owner_id) {
        format!(
            r#"<div class="owner-controls">
<a class="btn" href="/listings/{id}/edit">Edit</a>
<form method="POST" action="/listings/{id}?_method=DELETE"><button class="btn btn-dark">Delete</button></form>
</div>"#,
            id = listing.id
        )
    } else {
        String::new()
    };

    let review_form = if ctx.is_logged_in() {
        format!(
            r#"<h4>Leave a Review</h4>
<form method="POST" action="/listings/{id}/reviews" class="review-form">
<label for="rating">Rating</label>
<input type="number" id="rating" name="rating" min="1" max="5" value="3" required>
<label for="comment">Comment</label>
<textarea id="comment" name="comment" required></textarea>
<button class="btn">Submit</button>
</form>"#,
            id = listing.id
        )
    } else {
        String::new()
    };

    let review_items: String = reviews
        .iter()
        .map(|review| review_item(ctx, listing, review))
        .collect();

    let body = format!(
        r#"<div class="listing-show">
<h3>{title}</h3>
<img class="show-img" src="{image}" alt="listing image">
<p class="muted">Owned by <i>{owner}</i></p>
<p>{description}</p>
<p>&#8377; {price} / night</p>
<p>{location}, {country}</p>
{owner_controls}
</div>
<hr>
{review_form}
<h4>All Reviews</h4>
<div class="reviews">{review_items}</div>"#,
        title = escape(&listing.title),
        image = escape(image_of(listing)),
        owner = escape(&listing.owner_username),
        description = escape(&listing.description),
        price = format_price(listing.price),
        location = escape(&listing.location),
        country = escape(&listing.country),
    );
    render(ctx, StatusCode::OK, &listing.title, &body)
}

fn review_item(ctx: &RequestContext, listing: &Listing, review: &Review) -> String {
    let delete = if ctx.user_id() == Some(review.author_id) {
        format!(
            r#"<form method="POST" action="/listings/{listing}/reviews/{review}?_method=DELETE"><button class="btn btn-sm btn-dark">Delete</button></form>"#,
            listing = listing.id,
            review = review.id,
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="review-card">
<h5>@{author}</h5>
<p class="rating">{stars}</p>
<p>{comment}</p>
{delete}
</div>"#,
        author = escape(&review.author_username),
        stars = "&#9733;".repeat(review.rating.clamp(0, 5) as usize),
        comment = escape(&review.comment),
    )
}

pub fn new_form(ctx: &RequestContext) -> Response {
    let body = format!(
        r#"<h3>Create a New Listing</h3>
<form method="POST" action="/listings" class="listing-form">
{fields}
<button class="btn">Add</button>
</form>"#,
        fields = listing_fields(None)
    );
    render(ctx, StatusCode::OK, "New Listing", &body)
}

pub fn edit_form(ctx: &RequestContext, listing: &Listing) -> Response {
    let body = format!(
        r#"<h3>Edit your Listing</h3>
<form method="POST" action="/listings/{id}?_method=PUT" class="listing-form">
{fields}
<button class="btn">Edit</button>
</form>"#,
        id = listing.id,
        fields = listing_fields(Some(listing))
    );
    render(ctx, StatusCode::OK, "Edit Listing", &body)
}

fn listing_fields(listing: Option<&Listing>) -> String {
    let value = |pick: fn(&Listing) -> String| listing.map(pick).map(|v| escape(&v)).unwrap_or_default();
    format!(
        r#"<label for="title">Title</label>
<input id="title" name="title" value="{title}" required>
<label for="description">Description</label>
<textarea id="description" name="description" required>{description}</textarea>
<label for="image_url">Image URL</label>
<input id="image_url" name="image_url" value="{image_url}">
<label for="price">Price</label>
<input id="price" name="price" type="number" min="0" value="{price}" required>
<label for="country">Country</label>
<input id="country" name="country" value="{country}" required>
<label for="location">Location</label>
<input id="location" name="location" value="{location}" required>"#,
        title = value(|l| l.title.clone()),
        description = value(|l| l.description.clone()),
        image_url = value(|l| l.image_url.clone().unwrap_or_default()),
        price = value(|l| l.price.to_string()),
        country = value(|l| l.country.clone()),
        location = value(|l| l.location.clone()),
    )
}

fn image_of(listing: &Listing) -> &str {
    listing.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
}

/// Group digits by thousands: `1234567` becomes `1,234,567`.
fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if price < 0 {
        grouped.insert(0, '-');
    }
    grouped
}
