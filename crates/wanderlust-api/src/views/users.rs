//! Account pages: signup, login and profile.

use axum::http::StatusCode;
use axum::response::Response;

use wanderlust_entity::listing::Listing;
use wanderlust_entity::user::User;

use super::{escape, render};
use crate::pipeline::context::RequestContext;

pub fn signup_form(ctx: &RequestContext) -> Response {
    let body = r#"<h3>Sign up on Wanderlust</h3>
<form method="POST" action="/signup" class="auth-form">
<label for="username">Username</label>
<input id="username" name="username" required>
<label for="email">Email</label>
<input id="email" name="email" type="email" required>
<label for="password">Password</label>
<input id="password" name="password" type="password" required>
<button class="btn">Sign up</button>
</form>"#;
    render(ctx, StatusCode::OK, "Sign up", body)
}

pub fn login_form(ctx: &RequestContext) -> Response {
    let body = r#"<h3>Log in</h3>
<form method="POST" action="/login" class="auth-form">
<label for="username">Username</label>
<input id="username" name="username" required>
<label for="password">Password</label>
<input id="password" name="password" type="password" required>
<button class="btn">Log in</button>
</form>"#;
    render(ctx, StatusCode::OK, "Log in", body)
}

pub fn profile(ctx: &RequestContext, user: &User, listings: &[Listing]) -> Response {
    let items: String = listings
        .iter()
        .map(|l| {
            format!(
                r#"<li><a href="/listings/{}">{}</a></li>"#,
                l.id,
                escape(&l.title)
            )
        })
        .collect();

    let body = format!(
        r#"<h3>@{username}</h3>
<p class="muted">{email} &middot; member since {since}</p>
<h4>Your listings ({count})</h4>
<ul class="profile-listings">{items}</ul>"#,
        username = escape(&user.username),
        email = escape(&user.email),
        since = user.created_at.format("%B %Y"),
        count = listings.len(),
    );
    render(ctx, StatusCode::OK, "Profile", &body)
}
