//! Account handlers, mounted at `/`.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::info;

use wanderlust_core::error::ErrorKind;
use wanderlust_entity::flash::FlashCategory;

use super::flash_redirect;
use crate::dto::request::{LoginForm, SignupForm};
use crate::error::ErrorSignal;
use crate::extractors::{LoggedIn, RequestContext, SessionHandle, ValidatedForm};
use crate::state::AppState;
use crate::views;

const AFTER_LOGIN: &str = "/listings";

/// GET /signup
pub async fn signup_form(ctx: RequestContext) -> Response {
    views::users::signup_form(&ctx)
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    session: SessionHandle,
    ValidatedForm(form): ValidatedForm<SignupForm>,
) -> Result<Response, ErrorSignal> {
    match state
        .auth
        .register(&form.username, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            let mut session = session.lock().await;
            state.auth.login(&mut session, &user);
            session.push_flash(FlashCategory::Success, "Welcome to Wanderlust!");
            Ok(Redirect::to(AFTER_LOGIN).into_response())
        }
        Err(e) if matches!(e.kind, ErrorKind::Conflict | ErrorKind::Validation) => {
            Ok(flash_redirect(&session, FlashCategory::Error, e.message, "/signup").await)
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form(ctx: RequestContext) -> Response {
    views::users::login_form(&ctx)
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    session: SessionHandle,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<Response, ErrorSignal> {
    match state.auth.authenticate(&form.username, &form.password).await {
        Ok(user) => {
            let mut session = session.lock().await;
            let target = session
                .take_redirect_url()
                .filter(|url| is_local_path(url))
                .unwrap_or_else(|| AFTER_LOGIN.to_string());
            state.auth.login(&mut session, &user);
            session.push_flash(FlashCategory::Success, "Welcome back to Wanderlust!");
            Ok(Redirect::to(&target).into_response())
        }
        Err(e) if e.kind == ErrorKind::Authentication => {
            info!(username = %form.username, "Failed login");
            Ok(flash_redirect(&session, FlashCategory::Error, e.message, "/login").await)
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, session: SessionHandle) -> Response {
    let mut session = session.lock().await;
    state.auth.logout(&mut session);
    session.push_flash(FlashCategory::Success, "you are logged out!");
    Redirect::to(AFTER_LOGIN).into_response()
}

/// GET /profile
pub async fn profile(
    State(state): State<AppState>,
    LoggedIn(user): LoggedIn,
    ctx: RequestContext,
) -> Result<Response, ErrorSignal> {
    let listings = state.listings.find_by_owner(user.id).await?;
    Ok(views::users::profile(&ctx, &user, &listings))
}

/// Only same-site paths are valid post-login targets.
fn is_local_path(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local_path() {
        assert!(is_local_path("/listings/new"));
        assert!(!is_local_path("//evil.example"));
        assert!(!is_local_path("https://evil.example"));
    }
}
