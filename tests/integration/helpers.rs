//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum_extra::extract::cookie::Cookie;
use tower::ServiceExt;

use wanderlust_api::extractors::SessionHandle;
use wanderlust_api::router::{Mount, default_mounts};
use wanderlust_api::state::Repositories;
use wanderlust_api::{App, AppState, ErrorSignal, build_app_with};
use wanderlust_auth::LoggingObserver;
use wanderlust_core::config::AppConfig;
use wanderlust_database::MemoryDatabase;
use wanderlust_entity::flash::FlashCategory;
use wanderlust_entity::user::User;

/// Test application context
pub struct TestApp {
    /// The complete application, method override included
    pub app: App,
    /// Shared state, for direct access to the store and repositories
    pub state: AppState,
    /// Backing storage
    pub db: Arc<MemoryDatabase>,
}

impl TestApp {
    /// The application with its default route groups plus the `/test` routes.
    pub fn new() -> Self {
        Self::with_config(AppConfig::for_testing())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let db = Arc::new(MemoryDatabase::new());
        let state = AppState::new(
            config,
            Repositories::in_memory(Arc::clone(&db)),
            Arc::new(LoggingObserver),
        )
        .expect("Failed to build state");

        let mut mounts = default_mounts();
        mounts.push(Mount::new("/test", test_only_routes()));

        Self {
            app: build_app_with(state.clone(), mounts),
            state,
            db,
        }
    }

    /// A browser-like client keeping the session cookie between requests.
    pub fn client(&self) -> TestClient {
        TestClient {
            app: self.app.clone(),
            cookie_name: self.state.config.session.cookie_name.clone(),
            cookie: Arc::new(Mutex::new(None)),
        }
    }

    /// Register a user directly through the auth service.
    pub async fn create_user(&self, username: &str, password: &str) -> User {
        self.state
            .auth
            .register(username, &format!("{username}@test.com"), password)
            .await
            .expect("Failed to create test user")
    }
}

/// Routes used only by the tests to reach the pipeline from inside a handler.
fn test_only_routes() -> Router<AppState> {
    Router::new()
        .route("/session-id", get(session_id))
        .route("/flash", get(flash))
        .route("/boom", get(boom))
        .route("/teapot", get(teapot))
        .route("/panic", get(panics))
}

async fn session_id(session: SessionHandle) -> String {
    session.lock().await.id().to_string()
}

async fn flash(session: SessionHandle) -> Response {
    session
        .lock()
        .await
        .push_flash(FlashCategory::Success, "Saved");
    Redirect::to("/listings").into_response()
}

async fn boom() -> Result<String, ErrorSignal> {
    Err(ErrorSignal::default())
}

async fn teapot() -> Result<String, ErrorSignal> {
    Err(ErrorSignal::new(StatusCode::IM_A_TEAPOT, "Short and stout"))
}

async fn panics() -> String {
    panic!("handler blew up")
}

/// Client that replays the session cookie like a browser would.
#[derive(Clone)]
pub struct TestClient {
    app: App,
    cookie_name: String,
    cookie: Arc<Mutex<Option<String>>>,
}

impl TestClient {
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        self.request("POST", path, Some(form)).await
    }

    /// Log in through the login form; panics unless redirected away from it.
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let response = self
            .post("/login", &[("username", username), ("password", password)])
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_ne!(response.location.as_deref(), Some("/login"), "Login failed");
        response
    }

    /// The cookie value currently held, if any.
    pub fn cookie(&self) -> Option<String> {
        self.cookie.lock().expect("cookie lock").clone()
    }

    pub fn set_cookie(&self, value: Option<String>) {
        *self.cookie.lock().expect("cookie lock") = value;
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        form: Option<&[(&str, &str)]>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(value) = self.cookie() {
            req = req.header(header::COOKIE, format!("{}={}", self.cookie_name, value));
        }

        let body = match form {
            Some(fields) => {
                req = req.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(serde_urlencoded::to_string(fields).expect("Failed to encode form"))
            }
            None => Body::empty(),
        };

        let req = req.body(body).expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let issued = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|raw| cookie_value(raw, &self.cookie_name));
        if let Some(value) = &issued {
            self.set_cookie(Some(value.clone()));
        }

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            location,
            set_cookie: issued,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    /// Value of the session cookie set by this response
    pub set_cookie: Option<String>,
    pub body: String,
}

/// Value of the cookie `name` from one `Set-Cookie` header.
fn cookie_value(raw: &str, name: &str) -> Option<String> {
    let cookie = Cookie::parse(raw).ok()?;
    (cookie.name() == name).then(|| cookie.value().to_string())
}
