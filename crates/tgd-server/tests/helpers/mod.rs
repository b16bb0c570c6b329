//! Test helpers for TGD server integration tests
//!
//! Requests go straight through the router with `tower::ServiceExt::oneshot`;
//! no socket is bound.

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use tgd_server::{api, config::Config, db};

/// Router backed by a real database
pub fn app(pool: PgPool) -> Router {
    api::router(pool, &Config::default())
}

/// Router whose pool never connects; good for requests refused before any query
pub fn offline_app() -> Router {
    let mut config = Config::default();
    config.database.url = "postgresql://localhost:1/unreachable".to_string();
    config.database.connect_timeout_secs = 1;

    let pool = db::create_lazy_pool(&config.database).expect("lazy pool");
    api::router(pool, &config)
}

/// Captured response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is UTF-8")
    }

    pub fn header(&self, name: header::HeaderName) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// Builder for one API call
pub struct Call {
    builder: axum::http::request::Builder,
    body: Body,
}

impl Call {
    pub fn new(method: Method, uri: &str) -> Self {
        Self {
            builder: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    pub fn json(mut self, value: Value) -> Self {
        self.builder = self
            .builder
            .header(header::CONTENT_TYPE, "application/json");
        self.body = Body::from(value.to_string());
        self
    }

    /// Bearer token plus CSRF header
    pub fn session(mut self, session: &Session) -> Self {
        self.builder = self
            .builder
            .header(header::AUTHORIZATION, format!("Bearer {}", session.token))
            .header("x-csrf-token", &session.csrf_token);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    pub async fn send(self, app: &Router) -> TestResponse {
        let request = self.builder.body(self.body).expect("valid request");
        let response = app.clone().oneshot(request).await.expect("infallible service");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Credentials returned by a successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub token: String,
    pub csrf_token: String,
}

pub const PASSWORD: &str = "correct horse battery staple";

/// Register `username` and log in through the API
pub async fn register_and_login(app: &Router, username: &str) -> Session {
    let registered = Call::post("/api/v1/users")
        .json(serde_json::json!({
            "username": username,
            "password": PASSWORD,
            "password_confirmation": PASSWORD,
        }))
        .send(app)
        .await;
    assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.text());

    let login = Call::post("/api/v1/sessions")
        .json(serde_json::json!({ "username": username, "password": PASSWORD }))
        .send(app)
        .await;
    assert_eq!(login.status, StatusCode::CREATED, "{}", login.text());

    let data = &login.json()["data"];
    Session {
        user_id: data["user_id"].as_i64().expect("user_id"),
        token: data["token"].as_str().expect("token").to_string(),
        csrf_token: data["csrf_token"].as_str().expect("csrf_token").to_string(),
    }
}

/// Create a dataset as `session` and return its id
pub async fn create_dataset(app: &Router, session: &Session, title: &str) -> i64 {
    let response = Call::post("/api/v1/datasets")
        .session(session)
        .json(serde_json::json!({ "title": title, "description": "", "tag_ids": [] }))
        .send(app)
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
    response.json()["data"]["id"].as_i64().expect("dataset id")
}
