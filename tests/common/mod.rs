#![allow(dead_code)]

use actix_web::test::TestRequest;
use serde_json::{json, Value};
use taskbox_server::{AppState, Settings};

pub const PASSWORD: &str = "correct horse battery staple";

/// State backed by a fresh in-memory store.
pub async fn test_state() -> AppState {
    let config = Settings::new_for_test().expect("Failed to load test config");
    AppState::new(config).await.expect("Failed to build state")
}

/// Builds the full service the way `main` does, minus CORS and headers.
macro_rules! spawn_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(taskbox_server::auth::Authentication::new($state.tokens.clone()))
                .app_data(actix_web::web::Data::new($state.clone()))
                .app_data(taskbox_server::json_config())
                .app_data(taskbox_server::query_config())
                .configure(taskbox_server::routes::configure),
        )
        .await
    };
}

pub fn register_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/register")
        .set_json(json!({ "email": email, "password": password }))
}

pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email, "password": password }))
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub fn token_of(body: &Value) -> String {
    body["data"]["token"]
        .as_str()
        .expect("response carries a token")
        .to_string()
}
