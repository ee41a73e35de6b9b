use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::AppState;

/// Body of `/register` and `/login`. Only lives for the duration of the call.
#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterData {
    pub token: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
}

pub async fn register(
    req: web::Json<Credentials>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for email: {}", req.email);

    let registration = state.auth_service.register(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "",
        RegisterData {
            token: registration.token,
            id: registration.user_id,
        },
    )))
}

pub async fn login(
    req: web::Json<Credentials>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);

    let token = state.auth_service.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(LoginData { token })))
}
