//! The caller's identity as established by the auth middleware.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

use crate::error::{AppError, AuthError};

/// Result of successful token verification. Lives only in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user_id: i64,
    pub email: String,
}

/// Handlers take this as an argument to read the identity the middleware
/// attached; a request that bypassed the middleware is rejected.
impl FromRequest for AuthenticatedIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedIdentity>()
                .cloned()
                .ok_or(AppError::AuthError(AuthError::Unauthenticated)),
        )
    }
}
