//! Bearer-token gate in front of every protected route.

use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage, ResponseError};
use futures::future::{ok, LocalBoxFuture, Ready};
use tracing::warn;

use crate::auth::identity::AuthenticatedIdentity;
use crate::auth::token::TokenService;
use crate::error::{AppError, AuthError};
use crate::routes::{access_for, Access};

/// Wraps an app so that protected routes only run with a valid token in
/// `Authorization: Bearer <token>`. The verified identity is inserted into the
/// request extensions for [`AuthenticatedIdentity`] to extract.
#[derive(Clone)]
pub struct Authentication {
    tokens: Arc<TokenService>,
}

impl Authentication {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware {
            service,
            tokens: self.tokens.clone(),
        })
    }
}

pub struct AuthenticationMiddleware<S> {
    service: S,
    tokens: Arc<TokenService>,
}

/// Pulls the token out of an `Authorization: Bearer` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

impl<S> AuthenticationMiddleware<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<AuthenticatedIdentity, AppError> {
        let Some(header) = req.headers().get(AUTHORIZATION) else {
            warn!(method = %req.method(), path = req.path(), "Missing authorization header");
            return Err(AuthError::Unauthenticated.into());
        };

        let token = header.to_str().ok().and_then(bearer_token).ok_or_else(|| {
            warn!(method = %req.method(), path = req.path(), "Malformed authorization header");
            AppError::from(AuthError::Unauthenticated)
        })?;

        self.tokens.verify(token).map_err(|e| {
            warn!(method = %req.method(), path = req.path(), error = %e, "Token rejected");
            AppError::from(AuthError::Unauthenticated)
        })
    }
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if access_for(req.method(), req.path()) == Access::Protected {
            match self.authenticate(&req) {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                }
                Err(e) => {
                    let response = e.error_response().map_into_right_body();
                    let (request, _payload) = req.into_parts();
                    return Box::pin(async move { Ok(ServiceResponse::new(request, response)) });
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}
