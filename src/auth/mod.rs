//! Authentication module for the task server
//!
//! This module handles password hashing, token issuance and verification,
//! registration and login, and the middleware guarding protected routes.

pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use identity::AuthenticatedIdentity;
pub use middleware::Authentication;
pub use password::PasswordHasher;
pub use service::{AuthService, Registration};
pub use token::TokenService;
