use std::sync::Arc;

use tracing::{error, info, warn};
use validator::ValidateEmail;

use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenService;
use crate::db::models::NewUser;
use crate::db::store::UserStore;
use crate::error::{AppError, AuthError, DatabaseError};

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub token: String,
    pub user_id: i64,
}

/// Registration and login. Each call is independent; the service keeps no
/// per-user state.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    // Verified against when the email is unknown so both login failures cost
    // the same.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenService>,
    ) -> Result<Self, AppError> {
        let dummy_hash = hasher.hash("taskbox-unknown-user")?;
        Ok(Self {
            users,
            hasher,
            tokens,
            dummy_hash,
        })
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Registration, AppError> {
        let result = self.try_register(email, password).await;
        if let Err(e) = &result {
            error!(email = %email, error = %e, "Registration failed");
        }
        result
    }

    async fn try_register(&self, email: &str, password: &str) -> Result<Registration, AppError> {
        if !email.to_string().validate_email() {
            return Err(AppError::ValidationError("Invalid email address".to_string()));
        }
        if password.is_empty() {
            return Err(AppError::ValidationError("Password must not be empty".to_string()));
        }

        let password_hash = self.hash_blocking(password).await?;

        let user = self
            .users
            .create_user(NewUser {
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::Duplicate(message) => AppError::AuthError(AuthError::DuplicateEmail(message)),
                other => AppError::DatabaseError(other),
            })?;

        let token = self.tokens.issue(user.id, &user.email)?;
        info!(user_id = user.id, "User registered successfully");

        Ok(Registration {
            token,
            user_id: user.id,
        })
    }

    /// Returns a fresh token. Unknown email and wrong password are the same
    /// error.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self.users.get_user_by_email(email).await?;

        let (stored_hash, user) = match user {
            Some(user) => (user.password_hash.clone(), Some(user)),
            None => (self.dummy_hash.clone(), None),
        };

        let matches = self.verify_blocking(password, stored_hash).await?;

        match user {
            Some(user) if matches => {
                info!(user_id = user.id, "User logged in successfully");
                Ok(self.tokens.issue(user.id, &user.email)?)
            }
            Some(user) => {
                warn!(email = %email, user_id = user.id, "Login failed: invalid password");
                Err(AuthError::InvalidCredentials.into())
            }
            None => {
                warn!(email = %email, "Login failed: user not found");
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }

    async fn hash_blocking(&self, password: &str) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::InternalError(format!("Hashing task failed: {e}")))?
    }

    async fn verify_blocking(&self, password: &str, hash: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::InternalError(format!("Verification task failed: {e}")))
    }
}
