pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod response;
pub mod routes;
pub mod tasks;

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpResponse};
use tracing::info;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthService, PasswordHasher, TokenService};
pub use db::{DbOperations, MemoryStore, TaskStore, UserStore};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Body extractor config whose rejections use the response envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

/// Query-string extractor config whose rejections use the response envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth_service: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
    pub tasks: Arc<dyn TaskStore>,
    db: Option<DbOperations>,
}

impl AppState {
    /// Connects the configured store: `memory://` selects the in-process
    /// store, anything else is treated as a PostgreSQL URL.
    pub async fn new(config: Settings) -> Result<Self> {
        if config.database.is_memory() {
            info!("Using in-memory store");
            let store = Arc::new(MemoryStore::new());
            return Self::with_stores(config, store.clone(), store);
        }

        let db = DbOperations::new_with_options(
            &config.database.url,
            config.database.max_connections,
            Duration::from_secs(config.database.acquire_timeout_secs),
        )
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "Connected to PostgreSQL"
        );

        let store = Arc::new(db.clone());
        let mut state = Self::with_stores(config, store.clone(), store)?;
        state.db = Some(db);
        Ok(state)
    }

    /// Builds the state around caller-supplied stores.
    pub fn with_stores(
        config: Settings,
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
    ) -> Result<Self> {
        let tokens = Arc::new(TokenService::from_config(&config.auth));
        let hasher = PasswordHasher::from_config(&config.auth)?;
        let auth_service = AuthService::new(users, hasher, tokens.clone())?;

        Ok(Self {
            config: Arc::new(config),
            auth_service: Arc::new(auth_service),
            tokens,
            tasks,
            db: None,
        })
    }

    pub async fn shutdown(&self) -> Result<()> {
        if let Some(db) = &self.db {
            db.close().await;
            info!("Database pool closed");
        }
        Ok(())
    }
}
