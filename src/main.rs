use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use taskbox_server::auth::Authentication;
use taskbox_server::config::{CorsConfig, LoggingConfig};
use taskbox_server::{json_config, query_config, routes, AppState, Settings};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    if logging.pretty {
        builder.pretty().init();
    } else {
        builder.init();
    }
}

fn build_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    let cors = if config.allow_any_origin {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
            .allowed_headers(vec!["Authorization", "Content-Type"])
    };

    cors.max_age(config.max_age as usize)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Settings::new().context("Failed to load configuration")?;
    init_tracing(&config.logging);
    info!(environment = %config.environment, "Configuration loaded successfully");

    if config.environment == "production" && config.auth.jwt_secret == "development_secret" {
        warn!("Running in production with the development signing secret");
    }

    let state = AppState::new(config.clone())
        .await
        .context("Failed to initialize application state")?;
    let data = web::Data::new(state.clone());

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&address)
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Starting server at {}", address);

    let tokens = state.tokens.clone();
    let cors_config = config.cors.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Authentication::new(tokens.clone()))
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(build_cors(&cors_config))
            .app_data(data.clone())
            .app_data(json_config())
            .app_data(query_config())
            .configure(routes::configure)
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .context("Server terminated with an error")?;

    state.shutdown().await?;
    info!("Server stopped");

    Ok(())
}
