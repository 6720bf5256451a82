use axum::Router;
use axum_helpers::server::{build_router, create_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{InMemoryUserRepository, UserService, handlers as user_handlers};
use tracing::info;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let user_service = UserService::new(InMemoryUserRepository::new());

    // Versioned API surface; build_router nests everything under /api
    let api_routes = Router::new().nest("/v1/users", user_handlers::router(user_service));

    let router = build_router(api_routes);

    info!("Starting commerce API");

    create_app(router, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Commerce API shutdown complete");
    Ok(())
}
