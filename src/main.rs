use actix_web::{App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aurum::config::{database, Config};
use aurum::AppServices;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aurum=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Aurum jewelry store backend");
    tracing::info!("Environment: {}", config.app.env);

    // Create database pool and apply schema
    let pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");
    database::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Database ready at {}", config.database.url);

    let services = AppServices::new(pool);

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(|cfg| services.configure(cfg))
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
