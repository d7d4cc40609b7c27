//! # TinyApp
//!
//! A small URL shortener built with Rust and Actix-web.
//!
//! ## Features
//! - Email/password accounts with signed-cookie sessions
//! - Short URLs owned by the account that created them
//! - Owner-only editing and deletion
//! - Visit counting with per-session unique visitors
//! - Prometheus metrics

mod config;
mod constants;
mod errors;
mod handlers;
mod metrics;
mod models;
mod services;
mod session;
mod store;

#[cfg(test)]
mod test_utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use prometheus::Registry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Load configuration
    let config = config::Config::from_env();

    // In-memory user and URL directories, shared by every worker
    let store = web::Data::new(store::Store::new());

    let session_key = web::Data::new(session::SessionKey::from_config(&config));

    // Metrics are optional; handlers skip recording when they are absent
    let metrics = if config.metrics_enabled {
        let registry = Registry::new();
        match metrics::AppMetrics::new(&registry) {
            Ok(app_metrics) => {
                info!("Prometheus metrics enabled at /metrics");
                Some((web::Data::new(registry), web::Data::new(app_metrics)))
            }
            Err(e) => {
                error!("Failed to register metrics, continuing without them: {}", e);
                None
            }
        }
    } else {
        info!("Prometheus metrics disabled");
        None
    };

    info!(
        "Starting TinyApp server at http://{}:{}",
        config.host, config.port
    );
    info!("Routes:");
    info!("   GET    /                    - Redirect to /urls or /login");
    info!("   GET    /register, /login    - Account forms");
    info!("   POST   /register, /login    - Create account / log in");
    info!("   POST   /logout              - End the session");
    info!("   GET    /urls                - List your URLs");
    info!("   GET    /urls/new            - New URL form");
    info!("   POST   /urls                - Shorten a URL");
    info!("   GET    /urls/{{code}}         - URL details and visits");
    info!("   PUT    /urls/{{code}}         - Change the destination");
    info!("   DELETE /urls/{{code}}         - Delete a URL");
    info!("   GET    /u/{{code}}            - Follow a short link");
    info!("Short links are served under {}/u/", config.base_url);

    // Capture bind address before moving config into closure
    let bind_addr = format!("{}:{}", config.host, config.port);
    let config = web::Data::new(config);

    // Start HTTP server
    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(store.clone())
            .app_data(session_key.clone())
            .app_data(config.clone());

        if let Some((registry, app_metrics)) = &metrics {
            app = app
                .app_data(registry.clone())
                .app_data(app_metrics.clone());
        }

        app
            // Enable logger middleware
            .wrap(Logger::default())
            // Configure routes
            .configure(handlers::configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
