//! Courier server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use courier_lib::api;
use courier_lib::config::Config;
use courier_lib::db::DbPool;
use courier_lib::middleware::RequestLogger;
use courier_lib::migration::Migrator;
use sea_orm_migration::MigratorTrait;

/// Perform health check (for Docker healthcheck).
fn health_check() -> bool {
    Config::from_env().is_ok()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        if health_check() {
            std::process::exit(0);
        } else {
            std::process::exit(1);
        }
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Courier Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
        info!("Using development default for DATABASE_URL");
    }

    // Connect to the database
    let pool = DbPool::connect(&config)
        .await
        .expect("Failed to initialize database");
    info!("Database connection established");

    // Run migrations
    Migrator::up(pool.connection(), None)
        .await
        .expect("Failed to run migrations");
    info!("Database migrations complete");

    let bind_address = config.bind_address();
    let is_development = config.is_development();

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        // Configure CORS
        let cors = if is_development {
            // Permissive CORS for development
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
                .max_age(3600)
        } else {
            // Restrictive CORS for production (same-origin only)
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
                .max_age(3600)
        };

        let mut app = App::new()
            // Add CORS middleware (must be before other middleware)
            .wrap(cors)
            // Add request logging middleware
            .wrap(RequestLogger)
            // Add shared state
            .app_data(web::Data::new(pool.clone()))
            // Configure routes
            .configure(api::configure_routes);

        // Serve interactive API docs in development
        if is_development {
            app = app.service(
                SwaggerUi::new("/docs/{_:.*}")
                    .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
            );
        }

        app
    });

    server.workers(worker_count).bind(&bind_address)?.run().await
}
