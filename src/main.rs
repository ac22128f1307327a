//! Hall Booking Service
//!
//! HTTP API for booking time slots in shared halls.
//!
//! ## Features
//!
//! - **Availability**: per-slot bookability with reasons, per hall and date
//! - **Bookings**: conflict-free submission, never a double booking
//! - **Approval workflow**: admin approve/reject with priority bookings

use axum::{
    routing::{get, post, put},
    Router,
};
use hallbook::approval::ApprovalStateMachine;
use hallbook::availability::AvailabilityResolver;
use hallbook::catalog::Catalog;
use hallbook::config::Config;
use hallbook::db;
use hallbook::handlers::{self, AppState};
use hallbook::ledger::BookingLedger;
use hallbook::notify::LogNotifier;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hallbook=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Starting hall booking service");
    tracing::info!("Environment: {:?}", config.environment);

    // Create database pool
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    // Run migrations and seed the catalog on first start
    db::run_migrations(&pool).await?;
    db::seed_catalog(&pool).await?;

    // Create application state
    let catalog = Catalog::new(pool.clone());
    let ledger = BookingLedger::new(pool, catalog.clone());
    let state = AppState {
        catalog: catalog.clone(),
        resolver: AvailabilityResolver::new(catalog, ledger.clone()),
        approvals: ApprovalStateMachine::new(ledger.clone()),
        ledger,
        notifier: Arc::new(LogNotifier),
    };

    // Build CORS layer
    let cors = if config.is_production() {
        CorsLayer::new()
            .allow_origin(
                config
                    .cors_origins
                    .iter()
                    .filter_map(|o| o.parse().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::permissive()
    };

    // Build API routes
    let api_routes = Router::new()
        // Catalog
        .route("/halls", get(handlers::list_halls))
        .route("/halls/:hall_id/timeslots", get(handlers::get_time_slots))
        // Bookings
        .route(
            "/bookings",
            post(handlers::create_booking).get(handlers::list_bookings),
        )
        .route("/bookings/user", get(handlers::get_user_bookings))
        .route("/bookings/:booking_id", get(handlers::get_booking))
        .route(
            "/bookings/:booking_id/approve",
            put(handlers::approve_booking),
        )
        .route(
            "/bookings/:booking_id/reject",
            put(handlers::reject_booking),
        )
        // Admin
        .route(
            "/admin/priority-bookings",
            post(handlers::create_priority_booking),
        )
        .route("/admin/dashboard", get(handlers::get_dashboard_stats));

    // Build main router
    let app = Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
