pub mod config;
pub mod controllers;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use services::auth::AuthService;
use services::ledger::BookingLedger;
use store::Store;

// Shared state для всего приложения
pub struct AppState {
    pub store: Store,
    pub ledger: BookingLedger,
    pub auth: AuthService,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let store = Store::new();
        let ledger = BookingLedger::new(store.clone());
        let auth = AuthService::new(&config.jwt);
        Arc::new(Self {
            store,
            ledger,
            auth,
            config,
        })
    }
}

/// Собирает полный роутер приложения поверх готового состояния.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Cinema Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
