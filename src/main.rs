use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_system::{config::Config, router, services::seed, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cinema Booking API");

    // Create the shared application state
    let app_state = AppState::new(config.clone());

    // Seed baseline accounts and the demo catalog
    seed::seed_baseline(&app_state).expect("Failed to seed baseline data");
    info!("Baseline data seeded");

    // --- Start the web server ---

    let app = router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
