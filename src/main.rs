use healthwatch::{config, Health};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthwatch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let health = match config::load_config_with_fallback() {
        Ok(config) => {
            tracing::info!("Configuration loaded, {} check(s) registered", config.checks.len());
            config.build_health()
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load configuration: {}. Serving with an empty registry.",
                e
            );
            Health::new()
        }
    };

    let app = healthwatch::http::router(Arc::new(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("HEALTHWATCH_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting healthwatch server on {}", addr);
    tracing::info!("Endpoints: /health, /health/live, /health/ready");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
