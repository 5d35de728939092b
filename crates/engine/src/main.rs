//! Pitlane Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitlane_engine::api;
use pitlane_engine::app::App;
use pitlane_engine::infrastructure::{
    clock::SystemClock,
    config::EngineConfig,
    ollama::OllamaClient,
    ports::ClockPort,
    sentiment::LexiconSentiment,
    sqlite::{self, SqliteRepositories},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitlane_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pitlane Engine");

    // Load configuration; a missing inference endpoint stops startup here.
    let config = EngineConfig::from_env()?;
    tracing::info!(
        endpoint = %config.inference.endpoint,
        model = %config.inference.model,
        authenticated = config.inference.credentials.is_some(),
        "Inference backend configured"
    );

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    // Open the database
    tracing::info!(url = %config.server.database_url, "Opening SQLite database");
    let pool = sqlite::connect(&config.server.database_url).await?;
    sqlite::ensure_schema(&pool).await?;
    let repos = SqliteRepositories::new(pool, clock);

    // Create infrastructure clients
    let inference = Arc::new(OllamaClient::new(&config.inference)?);

    // Create application
    let app = Arc::new(App::new(repos.into(), inference, Arc::new(LexiconSentiment)));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.server.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
