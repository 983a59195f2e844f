// src/main.rs

use dotenvy::dotenv;
use quizdeck::config::Config;
use quizdeck::routes;
use quizdeck::session::Sessions;
use quizdeck::state::AppState;
use quizdeck::store::JsonStore;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Open the data directory holding the persisted collections
    let store = match JsonStore::open(&config.data_dir) {
        Ok(store) => store,
        Err(e) => panic!("Failed to open data directory {:?}: {}", config.data_dir, e),
    };
    tracing::info!("Collections stored under {:?}", config.data_dir);

    if config.single_user_auto_login {
        tracing::warn!("SINGLE_USER_AUTO_LOGIN is enabled: a sole registered user is logged in without credentials");
    }

    // Create AppState
    let state = AppState {
        store,
        sessions: Sessions::new(),
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}
