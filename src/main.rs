// src/main.rs

use dotenvy::dotenv;
use post_page::config::Config;
use post_page::routes;
use post_page::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let (config, ignored) = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "post_page.log");
    // Dropping the guard flushes the file writer, so every exit path returns from main.
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

    for entry in &ignored {
        tracing::warn!("Ignoring malformed {}, using default", entry);
    }

    tracing::info!(
        "Comments by {:?}, reject empty: {}",
        config.comment_author,
        config.reject_empty_comments
    );

    // Create AppState backed by the mock loader
    let addr = config.bind_addr;
    let state = AppState::new(config);

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    tracing::info!("Listening on {}", addr);

    // Start the server
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
