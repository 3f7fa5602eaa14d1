use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fib_probe::config::{AppState, Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let state = AppState::from_config(&config);
    info!(
        "[{}] max n = {}, api key {}",
        state.instance_id,
        state.max_n,
        if state.api_key.is_some() { "required" } else { "not required" }
    );

    let listener = match tokio::net::TcpListener::bind(&config.bind).await {
        Ok(l) => l,
        Err(e) => {
            error!("failed to bind {}: {}", config.bind, e);
            std::process::exit(1);
        }
    };
    info!("listening on {}", config.bind);

    let server = axum::serve(listener, fib_probe::app(state));
    let graceful = server.with_graceful_shutdown(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl_c: {}", e);
        }
    });

    if let Err(e) = graceful.await {
        error!("server error: {}", e);
    }
}
