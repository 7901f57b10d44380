use anyhow::Result;
use spritmonitor_exporter::{create_app, run_schedule, AppConfig};
use std::future::IntoFuture;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    // Optional .env file; real environment variables take precedence.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().inspect_err(|err| error!("{err:#}"))?;
    let app = create_app(&config)?;

    let schedule = tokio::spawn(run_schedule(
        app.collector.clone(),
        config.collection.interval,
        config.collection.on_fetch_error,
    ));

    let endpoint = &config.server.listen_addr;
    info!("Listening on {endpoint}");
    info!("Starting Spritmonitor exporter v{}...", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(endpoint).await?;
    let server = axum::serve(listener, app.router)
        .with_graceful_shutdown(shutdown_signal())
        .into_future();

    tokio::select! {
        served = server => served?,
        scheduled = schedule => {
            // Only returns on a fetch error under the `exit` policy.
            if let Err(err) = scheduled? {
                error!("Stopping after failed collection: {err}");
                return Err(err.into());
            }
        }
    }

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    // ---
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
