use pricewatch_server::{
    api::app_router, build_state, config::Config, init_tracing, scheduler,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);
    let state = build_state(&config).await?;

    let shutdown = CancellationToken::new();
    let ingestion = scheduler::start_price_scheduler(&state, &config, shutdown.clone());

    let router = app_router(state, &config);
    info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    match ingestion.await {
        Ok(cycles) => info!("Price scheduler stopped after {} cycles", cycles),
        Err(e) => warn!("Price scheduler task failed: {}", e),
    }
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM and cancels `shutdown` so the scheduler
/// stops alongside the HTTP server.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = shutdown.cancelled() => {},
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}
