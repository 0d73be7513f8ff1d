use std::future::Future;
use std::sync::Arc;

use kurz_core::Mapping;
use tokio::net::TcpListener;
use tracing::info;

use crate::app::App;
use crate::state::AppState;

/// Serves redirects on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    mapping: Arc<dyn Mapping>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(listen_addr = %listener.local_addr()?, "starting redirect server");

    axum::serve(listener, App::router(AppState::new(mapping)))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("redirect server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
