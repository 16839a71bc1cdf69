use anyhow::Context;
use log::info;
use rainchat::ai::{AnyProvider, LlmProvider};
use rainchat::api::{build_router, AppState};
use rainchat::config::{self, ServerConfig};
use rainchat::storage;
use std::sync::Arc;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    rainchat::init_logging();

    let server_cfg = ServerConfig::from_env()?;

    let provider = AnyProvider::from_env()?;
    info!("LLM provider: {} model={}", provider.name(), server_cfg.model);
    let provider: Arc<dyn LlmProvider> = Arc::new(provider);

    let db_url = config::database_url();
    let db = storage::establish_connection(&db_url)
        .await
        .with_context(|| format!("connecting to {db_url}"))?;

    let state = AppState::new(Arc::new(db.clone()), provider, server_cfg.model.clone());
    let app = build_router(state, &server_cfg.cors_origins);

    let addr = format!("{}:{}", server_cfg.host, server_cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server running on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    storage::close_connection(db).await;
    served.context("server error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
