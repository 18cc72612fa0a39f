use std::net::SocketAddr;

use crate::{router::create_router, state::AppState};

/// Run the API server
///
/// `log_filter` is used when `RUST_LOG` is not set.
pub async fn run_server(state: AppState, host: &str, port: u16, log_filter: &str) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .init();

    let app = create_router(state);

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
