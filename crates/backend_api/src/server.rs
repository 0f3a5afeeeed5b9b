use std::net::SocketAddr;

use crate::{router::create_router, state::AppState};

/// Bind and serve until the process is stopped
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
