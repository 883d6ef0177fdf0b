use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routes::Router;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;
    let router = Arc::new(Router::new(cfg.static_files.directory.clone()));
    info!(
        addr = %cfg.server.listen_addr,
        directory = %router.directory().display(),
        "Listening"
    );

    serve(listener, router, cfg.server.max_request_size).await
}

/// Accepts connections forever, one task per connection. Accept failures
/// are logged and the loop carries on.
pub async fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    max_request_size: usize,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        tracing::debug!(%peer, "Accepted connection");

        let router = router.clone();
        tokio::spawn(async move {
            let mut conn = Connection::with_max_request_size(socket, router, max_request_size);
            if let Err(e) = conn.run().await {
                tracing::error!(%peer, error = %e, "Connection error");
            }
        });
    }
}
