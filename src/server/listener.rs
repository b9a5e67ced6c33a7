use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::router::Router;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!(
        addr = %cfg.listen_addr,
        directory = ?cfg.directory,
        max_connections = ?cfg.max_connections,
        "Listening"
    );

    let router = Arc::new(Router::new(cfg.directory.clone()));
    serve(listener, router, cfg.max_connections).await
}

/// Accepts connections forever, one task per socket.
///
/// With `max_connections` set, accepting pauses while that many
/// connections are being served.
pub async fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    max_connections: Option<usize>,
) -> anyhow::Result<()> {
    let limit = max_connections.map(|n| Arc::new(Semaphore::new(n)));

    loop {
        let permit = match &limit {
            Some(sem) => Some(Arc::clone(sem).acquire_owned().await?),
            None => None,
        };

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
            drop(permit);
        });
    }
}
