use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::libs::config::ServerSettings;
use crate::server::catalog::Catalog;
use crate::server::router;

pub(crate) async fn serve_mode(settings: &ServerSettings) -> anyhow::Result<()> {
    let catalog = Catalog::load(&settings.data_file).await?;
    if catalog.is_empty() {
        warn!("catalog {:?} has no items", settings.data_file);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not listen on {}", addr))?;
    info!("listening on http://{}/data", addr);

    axum::serve(listener, router(Arc::new(catalog)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}
