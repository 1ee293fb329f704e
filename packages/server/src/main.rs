use std::sync::Arc;

use anyhow::Context;
use common::media::ImageIngestor;
use common::storage::FilesystemBlobStore;
use stockroom::config::AppConfig;
use stockroom::database::{ensure_schema, init_db};
use stockroom::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    ensure_schema(&db)
        .await
        .context("Failed to create record tables")?;

    let store = FilesystemBlobStore::new(config.storage.upload_dir.clone())
        .await
        .with_context(|| {
            format!(
                "Failed to prepare upload directory {}",
                config.storage.upload_dir.display()
            )
        })?;
    let images = Arc::new(ImageIngestor::new(
        Arc::new(store),
        config.storage.max_image_bytes,
    ));
    info!(
        upload_dir = %config.storage.upload_dir.display(),
        max_image_bytes = images.max_bytes(),
        "Image storage ready"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        config: Arc::new(config),
        images,
    };
    let app = stockroom::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
