use std::sync::Arc;

use common::media::ImageIngestor;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub images: Arc<ImageIngestor>,
}
