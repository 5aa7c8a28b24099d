use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;
use crate::storage::{DiskStore, ImageStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn ImageStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let storage = Arc::new(DiskStore::new(&config.upload_dir)?) as Arc<dyn ImageStore>;

        Ok(Self {
            db,
            config,
            storage,
        })
    }
}
