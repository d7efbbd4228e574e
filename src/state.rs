use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::food::{FoodRepository, PgFoodRepository};
use crate::storage::{S3Storage, StorageClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub foods: Arc<dyn FoodRepository>,
    pub storage: Arc<dyn StorageClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        let storage = Arc::new(S3Storage::new(&config.storage).await?) as Arc<dyn StorageClient>;
        let foods = Arc::new(PgFoodRepository::new(db)) as Arc<dyn FoodRepository>;

        Ok(Self::from_parts(config, foods, storage))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        foods: Arc<dyn FoodRepository>,
        storage: Arc<dyn StorageClient>,
    ) -> Self {
        Self {
            config,
            foods,
            storage,
        }
    }
}
