use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db;
use crate::targets::ReferenceIntakes;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub reference: Arc<ReferenceIntakes>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env());

        let db = db::connect(&config.database_url).await?;
        db::ensure_schema(&db).await?;

        let reference = Arc::new(ReferenceIntakes::new());
        if let Err(e) = reference.load_from_path(Path::new(&config.reference_csv_path)) {
            tracing::warn!(error = %e, "reference intake table not loaded; continuing with an empty table");
        }

        Ok(Self {
            db,
            config,
            reference,
        })
    }

    pub fn from_parts(
        db: SqlitePool,
        config: Arc<AppConfig>,
        reference: Arc<ReferenceIntakes>,
    ) -> Self {
        Self {
            db,
            config,
            reference,
        }
    }

    /// Fully isolated state over an in-memory database, for tests and
    /// embedding. The reference table starts empty; load a fixture into
    /// `reference` as needed.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let db = db::connect_memory().await?;
        db::ensure_schema(&db).await?;

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            reference_csv_path: String::new(),
        });

        Ok(Self {
            db,
            config,
            reference: Arc::new(ReferenceIntakes::new()),
        })
    }
}
