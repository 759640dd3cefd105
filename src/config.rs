use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// CSV export of the per-sex daily reference intake table.
    pub reference_csv_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:nutrition.db".into()),
            reference_csv_path: std::env::var("REFERENCE_INTAKE_CSV")
                .unwrap_or_else(|_| "larn.csv".into()),
        }
    }
}
