#![allow(dead_code)]

use std::sync::Once;

use sqlx::SqlitePool;

use macromicro::db;

static TRACING: Once = Once::new();

/// Fresh schema on an isolated in-memory database.
pub async fn test_db() -> SqlitePool {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init()
            .ok();
    });

    let pool = db::connect_memory().await.expect("in-memory pool");
    db::ensure_schema(&pool).await.expect("schema setup");
    pool
}

/// Seeds one catalog food with raw per-100g values, standing in for the
/// external ingestion pipeline.
pub async fn seed_food(
    db: &SqlitePool,
    code: &str,
    name: &str,
    category: &str,
    nutrients: &[(&str, &str)],
) {
    sqlx::query("INSERT INTO foods (code, name, category) VALUES (?, ?, ?)")
        .bind(code)
        .bind(name)
        .bind(category)
        .execute(db)
        .await
        .expect("seed food");

    for (nutrient, per_100g) in nutrients {
        sqlx::query("INSERT INTO food_nutrients (food_code, nutrient, per_100g) VALUES (?, ?, ?)")
            .bind(code)
            .bind(nutrient)
            .bind(per_100g)
            .execute(db)
            .await
            .expect("seed nutrient");
    }
}

pub async fn count(db: &SqlitePool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db)
        .await
        .expect("count");
    n
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
