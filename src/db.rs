use anyhow::Context;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Opens the pool, creating the database file when it does not exist yet.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let connection_options = if database_url.starts_with("sqlite:") && !database_url.contains('?') {
        format!("{database_url}?mode=rwc")
    } else {
        database_url.to_string()
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&connection_options)
        .await
        .context("connect to database")?;
    Ok(pool)
}

/// In-memory database on a single-connection pool. SQLite gives every
/// connection its own `:memory:` database, so the pool must never grow past
/// one connection or the schema silently disappears between queries.
pub async fn connect_memory() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .context("open in-memory database")?;
    Ok(pool)
}

/// Creates the five tables this core reads and writes. The catalog tables
/// (`foods`, `food_nutrients`) are populated by the external ingestion
/// pipeline and only ever read here; proper migration tooling is the
/// hosting layer's concern.
pub async fn ensure_schema(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS foods (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS food_nutrients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            food_code TEXT NOT NULL REFERENCES foods(code),
            nutrient TEXT NOT NULL,
            unit TEXT,
            per_100g TEXT
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS diets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            diet_id INTEGER NOT NULL REFERENCES diets(id),
            day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 1 AND 7),
            name TEXT NOT NULL,
            ordering INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meal_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            meal_id INTEGER NOT NULL REFERENCES meals(id),
            food_code TEXT NOT NULL,
            grams INTEGER NOT NULL CHECK (grams >= 0)
        )
        "#,
    )
    .execute(db)
    .await?;

    Ok(())
}
