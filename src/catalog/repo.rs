use sqlx::{FromRow, SqlitePool};

use crate::error::AppResult;
use crate::numeric;

use super::dto::{FoodSearchResult, NutrientValue};
use super::{CARBOHYDRATE_G, ENERGY_KCAL, FAT_G, PROTEIN_G};

/// Returns the raw values of the requested nutrients for one food.
/// An unknown food code yields an empty list, not an error.
pub async fn lookup_nutrients(
    db: &SqlitePool,
    food_code: &str,
    names: &[&str],
) -> AppResult<Vec<NutrientValue>> {
    let mut rows = fetch_all_nutrients(db, food_code).await?;
    rows.retain(|r| names.contains(&r.nutrient.as_str()));
    Ok(rows)
}

/// Returns every nutrient row of one food except those whose name starts
/// with any of the excluded prefixes. The micronutrient aggregation uses
/// this to drop the four macro families wholesale.
pub async fn lookup_nutrients_excluding(
    db: &SqlitePool,
    food_code: &str,
    excluded_prefixes: &[&str],
) -> AppResult<Vec<NutrientValue>> {
    let mut rows = fetch_all_nutrients(db, food_code).await?;
    rows.retain(|r| !excluded_prefixes.iter().any(|p| r.nutrient.starts_with(p)));
    Ok(rows)
}

async fn fetch_all_nutrients(db: &SqlitePool, food_code: &str) -> AppResult<Vec<NutrientValue>> {
    let rows = sqlx::query_as::<_, NutrientValue>(
        r#"
        SELECT nutrient, per_100g
        FROM food_nutrients
        WHERE food_code = ?
        ORDER BY id ASC
        "#,
    )
    .bind(food_code)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

#[derive(Debug, FromRow)]
struct SearchRow {
    code: String,
    name: String,
    category: String,
    kcal: Option<String>,
    protein: Option<String>,
    carbohydrate: Option<String>,
    fat: Option<String>,
}

/// Case-insensitive substring search over food name and category, capped at
/// 20 rows ordered by name. The macro columns are pivoted out of the
/// nutrient rows in one query and normalized on the way out.
pub async fn search(db: &SqlitePool, keyword: &str) -> AppResult<Vec<FoodSearchResult>> {
    let pattern = format!("%{}%", keyword.trim());

    let query = format!(
        r#"
        SELECT f.code, f.name, f.category,
               MAX(CASE WHEN n.nutrient = '{ENERGY_KCAL}' THEN n.per_100g END) AS kcal,
               MAX(CASE WHEN n.nutrient = '{PROTEIN_G}' THEN n.per_100g END) AS protein,
               MAX(CASE WHEN n.nutrient = '{CARBOHYDRATE_G}' THEN n.per_100g END) AS carbohydrate,
               MAX(CASE WHEN n.nutrient = '{FAT_G}' THEN n.per_100g END) AS fat
        FROM foods f
        LEFT JOIN food_nutrients n ON n.food_code = f.code
        WHERE f.name LIKE ? OR f.category LIKE ?
        GROUP BY f.code, f.name, f.category
        ORDER BY f.name ASC
        LIMIT 20
        "#
    );

    let rows = sqlx::query_as::<_, SearchRow>(&query)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| FoodSearchResult {
            code: r.code,
            name: r.name,
            category: r.category,
            kcal: numeric::normalize(r.kcal.as_deref()),
            protein_g: numeric::normalize(r.protein.as_deref()),
            carbohydrate_g: numeric::normalize(r.carbohydrate.as_deref()),
            fat_g: numeric::normalize(r.fat.as_deref()),
        })
        .collect())
}
