use serde::Serialize;
use sqlx::FromRow;

/// One raw catalog row: the value keeps its original text form and is only
/// normalized where a computation needs a number.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NutrientValue {
    pub nutrient: String,
    pub per_100g: Option<String>,
}

/// Search hit with the four macro values already normalized, so a picker UI
/// can render them without touching the raw catalog text.
#[derive(Debug, Clone, Serialize)]
pub struct FoodSearchResult {
    pub code: String,
    pub name: String,
    pub category: String,
    pub kcal: f64,
    pub protein_g: f64,
    pub carbohydrate_g: f64,
    pub fat_g: f64,
}
