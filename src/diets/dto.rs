use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::nutrition::MacroTotals;

/// One food entry as submitted by a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntryDraft {
    pub food_code: String,
    pub grams: i64,
}

/// One meal as submitted by a caller, assigned to a day of the week
/// (1 = Monday .. 7 = Sunday). When `order` is absent or non-positive the
/// store falls back to the draft's 1-based position in the submitted list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealDraft {
    pub day_of_week: i64,
    pub name: String,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub foods: Vec<FoodEntryDraft>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DietSummary {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub created_at: OffsetDateTime,
}

/// Fully expanded diet: always exactly 7 day slots, index 0 = day 1.
#[derive(Debug, Clone, Serialize)]
pub struct DietView {
    pub id: i64,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub days: Vec<DayView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub day_of_week: i64,
    pub meals: Vec<MealView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealView {
    pub id: i64,
    pub name: String,
    pub order: i64,
    pub foods: Vec<FoodEntryView>,
}

/// Food entry enriched for display: catalog name (the raw code when the
/// catalog has no match) and this entry's share of the macro totals.
#[derive(Debug, Clone, Serialize)]
pub struct FoodEntryView {
    pub id: i64,
    pub food_code: String,
    pub name: String,
    pub grams: i64,
    pub macros: MacroTotals,
}
