use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::catalog::{self, CARBOHYDRATE_G, ENERGY_KCAL, FAT_G, MACRO_NUTRIENTS, MACRO_PREFIXES, PROTEIN_G};
use crate::error::AppResult;
use crate::numeric;
use crate::targets::{ReferenceIntakes, Sex};

use super::dto::{MacroTotals, MicroFoodEntry, MicroTotal};

/// Sums the four macro nutrients over every food entry of a meal. An empty
/// or unknown meal yields the zero totals.
pub async fn compute_meal_macros(db: &SqlitePool, meal_id: i64) -> AppResult<MacroTotals> {
    let entries: Vec<(String, i64)> =
        sqlx::query_as("SELECT food_code, grams FROM meal_items WHERE meal_id = ?")
            .bind(meal_id)
            .fetch_all(db)
            .await?;

    let mut totals = MacroTotals::default();
    for (food_code, grams) in entries {
        let entry = food_macros(db, &food_code, grams as f64).await?;
        totals.protein_g += entry.protein_g;
        totals.fat_g += entry.fat_g;
        totals.carbohydrate_g += entry.carbohydrate_g;
        totals.energy_kcal += entry.energy_kcal;
    }
    Ok(totals)
}

/// Macro totals contributed by a single quantity of one food. Catalog
/// values are per 100 g, so each is scaled by `grams / 100`.
pub(crate) async fn food_macros(
    db: &SqlitePool,
    food_code: &str,
    grams: f64,
) -> AppResult<MacroTotals> {
    let rows = catalog::lookup_nutrients(db, food_code, &MACRO_NUTRIENTS).await?;

    let mut totals = MacroTotals::default();
    for row in rows {
        let scaled = numeric::normalize(row.per_100g.as_deref()) / 100.0 * grams;
        match row.nutrient.as_str() {
            PROTEIN_G => totals.protein_g += scaled,
            FAT_G => totals.fat_g += scaled,
            CARBOHYDRATE_G => totals.carbohydrate_g += scaled,
            ENERGY_KCAL => totals.energy_kcal += scaled,
            _ => {}
        }
    }
    Ok(totals)
}

/// Accumulates every non-macro nutrient over an arbitrary food list.
///
/// Entries with a blank food code or without a finite positive grams value
/// are skipped outright.
/// Nothing is persisted; this is a pure projection for planning a diet
/// before saving it. The accumulated amounts do not depend on `sex` —
/// sex only selects which reference-intake column is attached for the
/// caller's comparison. The `BTreeMap` keeps nutrient names sorted so the
/// output is deterministic.
pub async fn compute_micro_totals(
    db: &SqlitePool,
    reference: &ReferenceIntakes,
    entries: &[MicroFoodEntry],
    sex: Sex,
) -> AppResult<BTreeMap<String, MicroTotal>> {
    let mut amounts: BTreeMap<String, f64> = BTreeMap::new();

    for entry in entries {
        // NaN fails the comparison too, so malformed quantities are
        // skipped instead of poisoning every total
        if entry.food_code.trim().is_empty() || !entry.grams.is_finite() || entry.grams <= 0.0 {
            continue;
        }

        let rows = catalog::lookup_nutrients_excluding(db, &entry.food_code, &MACRO_PREFIXES).await?;
        for row in rows {
            let scaled = numeric::normalize(row.per_100g.as_deref()) / 100.0 * entry.grams;
            *amounts.entry(row.nutrient).or_default() += scaled;
        }
    }

    Ok(amounts
        .into_iter()
        .map(|(nutrient, amount)| {
            let target = reference.get(&nutrient).map(|pair| pair.for_sex(sex));
            (
                nutrient,
                MicroTotal {
                    amount,
                    reference: target,
                },
            )
        })
        .collect())
}
