use serde::{Deserialize, Serialize};

/// Macro totals in grams and kilocalories. The zero value is meaningful:
/// a meal with no entries aggregates to exactly this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroTotals {
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbohydrate_g: f64,
    pub energy_kcal: f64,
}

/// Canonical input shape for the micronutrient aggregation. The transport
/// layer converts whatever wire format it accepts into this before calling
/// the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicroFoodEntry {
    pub food_code: String,
    pub grams: f64,
}

/// Accumulated amount of one micronutrient, paired with the daily
/// reference-intake value for the requested sex when the table has one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MicroTotal {
    pub amount: f64,
    pub reference: Option<f64>,
}
