//! Nutritional aggregation: per-meal macro totals from persisted meals, and
//! micronutrient totals over an arbitrary food list for what-if planning.

mod calculator;
mod dto;

pub use calculator::{compute_meal_macros, compute_micro_totals};
pub(crate) use calculator::food_macros;
pub use dto::{MacroTotals, MicroFoodEntry, MicroTotal};
