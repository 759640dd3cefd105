//! The diet aggregate: a user-owned weekly plan of meals and food entries.
//! Every multi-row operation runs inside one transaction, and every read or
//! mutation of an existing diet is scoped by the owner id.

mod dto;
mod repo;

pub use dto::{DayView, DietSummary, DietView, FoodEntryDraft, FoodEntryView, MealDraft, MealView};
pub use repo::{
    add_food_entry, add_meal, create, create_full, delete, duplicate_day, get_full, list_for_owner,
    replace_full,
};
