//! Read-only access to the food reference catalog. The tables behind this
//! module are owned by the external ingestion pipeline; this core never
//! writes them.

mod dto;
mod repo;

pub use dto::{FoodSearchResult, NutrientValue};
pub use repo::{lookup_nutrients, lookup_nutrients_excluding, search};

/// Catalog names of the four macro nutrients, per 100 g.
pub const ENERGY_KCAL: &str = "Energia (kcal)";
pub const PROTEIN_G: &str = "Proteine (g)";
pub const FAT_G: &str = "Lipidi (g)";
pub const CARBOHYDRATE_G: &str = "Carboidrati disponibili (g)";

pub const MACRO_NUTRIENTS: [&str; 4] = [ENERGY_KCAL, PROTEIN_G, FAT_G, CARBOHYDRATE_G];

/// Name prefixes matching the whole macro-nutrient families; everything
/// outside these counts as a micronutrient.
pub const MACRO_PREFIXES: [&str; 4] = ["Energia", "Proteine", "Lipidi", "Carboidrati"];
