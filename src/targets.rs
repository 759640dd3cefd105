//! Sex-specific daily reference intake values, loaded once at startup from
//! a CSV export and held process-wide. The table is consulted only when
//! micronutrient totals are compared against targets; it never influences
//! accumulation itself.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::numeric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// Daily reference value for one nutrient, per sex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntakePair {
    pub male: f64,
    pub female: f64,
}

impl IntakePair {
    pub fn for_sex(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.male,
            Sex::Female => self.female,
        }
    }
}

/// In-memory reference-intake table.
///
/// A load builds a complete new map and swaps it in atomically, so readers
/// either see the previous table or the full new one, never a partial load.
#[derive(Debug, Default)]
pub struct ReferenceIntakes {
    inner: RwLock<Arc<HashMap<String, IntakePair>>>,
}

impl ReferenceIntakes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_path(&self, path: &Path) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read reference intake table {}", path.display()))?;
        self.load_from_str(&text)
    }

    /// Parses CSV text: first row is a header and is skipped, as are rows
    /// with fewer than 3 fields or an empty nutrient name. Values go
    /// through the quote-stripping normalizer, so `'12,5'` loads as 12.5.
    pub fn load_from_str(&self, text: &str) -> anyhow::Result<()> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut parsed = HashMap::new();

        for line in text.lines().skip(1) {
            let fields = split_csv_row(line);
            if fields.len() < 3 {
                continue;
            }
            let nutrient = fields[0].trim();
            if nutrient.is_empty() {
                continue;
            }
            parsed.insert(
                nutrient.to_string(),
                IntakePair {
                    male: numeric::normalize_quoted(&fields[1]),
                    female: numeric::normalize_quoted(&fields[2]),
                },
            );
        }

        tracing::debug!(entries = parsed.len(), "reference intake table loaded");
        let mut guard = self
            .inner
            .write()
            .map_err(|_| anyhow!("reference intake table lock poisoned"))?;
        *guard = Arc::new(parsed);
        Ok(())
    }

    pub fn get(&self, nutrient: &str) -> Option<IntakePair> {
        self.inner.read().ok()?.get(nutrient).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Minimal CSV field splitter: honors double-quoted fields (including
/// escaped `""`) so Italian decimal commas inside quotes do not split.
fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "nutriente,uomo,donna\n\
                       Ferro (mg),10,18\n\
                       \"Vitamina C (mg)\",\"90\",\"85\"\n\
                       Calcio (mg),\"1,2\",\"1,5\"\n\
                       short-row\n\
                       ,5,5\n";

    #[test]
    fn loads_and_skips_malformed_rows() {
        let table = ReferenceIntakes::new();
        table.load_from_str(CSV).unwrap();

        assert_eq!(table.len(), 3);
        let iron = table.get("Ferro (mg)").unwrap();
        assert_eq!(iron.male, 10.0);
        assert_eq!(iron.female, 18.0);
        assert_eq!(table.get("Calcio (mg)").unwrap().female, 1.5);
        assert!(table.get("short-row").is_none());
    }

    #[test]
    fn tolerates_a_bom() {
        let table = ReferenceIntakes::new();
        table
            .load_from_str("\u{feff}nutriente,uomo,donna\nZinco (mg),11,8\n")
            .unwrap();
        assert_eq!(table.get("Zinco (mg)").unwrap().for_sex(Sex::Female), 8.0);
    }

    #[test]
    fn reload_replaces_the_whole_table() {
        let table = ReferenceIntakes::new();
        table.load_from_str(CSV).unwrap();
        table
            .load_from_str("nutriente,uomo,donna\nPotassio (mg),3900,3900\n")
            .unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.get("Ferro (mg)").is_none());
        assert_eq!(table.get("Potassio (mg)").unwrap().male, 3900.0);
    }

    #[test]
    fn empty_table_answers_none() {
        let table = ReferenceIntakes::new();
        assert!(table.is_empty());
        assert!(table.get("Ferro (mg)").is_none());
    }
}
