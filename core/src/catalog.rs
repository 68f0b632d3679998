use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Calorie value used whenever a food name is missing from the catalog.
pub const DEFAULT_CALORIES: i64 = 500;

/// Read-only food-name → calorie map, built once at startup.
///
/// A failed load never aborts the process: the application keeps running
/// with an empty catalog and every lookup falling back to
/// [`DEFAULT_CALORIES`].
#[derive(Debug, Clone, Default)]
pub struct NutritionCatalog {
    entries: HashMap<String, i64>,
}

impl NutritionCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the catalog CSV, falling back to an empty catalog on any
    /// read or parse failure. A bad row discards the whole load.
    #[must_use]
    pub fn from_csv_path(path: &Path) -> Self {
        let load = || -> Result<Self> {
            let file = File::open(path)
                .with_context(|| format!("Failed to open catalog: {}", path.display()))?;
            Self::from_reader(file)
        };
        match load() {
            Ok(catalog) => catalog,
            Err(err) => {
                eprintln!("Error loading nutrition catalog: {err:#}");
                Self::empty()
            }
        }
    }

    /// Parse catalog rows from any reader.
    ///
    /// Expected columns (case-insensitive): `FoodName`, `Calories`.
    /// Names are trimmed; calories must parse as an integer.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().context("Failed to read CSV headers")?.clone();
        let col = |name: &str| -> Option<usize> {
            headers.iter().position(|h| h.eq_ignore_ascii_case(name))
        };

        let idx_name = col("FoodName").context("Missing 'FoodName' column")?;
        let idx_cal = col("Calories").context("Missing 'Calories' column")?;

        let mut entries = HashMap::new();
        for (line_num, result) in rdr.records().enumerate() {
            let record =
                result.with_context(|| format!("Failed to parse CSV row {}", line_num + 2))?;
            let name = record.get(idx_name).unwrap_or("").trim();
            if name.is_empty() {
                continue; // skip blank rows
            }
            let raw_cal = record.get(idx_cal).unwrap_or("").trim();
            let calories: i64 = raw_cal.parse().with_context(|| {
                format!("Invalid calorie value '{raw_cal}' for '{name}' (row {})", line_num + 2)
            })?;
            if calories <= 0 {
                bail!("Calorie value for '{name}' must be positive (got {calories})");
            }
            entries.insert(name.to_string(), calories);
        }

        Ok(Self { entries })
    }

    /// Mapped calorie value, or [`DEFAULT_CALORIES`] for unknown names.
    #[must_use]
    pub fn lookup(&self, name: &str) -> i64 {
        self.entries.get(name).copied().unwrap_or(DEFAULT_CALORIES)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
