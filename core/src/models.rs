use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// One persisted record of a classified food upload.
///
/// Entries are append-only: there is no update or delete path, and the
/// calorie value is snapshotted at write time so later catalog changes
/// never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodHistoryEntry {
    pub id: i64,
    pub food_name: String,
    pub calories: i64,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewFoodHistoryEntry {
    pub food_name: String,
    pub calories: i64,
}

pub fn validate_entry(entry: &NewFoodHistoryEntry) -> Result<()> {
    if entry.food_name.trim().is_empty() {
        bail!("food_name must not be empty");
    }
    if entry.calories < 0 {
        bail!("calories must not be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entry_ok() {
        let entry = NewFoodHistoryEntry {
            food_name: "Bakso".to_string(),
            calories: 380,
        };
        assert!(validate_entry(&entry).is_ok());
    }

    #[test]
    fn test_validate_entry_empty_name() {
        let entry = NewFoodHistoryEntry {
            food_name: "   ".to_string(),
            calories: 100,
        };
        assert!(validate_entry(&entry).is_err());
    }

    #[test]
    fn test_validate_entry_negative_calories() {
        let entry = NewFoodHistoryEntry {
            food_name: "Sate Ayam".to_string(),
            calories: -1,
        };
        assert!(validate_entry(&entry).is_err());
    }

    #[test]
    fn test_entry_serializes_to_json() {
        let entry = FoodHistoryEntry {
            id: 1,
            food_name: "Gado-Gado".to_string(),
            calories: 350,
            created_at: "2024-06-15T12:00:00+07:00".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["food_name"], "Gado-Gado");
        assert_eq!(json["calories"], 350);
    }
}
