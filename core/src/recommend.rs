use serde::Serialize;

use crate::models::FoodHistoryEntry;

/// Average daily intake above this is flagged as high.
pub const HIGH_THRESHOLD: f64 = 2200.0;
/// Average daily intake below this is flagged as low.
pub const LOW_THRESHOLD: f64 = 1800.0;

pub const MSG_NO_DATA: &str =
    "No data yet. Upload a food photo to get started.";
pub const MSG_HIGH: &str =
    "Calorie intake is trending high. Try smaller portions and more vegetables.";
pub const MSG_LOW: &str =
    "Your calorie intake is low. Make sure you are getting enough nutrition.";
pub const MSG_BALANCED: &str =
    "Your diet is fairly balanced. Keep up the nutritional variety.";

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub average_calories: f64,
    pub message: &'static str,
}

/// Map the mean calorie value of all history entries to one of three
/// fixed advice messages. An empty history gets the upload prompt.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn recommend(entries: &[FoodHistoryEntry]) -> Recommendation {
    if entries.is_empty() {
        return Recommendation {
            average_calories: 0.0,
            message: MSG_NO_DATA,
        };
    }

    let total: i64 = entries.iter().map(|e| e.calories).sum();
    let average = total as f64 / entries.len() as f64;

    let message = if average > HIGH_THRESHOLD {
        MSG_HIGH
    } else if average < LOW_THRESHOLD {
        MSG_LOW
    } else {
        MSG_BALANCED
    };

    Recommendation {
        average_calories: average,
        message,
    }
}
