use std::path::Path;

/// The fixed label set the stub classifier draws from.
pub const FOOD_LABELS: [&str; 5] = [
    "Nasi Goreng",
    "Mie Goreng",
    "Sate Ayam",
    "Gado-Gado",
    "Bakso",
];

/// Label returned for any index outside the valid range.
pub const UNKNOWN_FOOD: &str = "Unknown Food";

/// Classifies a saved food photo into a label index.
///
/// Handlers only depend on this trait, so a real inference backend can
/// replace [`RandomClassifier`] without touching callers.
pub trait FoodClassifier: Send + Sync {
    fn classify(&self, image: &Path) -> usize;
}

/// Placeholder classifier: a uniform random index, independent of the
/// file contents. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomClassifier;

impl FoodClassifier for RandomClassifier {
    fn classify(&self, _image: &Path) -> usize {
        use rand::Rng;
        rand::rng().random_range(0..FOOD_LABELS.len())
    }
}

#[must_use]
pub fn label_for_index(index: usize) -> &'static str {
    FOOD_LABELS.get(index).copied().unwrap_or(UNKNOWN_FOOD)
}
