/// Harris-Benedict basal metabolic rate estimate.
///
/// Uses the male coefficient set only; the intake form has no sex field.
/// Inputs are not clamped, so out-of-range values produce whatever the
/// arithmetic gives.
#[must_use]
pub fn estimate_bmr(weight_kg: f64, height_cm: f64, age_years: f64) -> f64 {
    66.0 + (13.7 * weight_kg) + (5.0 * height_cm) - (6.8 * age_years)
}
