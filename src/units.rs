//! Physical unit normalization for catalog dimensions and weight.
//!
//! The catalog provider reports dimensions and weight in whatever unit the
//! listing used. Unknown units pass the raw value through unchanged: the
//! provider's default units for these attributes are already metric, so a
//! value with an unrecognized tag is assumed normalized.

const CM_PER_INCH: f64 = 2.54;
const GRAMS_PER_POUND: f64 = 453.592;
const GRAMS_PER_KILOGRAM: f64 = 1000.0;
const GRAMS_PER_OUNCE: f64 = 28.3495;

/// Converts a dimension value to centimeters.
pub fn to_centimeters(value: f64, unit: &str) -> f64 {
    match unit.to_lowercase().as_str() {
        "inches" | "inch" | "in" => value * CM_PER_INCH,
        _ => value,
    }
}

/// Converts a weight value to grams.
pub fn to_grams(value: f64, unit: &str) -> f64 {
    match unit.to_lowercase().as_str() {
        "pounds" | "pound" | "lb" | "lbs" => value * GRAMS_PER_POUND,
        "kilograms" | "kilogram" | "kg" => value * GRAMS_PER_KILOGRAM,
        "ounces" | "ounce" | "oz" => value * GRAMS_PER_OUNCE,
        _ => value,
    }
}
