/// Convert a Celsius reading to Kelvin.
///
/// Kelvin is the canonical unit everywhere inside this crate; providers whose
/// remote API reports Celsius must go through this before returning.
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + 273.15
}
