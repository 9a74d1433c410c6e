/// Thermal energy kT at the reference temperature, kcal/mol.
pub const KT_AT_REFERENCE: f64 = 0.593;

/// Reference temperature, Kelvin.
pub const REFERENCE_TEMPERATURE_K: f64 = 298.15;

/// Curvature of the quadratic within-region penalty: the energy cost at the
/// ellipse boundary, kcal/mol.
pub const REGION_CURVATURE: f64 = 2.0;

/// kT in kcal/mol at the given absolute temperature.
#[inline]
pub fn thermal_energy(temperature_kelvin: f64) -> f64 {
    KT_AT_REFERENCE * temperature_kelvin / REFERENCE_TEMPERATURE_K
}

/// Smallest absolute angular distance between two angles in degrees,
/// wrapping at 360. Result is in [0, 180].
#[inline]
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Quadratic penalty for sitting away from a region center, as a function
/// of the squared normalized elliptical radius.
#[inline]
pub fn within_region_penalty(elliptical_radius_sq: f64) -> f64 {
    REGION_CURVATURE * elliptical_radius_sq
}
