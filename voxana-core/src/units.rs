//! Display-unit constants.
//!
//! The analysis is unit-system agnostic: algorithms compare and sum raw
//! values only. These constants exist so diagnostics can rescale raw
//! values into human-friendly units (Geant4 convention: mm and MeV are
//! the base units).

/// Millimeter, the base length unit.
pub const MM: f64 = 1.0;
/// Centimeter.
pub const CM: f64 = 10.0 * MM;
/// Meter.
pub const M: f64 = 1000.0 * MM;

/// Mega-electronvolt, the base energy unit.
pub const MEV: f64 = 1.0;
/// Kilo-electronvolt.
pub const KEV: f64 = 1e-3 * MEV;
/// Electronvolt.
pub const EV: f64 = 1e-6 * MEV;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_ratios() {
        assert_relative_eq!(M / CM, 100.0);
        assert_relative_eq!(MEV / KEV, 1000.0);
        assert_relative_eq!(1.5 * KEV / EV, 1500.0);
    }
}
