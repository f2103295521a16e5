//! Moon-related calculations and utilities

use crate::utils::vector_math::angle_between;

/// Calculate Moon illumination fraction from geocentric Sun/Moon vectors.
///
/// # Arguments
/// * `sun` - Sun position (km)
/// * `moon` - Moon position (km)
///
/// # Returns
/// Moon illumination fraction (0.0 = new moon, 1.0 = full moon)
pub(crate) fn calculate_moon_illumination_from_vectors(sun: [f64; 3], moon: [f64; 3]) -> f64 {
    let elongation = angle_between(&sun, &moon);
    (1.0 - elongation.cos()) / 2.0
}

/// Descriptive name for a normalized lunar phase (0 = new, 0.5 = full)
pub fn moon_phase_name(phase: f64) -> &'static str {
    if phase <= 0.01 || phase >= 0.99 {
        "New Moon"
    } else if phase < 0.24 {
        "Waxing Crescent"
    } else if phase <= 0.26 {
        "First Quarter"
    } else if phase < 0.49 {
        "Waxing Gibbous"
    } else if phase <= 0.51 {
        "Full Moon"
    } else if phase < 0.74 {
        "Waning Gibbous"
    } else if phase < 0.76 {
        "Last Quarter"
    } else {
        "Waning Crescent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names_cover_cycle() {
        assert_eq!(moon_phase_name(0.0), "New Moon");
        assert_eq!(moon_phase_name(0.995), "New Moon");
        assert_eq!(moon_phase_name(0.1), "Waxing Crescent");
        assert_eq!(moon_phase_name(0.25), "First Quarter");
        assert_eq!(moon_phase_name(0.4), "Waxing Gibbous");
        assert_eq!(moon_phase_name(0.5), "Full Moon");
        assert_eq!(moon_phase_name(0.6), "Waning Gibbous");
        assert_eq!(moon_phase_name(0.75), "Last Quarter");
        assert_eq!(moon_phase_name(0.9), "Waning Crescent");
    }

    #[test]
    fn test_illumination_extremes() {
        let sun = [1.0e8, 0.0, 0.0];
        assert!(calculate_moon_illumination_from_vectors(sun, [3.8e5, 0.0, 0.0]) < 1e-12);
        assert!((calculate_moon_illumination_from_vectors(sun, [-3.8e5, 0.0, 0.0]) - 1.0).abs() < 1e-12);
        let quarter = calculate_moon_illumination_from_vectors(sun, [0.0, 3.8e5, 0.0]);
        assert!((quarter - 0.5).abs() < 1e-12);
    }
}
