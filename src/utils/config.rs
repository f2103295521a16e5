//! Physical constants and search presets used throughout the crate

use serde::{Deserialize, Serialize};

// Earth figure (WGS-84)
pub const EARTH_RADIUS_KM: f64 = 6378.137;
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Earth radius used to normalise observer elevation in an observation context (meters)
pub const ERAD_M: f64 = 6_378_160.0;

pub const SUN_RADIUS_KM: f64 = 696_000.0;
pub const AU_KM: f64 = 149_597_870.7;

// Time scales
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Seconds between 1899-12-31T12:00Z (origin of the continuous date scale) and the Unix epoch
pub const EPHEM_EPOCH_OFFSET_SECONDS: f64 = 2_209_032_000.0;
/// Julian date of the origin of the continuous date scale
pub const MJD0: f64 = 2_415_020.0;
/// J2000.0 on the continuous date scale
pub const J2000_MJD: f64 = 36_525.0;
pub const JD_J2000: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
pub const TT_TAI_SECONDS: f64 = 32.184;
/// TT-UTC used outside the leap second table
pub const DEFAULT_TT_UTC_SECONDS: f64 = 69.184;
/// Ratio of sidereal to solar time
pub const SIDEREAL_RATE: f64 = 1.002_737_909_35;

// Default atmosphere
pub const DEFAULT_PRESSURE_HPA: f64 = 1010.0;
pub const DEFAULT_TEMPERATURE_C: f64 = 15.0;

// Lunar phase solver
pub const SYNODIC_MONTH_DAYS: f64 = 29.53;
pub const PHASE_TOLERANCE_DAYS: f64 = 1.0 / 1440.0;
pub const PHASE_MAX_ITERATIONS: usize = 50;

// Twilight classifier
pub const TWILIGHT_STEP_SECONDS: f64 = 20.0;
pub const NIGHT_MAX_ALT: f64 = -18.0;
pub const ASTRONOMICAL_MAX_ALT: f64 = -12.0;
pub const NAUTICAL_MAX_ALT: f64 = -6.0;
pub const BLUE_HOUR_MAX_ALT: f64 = -4.0;
pub const CIVIL_MAX_ALT: f64 = 0.0;
pub const GOLDEN_HOUR_MAX_ALT: f64 = 6.0;

// Satellite visibility
pub const VISIBILITY_STEP_DAYS: f64 = 10.0 / SECONDS_PER_DAY;
pub const VISIBLE_SUN_MIN_ALT: f64 = -30.0;
pub const VISIBLE_SUN_MAX_ALT: f64 = -6.0;
pub const VISIBLE_SAT_MIN_ALT: f64 = 10.0;

/// Step and horizon of an altitude-crossing search, both in days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub step_days: f64,
    pub limit_days: f64,
}

impl SearchParams {
    /// Sun, Moon and planets: one minute steps, one day either side
    pub const SOLAR_SYSTEM: SearchParams = SearchParams {
        step_days: 1.0 / 1440.0,
        limit_days: 1.0,
    };

    /// Low orbit satellites: ten second steps, ten days ahead
    pub const SATELLITE: SearchParams = SearchParams {
        step_days: 1.0 / 8640.0,
        limit_days: 10.0,
    };

    /// Sun crossing an arbitrary altitude
    pub const SUN_CROSSING: SearchParams = SearchParams {
        step_days: 1.0 / 1440.0,
        limit_days: 2.0,
    };

    pub fn new(step_days: f64, limit_days: f64) -> Self {
        SearchParams {
            step_days,
            limit_days,
        }
    }

    /// Upper bound on samples one search direction can take
    pub fn max_samples(&self) -> usize {
        (self.limit_days / self.step_days).ceil() as usize + 2
    }
}
