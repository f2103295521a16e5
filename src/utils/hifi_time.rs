//! Minimal hifitime utilities for time scale offsets
//!
//! Provides only the conversions needed between Unix seconds and hifitime Epoch.

use hifitime::{Duration, Epoch};

use crate::utils::config::{DEFAULT_TT_UTC_SECONDS, TT_TAI_SECONDS};

/// Convert Unix seconds to hifitime `Epoch`
#[inline]
pub fn unix_seconds_to_epoch(seconds: f64) -> Epoch {
    let nanos = (seconds * 1.0e9).round() as i128;
    Epoch::from_unix_duration(Duration::from_total_nanoseconds(nanos))
}

/// Get TT-UTC offset in seconds (TT-TAI + TAI-UTC = 32.184 + leap_seconds)
///
/// Instants before 1972 have no leap second entry and fall back to a fixed offset.
#[inline]
pub fn get_tt_utc_offset_seconds(seconds: f64) -> f64 {
    unix_seconds_to_epoch(seconds)
        .leap_seconds(true)
        .map_or(DEFAULT_TT_UTC_SECONDS, |tai_utc| TT_TAI_SECONDS + tai_utc)
}

/// Convert Unix seconds to the two-part UTC Julian date SOFA expects (JD1=2400000.5, JD2=MJD)
#[inline]
pub fn unix_seconds_to_jd_utc(seconds: f64) -> (f64, f64) {
    const JD1: f64 = 2400000.5;
    (JD1, unix_seconds_to_epoch(seconds).to_mjd_utc_days())
}
