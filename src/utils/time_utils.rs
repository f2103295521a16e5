//! Time utilities for astronomical calculations
//!
//! The continuous date scale used by every search is fractional days since
//! 1899-12-31T12:00 UT (`mjd` throughout the crate). Public entry points take
//! Unix epoch seconds.

use crate::error::{AstroError, Result};
use crate::utils::config::{EPHEM_EPOCH_OFFSET_SECONDS, MJD0, SECONDS_PER_DAY};
use crate::utils::hifi_time;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Convert Unix epoch seconds to the continuous date scale
#[inline]
pub fn epoch_to_ephem_time(seconds: f64) -> f64 {
    (seconds + EPHEM_EPOCH_OFFSET_SECONDS) / SECONDS_PER_DAY
}

/// Convert the continuous date scale back to Unix epoch seconds
#[inline]
pub fn ephem_to_epoch_time(mjd: f64) -> f64 {
    mjd * SECONDS_PER_DAY - EPHEM_EPOCH_OFFSET_SECONDS
}

/// Julian date (UT) of a continuous-scale instant
#[inline]
pub fn ephem_to_jd(mjd: f64) -> f64 {
    mjd + MJD0
}

/// Get TT-UTC offset in days
#[inline]
pub fn get_tt_offset_days(mjd: f64) -> f64 {
    hifi_time::get_tt_utc_offset_seconds(ephem_to_epoch_time(mjd)) / SECONDS_PER_DAY
}

/// Julian date (TT) of a continuous-scale instant
#[inline]
pub fn ephem_to_jd_tt(mjd: f64) -> f64 {
    ephem_to_jd(mjd) + get_tt_offset_days(mjd)
}

/// Convert chrono DateTime<Utc> to the continuous date scale
pub fn datetime_to_ephem(dt: &DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9;
    epoch_to_ephem_time(seconds)
}

/// Convert a continuous-scale instant to chrono DateTime<Utc>
pub fn ephem_to_datetime(mjd: f64) -> Result<DateTime<Utc>> {
    let seconds = ephem_to_epoch_time(mjd);
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).ok_or(AstroError::TimeOutOfRange(seconds))
}

/// Naive UTC timestamp, the form sgp4 propagates against
pub fn ephem_to_naive_utc(mjd: f64) -> Result<NaiveDateTime> {
    Ok(ephem_to_datetime(mjd)?.naive_utc())
}
