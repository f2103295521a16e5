//! Calendar date <-> Julian date conversion
//!
//! Dates before 1582-10-15 are proleptic Julian calendar dates, later ones
//! Gregorian. Fractional days are rounded to the microsecond before being
//! split into clock fields, so a field that would read 59.9999999 s carries
//! into the next minute instead.

use crate::utils::config::{MJD0, SECONDS_PER_DAY};
use crate::utils::time_utils::{ephem_to_epoch_time, epoch_to_ephem_time};
use serde::{Deserialize, Serialize};
use std::fmt;

/// First Julian day number of the Gregorian calendar (1582-10-15)
const GREGORIAN_START_JDN: f64 = 2_299_161.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
    /// 0 = Sunday
    pub weekday: u32,
}

impl CalendarDate {
    /// Build a date from calendar fields; the weekday is derived.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        let mut date = CalendarDate {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday: 0,
        };
        date.weekday = weekday_of_jdn((date.to_julian_date() + 0.5).floor());
        date
    }

    /// Convert a Julian date to calendar fields
    pub fn from_julian_date(jd: f64) -> Self {
        let mut jdn = (jd + 0.5).floor();
        let mut seconds = ((jd + 0.5 - jdn) * SECONDS_PER_DAY * 1e6).round() / 1e6;
        if seconds >= SECONDS_PER_DAY {
            jdn += 1.0;
            seconds -= SECONDS_PER_DAY;
        }

        let c = if jdn < GREGORIAN_START_JDN {
            jdn + 1524.0
        } else {
            let b = ((jdn - 1_867_216.25) / 36_524.25).floor();
            jdn + b - (b / 4.0).floor() + 1525.0
        };
        let d = ((c - 122.1) / 365.25).floor();
        let e = (365.25 * d).floor();
        let f = ((c - e) / 30.6001).floor();

        let day = (c - e - (30.6001 * f).floor()) as u32;
        let month = if f < 14.0 { f - 1.0 } else { f - 13.0 } as u32;
        let year = (if month > 2 { d - 4716.0 } else { d - 4715.0 }) as i32;

        let hour = (seconds / 3600.0).floor();
        let minute = ((seconds - hour * 3600.0) / 60.0).floor();
        let second = seconds - hour * 3600.0 - minute * 60.0;

        CalendarDate {
            year,
            month,
            day,
            hour: hour as u32,
            minute: minute as u32,
            second,
            weekday: weekday_of_jdn(jdn),
        }
    }

    /// Convert calendar fields to a Julian date
    pub fn to_julian_date(&self) -> f64 {
        let (y, m) = if self.month <= 2 {
            (self.year - 1, self.month + 12)
        } else {
            (self.year, self.month)
        };

        // Century correction; -2 aligns the Julian branch with the same base constant
        let b = if self.is_gregorian() {
            (y / 400 - y / 100) as f64
        } else {
            -2.0
        };

        (365.25 * y as f64).floor()
            + (30.6001 * (m + 1) as f64).floor()
            + b
            + 1_720_996.5
            + self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / SECONDS_PER_DAY
    }

    /// Calendar date of a Unix epoch instant
    pub fn from_epoch_seconds(seconds: f64) -> Self {
        Self::from_julian_date(epoch_to_ephem_time(seconds) + MJD0)
    }

    pub fn to_epoch_seconds(&self) -> f64 {
        ephem_to_epoch_time(self.to_julian_date() - MJD0)
    }

    /// ISO-8601 UTC timestamp with five decimal places of seconds
    pub fn to_iso8601(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:08.5}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    fn is_gregorian(&self) -> bool {
        (self.year, self.month, self.day) >= (1582, 10, 15)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

#[inline]
fn weekday_of_jdn(jdn: f64) -> u32 {
    ((jdn as i64) + 1).rem_euclid(7) as u32
}
