//! Shared constants, time scales and small math helpers

pub mod config;
pub mod hifi_time;
pub mod julian_date;
pub mod moon;
pub mod time_utils;
pub mod vector_math;

pub use julian_date::CalendarDate;
