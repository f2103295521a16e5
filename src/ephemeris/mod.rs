//! Ephemeris primitives behind the [`EphemerisEngine`] trait

pub mod analytic;
pub mod ephemeris_common;
pub mod solar_system;
pub mod spherical;
pub mod star;
pub mod tle_ephemeris;

pub use analytic::AnalyticEphemeris;
pub use ephemeris_common::{Body, BodyState, EphemerisEngine, SatelliteState};
pub use solar_system::Planet;
pub use spherical::{basic_rise_set, horizontal_from_equatorial, BasicRiseSet};
pub use star::FixedStar;
pub use tle_ephemeris::Satellite;
