//! Event searches built on an [`EphemerisEngine`](crate::ephemeris::EphemerisEngine)

pub mod altitude_search;
pub mod lunar_phase;
pub mod riseset;
pub mod satellite_pass;
pub mod star_riset;
pub mod track;
pub mod twilight;

pub use altitude_search::{find_altitude_crossing, Crossing, CrossingQuery, Event, SearchDirection};
pub use lunar_phase::{find_moon_phase, lunar_phase, moon_illumination, LunarPhase};
pub use riseset::{resolve_rise_set, Orientation, RiseSetStatus, RiseSetTransit};
pub use satellite_pass::{next_pass, SatellitePass, VisibleWindow};
pub use star_riset::star_rise_set;
pub use track::altitude_track;
pub use twilight::{classify_twilight, BandDirection, SunState, TwilightBand, TwilightSegment};
