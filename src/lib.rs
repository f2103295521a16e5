//! Rise, transit and set times, twilight, lunar phase and satellite passes
//! for an observer on the Earth.
//!
//! Event searches in [`events`] are generic over an
//! [`EphemerisEngine`]; [`AnalyticEphemeris`] is the built-in engine and
//! [`api`] wraps everything in functions over primitive inputs.

// Module declarations
pub mod api;
pub mod ephemeris;
pub mod error;
pub mod events;
pub mod observer;
pub mod utils;

// Re-export public API
pub use ephemeris::{AnalyticEphemeris, Body, BodyState, EphemerisEngine, FixedStar, Planet};
pub use ephemeris::{SatelliteState, Satellite};
pub use error::{AstroError, Result};
pub use events::{
    Event, LunarPhase, Orientation, RiseSetStatus, RiseSetTransit, SatellitePass, SunState,
    TwilightSegment, VisibleWindow,
};
pub use observer::{Atmosphere, ObservationContext, ObserverSite};
pub use utils::config::SearchParams;
pub use utils::CalendarDate;
