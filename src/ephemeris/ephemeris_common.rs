//! Body descriptors, evaluated body state, and the engine trait every event
//! search is generic over

use serde::Serialize;

use crate::ephemeris::solar_system::Planet;
use crate::ephemeris::spherical::{
    centuries_since_j2000, equatorial_to_ecliptic, gast, norm_2pi, true_obliquity,
};
use crate::ephemeris::star::FixedStar;
use crate::ephemeris::tle_ephemeris::Satellite;
use crate::error::Result;
use crate::observer::ObservationContext;
use crate::utils::time_utils::{ephem_to_jd, ephem_to_jd_tt};

/// What to evaluate. Descriptors are immutable and passed by reference into
/// each evaluation; nothing about a body is cached between calls.
#[derive(Debug, Clone)]
pub enum Body {
    Planet(Planet),
    Star(FixedStar),
    Satellite(Satellite),
}

impl Body {
    /// Parse a satellite element set into a body
    pub fn satellite_from_elements(line0: &str, line1: &str, line2: &str) -> Result<Self> {
        Ok(Body::Satellite(Satellite::from_elements(line0, line1, line2)?))
    }

    pub fn is_satellite(&self) -> bool {
        matches!(self, Body::Satellite(_))
    }

    pub fn name(&self) -> String {
        match self {
            Body::Planet(p) => p.name().to_string(),
            Body::Star(s) => format!("RA {:.4} Dec {:+.4}", s.ra, s.dec),
            Body::Satellite(s) => s.name().to_string(),
        }
    }
}

impl From<Planet> for Body {
    fn from(planet: Planet) -> Self {
        Body::Planet(planet)
    }
}

impl From<FixedStar> for Body {
    fn from(star: FixedStar) -> Self {
        Body::Star(star)
    }
}

impl From<Satellite> for Body {
    fn from(sat: Satellite) -> Self {
        Body::Satellite(sat)
    }
}

/// Satellite-only fields of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SatelliteState {
    /// Sub-satellite latitude, degrees
    pub sub_latitude: f64,
    /// Sub-satellite east longitude, degrees
    pub sub_longitude: f64,
    /// Height above the ellipsoid, meters
    pub elevation_m: f64,
    /// Observer to satellite distance, km
    pub range_km: f64,
    /// In Earth's umbra
    pub eclipsed: bool,
}

/// A body evaluated at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyState {
    /// Apparent altitude, degrees
    pub altitude: f64,
    /// Azimuth east of north, degrees in [0, 360)
    pub azimuth: f64,
    /// Geocentric apparent right ascension, degrees
    pub ra: f64,
    /// Geocentric apparent declination, degrees
    pub dec: f64,
    /// Geocentric distance, km (0 for stars)
    pub distance_km: f64,
    pub satellite: Option<SatelliteState>,
}

/// The ephemeris primitives the event searches are built on.
///
/// Only [`evaluate`](EphemerisEngine::evaluate) is required; sidereal time
/// and ecliptic conversion have analytic defaults.
pub trait EphemerisEngine {
    /// Position of `body` as seen from the context's observer at its instant
    fn evaluate(&self, ctx: &ObservationContext, body: &Body) -> Result<BodyState>;

    /// Local apparent sidereal time, hours in [0, 24)
    fn local_sidereal_time(&self, ctx: &ObservationContext) -> f64 {
        let t = centuries_since_j2000(ephem_to_jd_tt(ctx.mjd));
        let lst = norm_2pi(gast(ephem_to_jd(ctx.mjd), t) + ctx.longitude);
        lst.to_degrees() / 15.0
    }

    /// Ecliptic `(latitude, longitude)` of date in degrees from geocentric RA/Dec in degrees
    fn ecliptic_coordinates(&self, mjd: f64, ra: f64, dec: f64) -> (f64, f64) {
        let eps = true_obliquity(centuries_since_j2000(ephem_to_jd_tt(mjd)));
        let (lat, lon) = equatorial_to_ecliptic(ra.to_radians(), dec.to_radians(), eps);
        (lat.to_degrees(), lon.to_degrees())
    }
}
