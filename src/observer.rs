//! Observer configuration
//!
//! An [`ObservationContext`] is a small `Copy` value. Searches take it by
//! value and move its instant around freely; the caller's copy never changes.

use crate::error::Result;
use crate::utils::config::{DEFAULT_PRESSURE_HPA, DEFAULT_TEMPERATURE_C, ERAD_M, J2000_MJD};
use crate::utils::time_utils::{ephem_to_epoch_time, epoch_to_ephem_time};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationContext {
    /// East longitude, radians
    pub longitude: f64,
    /// Geodetic latitude, radians
    pub latitude: f64,
    /// Height above the ellipsoid in Earth radii
    pub elevation: f64,
    pub pressure_hpa: f64,
    pub temperature_c: f64,
    /// Horizon dip, radians
    pub dip: f64,
    /// Reference epoch of catalog coordinates on the continuous date scale
    pub epoch: f64,
    /// Current instant on the continuous date scale
    pub mjd: f64,
}

impl ObservationContext {
    /// Build a context for an observer at `longitude`/`latitude` degrees and
    /// `altitude_m` meters, at Unix time `seconds`.
    pub fn new(longitude: f64, latitude: f64, altitude_m: f64, seconds: f64) -> Self {
        ObservationContext {
            longitude: longitude.to_radians(),
            latitude: latitude.to_radians(),
            elevation: altitude_m / ERAD_M,
            pressure_hpa: DEFAULT_PRESSURE_HPA,
            temperature_c: DEFAULT_TEMPERATURE_C,
            dip: 0.0,
            epoch: J2000_MJD,
            mjd: epoch_to_ephem_time(seconds),
        }
    }

    /// Geocentric context with no atmosphere, used for Sun/Moon longitudes
    pub fn geocentric(mjd: f64) -> Self {
        ObservationContext {
            longitude: 0.0,
            latitude: 0.0,
            elevation: 0.0,
            pressure_hpa: 0.0,
            temperature_c: DEFAULT_TEMPERATURE_C,
            dip: 0.0,
            epoch: J2000_MJD,
            mjd,
        }
    }

    /// Same observer at another instant
    #[inline]
    pub fn at(&self, mjd: f64) -> Self {
        ObservationContext { mjd, ..*self }
    }

    #[inline]
    pub fn elevation_m(&self) -> f64 {
        self.elevation * ERAD_M
    }

    #[inline]
    pub fn epoch_seconds(&self) -> f64 {
        ephem_to_epoch_time(self.mjd)
    }
}

/// Atmosphere used for refraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub pressure_hpa: f64,
    pub temperature_c: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Atmosphere {
            pressure_hpa: DEFAULT_PRESSURE_HPA,
            temperature_c: DEFAULT_TEMPERATURE_C,
        }
    }
}

/// Observer location as read from configuration
///
/// ```json
/// { "longitude": -0.1, "latitude": 51.5, "altitude": 35.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverSite {
    /// East longitude, degrees
    pub longitude: f64,
    /// Latitude, degrees
    pub latitude: f64,
    /// Meters above the ellipsoid
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub atmosphere: Atmosphere,
    /// Horizon dip, degrees
    #[serde(default)]
    pub dip: f64,
}

impl ObserverSite {
    pub fn new(longitude: f64, latitude: f64, altitude: f64) -> Self {
        ObserverSite {
            longitude,
            latitude,
            altitude,
            atmosphere: Atmosphere::default(),
            dip: 0.0,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Observation context for this site at Unix time `seconds`
    pub fn context_at(&self, seconds: f64) -> ObservationContext {
        ObservationContext {
            pressure_hpa: self.atmosphere.pressure_hpa,
            temperature_c: self.atmosphere.temperature_c,
            dip: self.dip.to_radians(),
            ..ObservationContext::new(self.longitude, self.latitude, self.altitude, seconds)
        }
    }
}
