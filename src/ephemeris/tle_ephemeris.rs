//! Earth satellites from two/three-line element sets
//!
//! Propagation is SGP4 in the TEME frame. TEME is rotated to an Earth-fixed
//! frame by Greenwich mean sidereal time, which is adequate for horizon
//! geometry at the element set's own accuracy.

use std::fmt;
use std::sync::Arc;

use log::warn;
use sgp4::{Constants, Elements};

use crate::ephemeris::spherical::{ecef_to_geodetic, gmst, observer_ecef};
use crate::error::{AstroError, Result};
use crate::utils::config::{EARTH_RADIUS_KM, SUN_RADIUS_KM};
use crate::utils::time_utils::{ephem_to_jd, ephem_to_naive_utc};
use crate::utils::vector_math::{dot_product, rotate_z, subtract, vector_magnitude};

/// An element set ready for propagation. Cloning is cheap.
#[derive(Clone)]
pub struct Satellite {
    name: String,
    elements: Arc<Elements>,
    constants: Arc<Constants>,
}

impl Satellite {
    /// Parse a named element set.
    ///
    /// # Arguments
    /// * `line0` - Name line (may be empty)
    /// * `line1` - First element line
    /// * `line2` - Second element line
    pub fn from_elements(line0: &str, line1: &str, line2: &str) -> Result<Self> {
        let name = line0.trim().trim_start_matches("0 ").to_string();
        let object_name = if name.is_empty() { None } else { Some(name.clone()) };

        let elements = Elements::from_tle(
            object_name,
            line1.trim_end().as_bytes(),
            line2.trim_end().as_bytes(),
        )
        .map_err(|e| {
            warn!("rejected element set '{name}': {e:?}");
            AstroError::MalformedElements(format!("TLE parse error: {e:?}"))
        })?;
        let constants = Constants::from_elements(&elements).map_err(|e| {
            warn!("rejected element set '{name}': {e:?}");
            AstroError::MalformedElements(format!("SGP4 constants error: {e:?}"))
        })?;

        Ok(Satellite {
            name,
            elements: Arc::new(elements),
            constants: Arc::new(constants),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    /// TEME position (km) at a continuous-scale instant
    pub fn teme_position(&self, mjd: f64) -> Result<[f64; 3]> {
        let naive_dt = ephem_to_naive_utc(mjd)?;
        let minutes_since_epoch = self
            .elements
            .datetime_to_minutes_since_epoch(&naive_dt)
            .map_err(|e| {
                AstroError::Propagation(format!(
                    "Failed to calculate minutes since epoch for {naive_dt}: {e:?}"
                ))
            })?;
        let pred = self.constants.propagate(minutes_since_epoch).map_err(|e| {
            warn!("propagation of '{}' failed at {naive_dt}: {e:?}", self.name);
            AstroError::Propagation(format!("Propagation error: {e:?}"))
        })?;
        Ok(pred.position)
    }

    /// Earth-fixed position (km) at a continuous-scale instant
    pub fn ecef_position(&self, mjd: f64) -> Result<[f64; 3]> {
        Ok(teme_to_ecef(&self.teme_position(mjd)?, mjd))
    }
}

/// Rotate a TEME vector into the Earth-fixed frame at a continuous-scale instant
#[inline]
pub fn teme_to_ecef(teme: &[f64; 3], mjd: f64) -> [f64; 3] {
    rotate_z(teme, gmst(ephem_to_jd(mjd)))
}

impl fmt::Debug for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Satellite")
            .field("name", &self.name)
            .field("norad_id", &self.elements.norad_id)
            .field("epoch", &self.elements.datetime)
            .finish()
    }
}

/// Topocentric `(altitude, azimuth, range_km)` of an Earth-fixed position
pub fn topocentric_horizontal(
    target: &[f64; 3],
    lat: f64,
    lon: f64,
    height_m: f64,
) -> (f64, f64, f64) {
    let d = subtract(target, &observer_ecef(lat, lon, height_m));
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    let east = -sin_lon * d[0] + cos_lon * d[1];
    let north = -sin_lat * cos_lon * d[0] - sin_lat * sin_lon * d[1] + cos_lat * d[2];
    let up = cos_lat * cos_lon * d[0] + cos_lat * sin_lon * d[1] + sin_lat * d[2];

    let alt = up.atan2((east * east + north * north).sqrt());
    let az = east.atan2(north).rem_euclid(std::f64::consts::TAU);
    (alt, az, vector_magnitude(&d))
}

/// Sub-satellite `(latitude, longitude, height_km)`
#[inline]
pub fn sub_satellite_point(ecef: &[f64; 3]) -> (f64, f64, f64) {
    ecef_to_geodetic(ecef)
}

/// Distance of a point from the Earth-shadow axis and the umbra radius at
/// that depth, or `None` when the point is on the sunlit side of Earth.
fn umbra_geometry(pos: &[f64; 3], sun_pos: &[f64; 3]) -> Option<(f64, f64)> {
    let sun_dist = vector_magnitude(sun_pos);
    if sun_dist <= 0.0 {
        return None;
    }
    let sun_unit = [
        sun_pos[0] / sun_dist,
        sun_pos[1] / sun_dist,
        sun_pos[2] / sun_dist,
    ];

    // Point must be behind Earth relative to Sun direction.
    let dot = dot_product(pos, &sun_unit);
    if dot >= 0.0 {
        return None;
    }
    let s = -dot;

    let perp = [
        pos[0] - sun_unit[0] * dot,
        pos[1] - sun_unit[1] * dot,
        pos[2] - sun_unit[2] * dot,
    ];

    // Umbra radius decreases linearly to zero at the cone apex.
    let l_umbra = EARTH_RADIUS_KM * sun_dist / (SUN_RADIUS_KM - EARTH_RADIUS_KM);
    let umbra_radius = if s <= l_umbra {
        EARTH_RADIUS_KM * (1.0 - s / l_umbra)
    } else {
        0.0
    };
    Some((vector_magnitude(&perp), umbra_radius))
}

/// Whether a geocentric position lies in Earth's umbra.
///
/// Both vectors must be in the same equatorial frame (km).
pub fn is_eclipsed(pos: &[f64; 3], sun_pos: &[f64; 3]) -> bool {
    umbra_geometry(pos, sun_pos).is_some_and(|(dist_to_axis, umbra_radius)| {
        umbra_radius > 0.0 && dist_to_axis < umbra_radius
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::AU_KM;
    use crate::utils::time_utils::epoch_to_ephem_time;

    const ISS_NAME: &str = "ISS (ZARYA)";
    const ISS_L1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_L2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";
    // 2008-09-20T12:25:40Z, the element set epoch
    const ISS_EPOCH_SECONDS: f64 = 1_221_913_540.0;

    #[test]
    fn test_parse_and_propagate_low_orbit() {
        let sat = Satellite::from_elements(ISS_NAME, ISS_L1, ISS_L2).unwrap();
        assert_eq!(sat.name(), "ISS (ZARYA)");
        assert_eq!(sat.norad_id(), 25544);

        let ecef = sat.ecef_position(epoch_to_ephem_time(ISS_EPOCH_SECONDS)).unwrap();
        let (lat, _lon, height) = sub_satellite_point(&ecef);
        assert!(height > 300.0 && height < 420.0, "height {height} km");
        assert!(lat.to_degrees().abs() <= 52.0);
    }

    #[test]
    fn test_malformed_lines_rejected() {
        let err = Satellite::from_elements("junk", "1 garbage", "2 garbage").unwrap_err();
        assert!(matches!(err, AstroError::MalformedElements(_)));
    }

    #[test]
    fn test_umbra_behind_earth_only() {
        let sun = [AU_KM, 0.0, 0.0];
        assert!(is_eclipsed(&[-7000.0, 0.0, 0.0], &sun));
        assert!(!is_eclipsed(&[7000.0, 0.0, 0.0], &sun));
        assert!(!is_eclipsed(&[-7000.0, 7000.0, 0.0], &sun));
    }

    #[test]
    fn test_zenith_target_is_overhead() {
        let lat = 0.6;
        let lon = -1.2;
        let below = observer_ecef(lat, lon, 0.0);
        let above = observer_ecef(lat, lon, 400_000.0);
        let (alt, _az, range) = topocentric_horizontal(&above, lat, lon, 0.0);
        assert!((alt.to_degrees() - 90.0).abs() < 1e-6);
        assert!((range - vector_magnitude(&subtract(&above, &below))).abs() < 1e-9);
    }
}
