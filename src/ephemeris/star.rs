//! Fixed stars: catalog place to observed horizontal coordinates

use serde::{Deserialize, Serialize};
use sofars::astro::atco13;
use std::f64::consts::FRAC_PI_2;

use crate::error::{AstroError, Result};
use crate::observer::ObservationContext;
use crate::utils::config::J2000_MJD;
use crate::utils::hifi_time::unix_seconds_to_jd_utc;

const MAS_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0 * 1000.0);
const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Catalog position of a star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedStar {
    /// Right ascension at the context epoch, degrees
    pub ra: f64,
    /// Declination at the context epoch, degrees
    pub dec: f64,
    /// Proper motion in RA times cos(Dec), mas/yr
    #[serde(default)]
    pub pm_ra: f64,
    /// Proper motion in Dec, mas/yr
    #[serde(default)]
    pub pm_dec: f64,
}

impl FixedStar {
    pub fn new(ra: f64, dec: f64) -> Self {
        FixedStar {
            ra,
            dec,
            pm_ra: 0.0,
            pm_dec: 0.0,
        }
    }

    pub fn with_proper_motion(ra: f64, dec: f64, pm_ra: f64, pm_dec: f64) -> Self {
        FixedStar {
            ra,
            dec,
            pm_ra,
            pm_dec,
        }
    }

    /// Proper motion in radians per year as SOFA expects (dRA/dt, dDec/dt)
    fn proper_motion_rad(&self) -> (f64, f64) {
        let cos_dec = self.dec.to_radians().cos().max(1e-9);
        (self.pm_ra * MAS_TO_RAD / cos_dec, self.pm_dec * MAS_TO_RAD)
    }

    /// Catalog RA/Dec (radians) carried from the context epoch to J2000
    fn j2000_place(&self, ctx: &ObservationContext) -> (f64, f64) {
        let (pr, pd) = self.proper_motion_rad();
        let years = (J2000_MJD - ctx.epoch) / DAYS_PER_JULIAN_YEAR;
        (self.ra.to_radians() + pr * years, self.dec.to_radians() + pd * years)
    }
}

/// Observed `(altitude, azimuth)` in radians, refraction included
pub fn observed_horizontal(star: &FixedStar, ctx: &ObservationContext) -> Result<(f64, f64)> {
    let (ra_rad, dec_rad) = star.j2000_place(ctx);
    let (pr, pd) = star.proper_motion_rad();
    let (utc1, utc2) = unix_seconds_to_jd_utc(ctx.epoch_seconds());

    let (aob, zob, _hob, _dob, _rob, _eo) = atco13(
        ra_rad,
        dec_rad,
        pr,
        pd,
        0.0,
        0.0,
        utc1,
        utc2,
        0.0,
        ctx.longitude,
        ctx.latitude,
        ctx.elevation_m(),
        0.0,
        0.0,
        ctx.pressure_hpa,
        ctx.temperature_c,
        0.0,
        0.55,
    )
    .map_err(|e| AstroError::StarPosition(format!("SOFA atco13 failed: {e:?}")))?;

    Ok((FRAC_PI_2 - zob, aob))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polaris_altitude_tracks_latitude() {
        let polaris = FixedStar::with_proper_motion(37.954_56, 89.264_11, 44.48, -11.85);
        // 2024-03-20T00:00Z
        let ctx = ObservationContext::new(10.0, 48.0, 300.0, 1_710_892_800.0);
        let (alt, az) = observed_horizontal(&polaris, &ctx).unwrap();
        assert!((alt.to_degrees() - 48.0).abs() < 1.0, "Polaris altitude {}", alt.to_degrees());
        let az_deg = az.to_degrees();
        assert!(az_deg < 2.0 || az_deg > 358.0, "Polaris azimuth {az_deg}");
    }
}
