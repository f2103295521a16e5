//! Spherical astronomy primitives
//!
//! Angles are radians unless a name says otherwise. Time arguments named `t`
//! are Julian centuries of TT from J2000.0.

use crate::utils::config::{
    DAYS_PER_JULIAN_CENTURY, EARTH_FLATTENING, EARTH_RADIUS_KM, JD_J2000,
};
use serde::Serialize;
use std::f64::consts::{PI, TAU};

const ARCSEC: f64 = PI / (180.0 * 3600.0);

/// Reduce an angle to [0, 2π)
#[inline]
pub fn norm_2pi(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Reduce an angle in degrees to (-180, 180]
#[inline]
pub fn norm_pm180(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// Julian centuries from J2000.0
#[inline]
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - JD_J2000) / DAYS_PER_JULIAN_CENTURY
}

/// Horizontal coordinates from hour angle and declination.
///
/// # Arguments
/// * `lat` - Observer latitude
/// * `ha` - Local hour angle
/// * `dec` - Declination
///
/// # Returns
/// `(altitude, azimuth)` with azimuth measured from north through east in [0, 2π)
pub fn horizontal_from_equatorial(lat: f64, ha: f64, dec: f64) -> (f64, f64) {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_ha, cos_ha) = ha.sin_cos();

    let sin_alt = sin_lat * sin_dec + cos_lat * cos_dec * cos_ha;
    let alt = sin_alt.clamp(-1.0, 1.0).asin();
    let az = (-cos_dec * sin_ha).atan2(sin_dec * cos_lat - cos_dec * sin_lat * cos_ha);
    (alt, norm_2pi(az))
}

/// Outcome of the closed-form rise/set of a fixed equatorial position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BasicRiseSet {
    /// Local sidereal angles and azimuths of the horizon crossings
    Crosses {
        rise_lst: f64,
        set_lst: f64,
        rise_az: f64,
        set_az: f64,
    },
    /// Never goes below the horizon
    Circumpolar,
    /// Never comes above the horizon
    NeverRises,
}

/// Closed-form rise and set of a fixed RA/Dec.
///
/// `horizon_offset` is how far below the geometric horizon the crossing is
/// taken (positive for refraction or dip).
pub fn basic_rise_set(ra: f64, dec: f64, lat: f64, horizon_offset: f64) -> BasicRiseSet {
    let h0 = -horizon_offset;
    let denom = lat.cos() * dec.cos();
    let numer = h0.sin() - lat.sin() * dec.sin();

    if denom.abs() < 1e-12 {
        // Observer at a pole or body at a celestial pole: altitude never changes
        return if -numer >= 0.0 {
            BasicRiseSet::Circumpolar
        } else {
            BasicRiseSet::NeverRises
        };
    }

    let cos_h = numer / denom;
    if cos_h < -1.0 {
        return BasicRiseSet::Circumpolar;
    }
    if cos_h > 1.0 {
        return BasicRiseSet::NeverRises;
    }

    let h = cos_h.acos();
    let cos_az = ((dec.sin() + lat.sin() * h0.sin()) / (lat.cos() * h0.cos())).clamp(-1.0, 1.0);
    let az = cos_az.acos();

    BasicRiseSet::Crosses {
        rise_lst: norm_2pi(ra - h),
        set_lst: norm_2pi(ra + h),
        rise_az: az,
        set_az: TAU - az,
    }
}

/// Mean obliquity of the ecliptic
pub fn mean_obliquity(t: f64) -> f64 {
    let arcsec = 84_381.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    arcsec * ARCSEC
}

/// Nutation in longitude and obliquity (low precision, ~0.5")
pub fn nutation(t: f64) -> (f64, f64) {
    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let l_sun = (280.4665 + 36000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481_267.8813 * t).to_radians();

    let dpsi = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps = 9.20 * omega.cos() + 0.57 * (2.0 * l_sun).cos() + 0.10 * (2.0 * l_moon).cos()
        - 0.09 * (2.0 * omega).cos();
    (dpsi * ARCSEC, deps * ARCSEC)
}

/// True obliquity of the ecliptic
#[inline]
pub fn true_obliquity(t: f64) -> f64 {
    mean_obliquity(t) + nutation(t).1
}

/// Greenwich mean sidereal time for a UT Julian date
pub fn gmst(jd_ut: f64) -> f64 {
    let d = jd_ut - JD_J2000;
    let t = d / DAYS_PER_JULIAN_CENTURY;
    let deg = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    norm_2pi(deg.to_radians())
}

/// Greenwich apparent sidereal time (mean time plus the equation of the equinoxes)
pub fn gast(jd_ut: f64, t: f64) -> f64 {
    let (dpsi, _) = nutation(t);
    norm_2pi(gmst(jd_ut) + dpsi * true_obliquity(t).cos())
}

/// Equatorial from ecliptic coordinates
pub fn ecliptic_to_equatorial(lon: f64, lat: f64, eps: f64) -> (f64, f64) {
    let (sin_eps, cos_eps) = eps.sin_cos();
    let ra = (lon.sin() * cos_eps - lat.tan() * sin_eps).atan2(lon.cos());
    let dec = (lat.sin() * cos_eps + lat.cos() * sin_eps * lon.sin()).clamp(-1.0, 1.0).asin();
    (norm_2pi(ra), dec)
}

/// Ecliptic `(latitude, longitude)` from equatorial coordinates
pub fn equatorial_to_ecliptic(ra: f64, dec: f64, eps: f64) -> (f64, f64) {
    let (sin_eps, cos_eps) = eps.sin_cos();
    let lon = (ra.sin() * cos_eps + dec.tan() * sin_eps).atan2(ra.cos());
    let lat = (dec.sin() * cos_eps - dec.cos() * sin_eps * ra.sin()).clamp(-1.0, 1.0).asin();
    (lat, norm_2pi(lon))
}

/// Precess mean J2000 equatorial coordinates to the mean equator of date
pub fn precess_from_j2000(ra: f64, dec: f64, t: f64) -> (f64, f64) {
    let zeta = (2306.2181 * t + 0.30188 * t * t + 0.017998 * t * t * t) * ARCSEC;
    let z = (2306.2181 * t + 1.09468 * t * t + 0.018203 * t * t * t) * ARCSEC;
    let theta = (2004.3109 * t - 0.42665 * t * t - 0.041833 * t * t * t) * ARCSEC;

    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_th, cos_th) = theta.sin_cos();
    let a = cos_dec * (ra + zeta).sin();
    let b = cos_th * cos_dec * (ra + zeta).cos() - sin_th * sin_dec;
    let c = sin_th * cos_dec * (ra + zeta).cos() + cos_th * sin_dec;

    (norm_2pi(a.atan2(b) + z), c.clamp(-1.0, 1.0).asin())
}

/// Observer position in an Earth-fixed frame (km), WGS-84 ellipsoid
pub fn observer_ecef(lat: f64, lon: f64, height_m: f64) -> [f64; 3] {
    let e2 = EARTH_FLATTENING * (2.0 - EARTH_FLATTENING);
    let (sin_lat, cos_lat) = lat.sin_cos();
    let n = EARTH_RADIUS_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let h = height_m / 1000.0;
    [
        (n + h) * cos_lat * lon.cos(),
        (n + h) * cos_lat * lon.sin(),
        (n * (1.0 - e2) + h) * sin_lat,
    ]
}

/// Geodetic `(latitude, longitude, height_km)` of an Earth-fixed position
pub fn ecef_to_geodetic(pos: &[f64; 3]) -> (f64, f64, f64) {
    let e2 = EARTH_FLATTENING * (2.0 - EARTH_FLATTENING);
    let lon = pos[1].atan2(pos[0]);
    let p = (pos[0] * pos[0] + pos[1] * pos[1]).sqrt();

    let mut lat = pos[2].atan2(p * (1.0 - e2));
    let mut height = 0.0;
    for _ in 0..6 {
        let sin_lat = lat.sin();
        let n = EARTH_RADIUS_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        height = if lat.cos().abs() > 1e-10 {
            p / lat.cos() - n
        } else {
            pos[2].abs() - n * (1.0 - e2)
        };
        lat = pos[2].atan2(p * (1.0 - e2 * n / (n + height)));
    }
    (lat, lon, height)
}

/// Atmospheric refraction in degrees for a true altitude in degrees.
///
/// Saemundsson's formula scaled for pressure and temperature. Below -1° the
/// correction fades linearly to zero at -3° so that apparent altitude stays
/// continuous and increasing in true altitude.
pub fn refraction_deg(true_alt_deg: f64, pressure_hpa: f64, temperature_c: f64) -> f64 {
    if pressure_hpa <= 0.0 {
        return 0.0;
    }
    let saemundsson = |h: f64| {
        (pressure_hpa / 1010.0) * (283.0 / (273.0 + temperature_c)) * 1.02
            / (60.0 * (h + 10.3 / (h + 5.11)).to_radians().tan())
    };
    if true_alt_deg >= -1.0 {
        saemundsson(true_alt_deg.min(90.0))
    } else if true_alt_deg > -3.0 {
        saemundsson(-1.0) * (true_alt_deg + 3.0) / 2.0
    } else {
        0.0
    }
}
