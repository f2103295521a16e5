//! Geocentric positions of the Sun, Moon and planets
//!
//! Low-precision analytic theories: the Sun from its mean elements and
//! equation of centre, the Moon from the largest periodic terms of its
//! longitude, latitude and distance series, and the planets from J2000
//! Keplerian elements with secular rates (valid 1800-2050). Errors are at
//! the arc-minute level, well inside a one-minute search step.

use crate::ephemeris::spherical::{
    ecliptic_to_equatorial, mean_obliquity, norm_2pi, nutation, precess_from_j2000,
};
use crate::utils::config::AU_KM;
use crate::utils::vector_math::{radec_to_unit_vector, subtract, vector_to_radec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named solar-system bodies in catalogue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Sun,
    Moon,
}

impl Planet {
    pub const ALL: [Planet; 10] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
        Planet::Sun,
        Planet::Moon,
    ];

    /// Body at a catalogue index (0 = Mercury ... 9 = Moon)
    pub fn from_index(index: usize) -> Option<Planet> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apparent geocentric equatorial position of date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricPosition {
    pub ra: f64,
    pub dec: f64,
    pub distance_km: f64,
}

impl GeocentricPosition {
    /// Equatorial cartesian position (km)
    pub fn to_vector(&self) -> [f64; 3] {
        let u = radec_to_unit_vector(self.ra, self.dec);
        [u[0] * self.distance_km, u[1] * self.distance_km, u[2] * self.distance_km]
    }
}

/// Geocentric position of `planet` at `t` Julian centuries (TT) from J2000
pub fn geocentric_position(planet: Planet, t: f64) -> GeocentricPosition {
    match planet {
        Planet::Sun => sun_position(t),
        Planet::Moon => moon_position(t),
        _ => planet_position(planet, t),
    }
}

pub fn sun_position(t: f64) -> GeocentricPosition {
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = 357.52911 + 35999.05029 * t - 0.0001537 * t * t;
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;
    let m_rad = m.to_radians();

    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin()
        + 0.000289 * (3.0 * m_rad).sin();
    let true_lon = l0 + c;
    let nu = (m + c).to_radians();
    let r_au = 1.000001018 * (1.0 - e * e) / (1.0 + e * nu.cos());

    let (dpsi, deps) = nutation(t);
    // Aberration
    let lambda = true_lon.to_radians() - 0.00569_f64.to_radians() + dpsi;
    let (ra, dec) = ecliptic_to_equatorial(lambda, 0.0, mean_obliquity(t) + deps);

    GeocentricPosition {
        ra,
        dec,
        distance_km: r_au * AU_KM,
    }
}

// Multiples of D, M, M', F; longitude (1e-6 deg) and distance (1e-3 km) coefficients
const MOON_LR: [(i8, i8, i8, i8, f64, f64); 32] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
];

// Multiples of D, M, M', F; latitude coefficient (1e-6 deg)
const MOON_B: [(i8, i8, i8, i8, f64); 20] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
];

pub fn moon_position(t: f64) -> GeocentricPosition {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let lp = 218.3164477 + 481_267.88123421 * t - 0.0015786 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.8501921 + 445_267.1114034 * t - 0.0018819 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.5291092 + 35_999.0502909 * t - 0.0001536 * t2 + t3 / 24_490_000.0;
    let mp = 134.9633964 + 477_198.8675055 * t + 0.0087414 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.2720950 + 483_202.0175233 * t - 0.0036539 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;
    // Eccentricity of Earth's orbit scales terms in M
    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;

    let argument = |cd: i8, cm: i8, cmp: i8, cf: i8| {
        (cd as f64 * d + cm as f64 * m + cmp as f64 * mp + cf as f64 * f).to_radians()
    };
    let e_factor = |cm: i8| e.powi(cm.unsigned_abs() as i32);

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(cd, cm, cmp, cf, l, r) in MOON_LR.iter() {
        let arg = argument(cd, cm, cmp, cf);
        sum_l += l * e_factor(cm) * arg.sin();
        sum_r += r * e_factor(cm) * arg.cos();
    }
    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, b) in MOON_B.iter() {
        sum_b += b * e_factor(cm) * argument(cd, cm, cmp, cf).sin();
    }

    let sin_deg = |x: f64| x.to_radians().sin();
    sum_l += 3958.0 * sin_deg(a1) + 1962.0 * sin_deg(lp - f) + 318.0 * sin_deg(a2);
    sum_b += -2235.0 * sin_deg(lp) + 382.0 * sin_deg(a3) + 175.0 * sin_deg(a1 - f)
        + 175.0 * sin_deg(a1 + f)
        + 127.0 * sin_deg(lp - mp)
        - 115.0 * sin_deg(lp + mp);

    let (dpsi, deps) = nutation(t);
    let lambda = (lp + sum_l / 1e6).to_radians() + dpsi;
    let beta = (sum_b / 1e6).to_radians();
    let (ra, dec) = ecliptic_to_equatorial(lambda, beta, mean_obliquity(t) + deps);

    GeocentricPosition {
        ra,
        dec,
        distance_km: 385_000.56 + sum_r / 1000.0,
    }
}

/// Keplerian elements at J2000 and their rates per Julian century:
/// a (au), e, I, L, long. perihelion, long. ascending node (degrees)
struct OrbitalElements {
    at_epoch: [f64; 6],
    rate: [f64; 6],
}

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    at_epoch: [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
    rate: [0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
};

fn orbital_elements(planet: Planet) -> Option<OrbitalElements> {
    let elements = match planet {
        Planet::Mercury => OrbitalElements {
            at_epoch: [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593],
            rate: [0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
        },
        Planet::Venus => OrbitalElements {
            at_epoch: [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255],
            rate: [0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
        },
        Planet::Mars => OrbitalElements {
            at_epoch: [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891],
            rate: [0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
        },
        Planet::Jupiter => OrbitalElements {
            at_epoch: [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909],
            rate: [-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106],
        },
        Planet::Saturn => OrbitalElements {
            at_epoch: [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448],
            rate: [-0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794],
        },
        Planet::Uranus => OrbitalElements {
            at_epoch: [19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503],
            rate: [-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589],
        },
        Planet::Neptune => OrbitalElements {
            at_epoch: [30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574],
            rate: [0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.00508664],
        },
        Planet::Pluto => OrbitalElements {
            at_epoch: [39.48211675, 0.24882730, 17.14001206, 238.92903833, 224.06891629, 110.30393684],
            rate: [-0.00031596, 0.00005170, 0.00004818, 145.20780515, -0.04062942, -0.01183482],
        },
        Planet::Sun | Planet::Moon => return None,
    };
    Some(elements)
}

/// Heliocentric ecliptic J2000 position (au)
fn heliocentric_position(elements: &OrbitalElements, t: f64) -> [f64; 3] {
    let el: [f64; 6] = std::array::from_fn(|i| elements.at_epoch[i] + elements.rate[i] * t);
    let (a, e) = (el[0], el[1]);
    let incl = el[2].to_radians();
    let node = el[5].to_radians();
    let arg_peri = (el[4] - el[5]).to_radians();
    let mean_anomaly = norm_2pi((el[3] - el[4]).to_radians());

    // Kepler's equation by Newton iteration
    let mut ecc_anomaly = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..10 {
        let delta = (ecc_anomaly - e * ecc_anomaly.sin() - mean_anomaly)
            / (1.0 - e * ecc_anomaly.cos());
        ecc_anomaly -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }

    let xp = a * (ecc_anomaly.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sw, cw) = arg_peri.sin_cos();
    let (so, co) = node.sin_cos();
    let (si, ci) = incl.sin_cos();
    [
        (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
        (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
        sw * si * xp + cw * si * yp,
    ]
}

fn planet_position(planet: Planet, t: f64) -> GeocentricPosition {
    let Some(elements) = orbital_elements(planet) else {
        return sun_position(t);
    };
    let helio = heliocentric_position(&elements, t);
    let earth = heliocentric_position(&EARTH_MOON_BARYCENTER, t);
    let geo = subtract(&helio, &earth);

    // Ecliptic J2000 -> equatorial J2000 -> mean equator of date
    let (se, ce) = mean_obliquity(0.0).sin_cos();
    let eq = [geo[0], geo[1] * ce - geo[2] * se, geo[1] * se + geo[2] * ce];
    let (ra0, dec0, dist_au) = vector_to_radec(&eq);
    let (ra, dec) = precess_from_j2000(ra0, dec0, t);

    GeocentricPosition {
        ra,
        dec,
        distance_km: dist_au * AU_KM,
    }
}
