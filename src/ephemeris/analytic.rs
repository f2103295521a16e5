//! Built-in analytic ephemeris engine

use crate::ephemeris::ephemeris_common::{Body, BodyState, EphemerisEngine, SatelliteState};
use crate::ephemeris::solar_system::{geocentric_position, sun_position, Planet};
use crate::ephemeris::spherical::{
    centuries_since_j2000, gast, horizontal_from_equatorial, observer_ecef, refraction_deg,
};
use crate::ephemeris::star::{observed_horizontal, FixedStar};
use crate::ephemeris::tle_ephemeris::{
    is_eclipsed, sub_satellite_point, teme_to_ecef, topocentric_horizontal, Satellite,
};
use crate::error::Result;
use crate::observer::ObservationContext;
use crate::utils::time_utils::{ephem_to_jd, ephem_to_jd_tt};
use crate::utils::vector_math::{subtract, vector_to_radec};

/// Analytic Sun, Moon and planet theories, SOFA for stars and SGP4 for
/// satellites. Stateless, so one value can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        AnalyticEphemeris
    }

    fn evaluate_planet(&self, ctx: &ObservationContext, planet: Planet) -> BodyState {
        let jd = ephem_to_jd(ctx.mjd);
        let t = centuries_since_j2000(ephem_to_jd_tt(ctx.mjd));
        let geo = geocentric_position(planet, t);
        let last = gast(jd, t) + ctx.longitude;

        // Parallax: shift the origin to the observer, expressed in the equatorial frame of date
        let observer = observer_ecef(ctx.latitude, last, ctx.elevation_m());
        let (ra_topo, dec_topo, _) = vector_to_radec(&subtract(&geo.to_vector(), &observer));
        let (alt, az) = horizontal_from_equatorial(ctx.latitude, last - ra_topo, dec_topo);

        let alt_deg = alt.to_degrees();
        BodyState {
            altitude: alt_deg + refraction_deg(alt_deg, ctx.pressure_hpa, ctx.temperature_c),
            azimuth: az.to_degrees(),
            ra: geo.ra.to_degrees(),
            dec: geo.dec.to_degrees(),
            distance_km: geo.distance_km,
            satellite: None,
        }
    }

    fn evaluate_star(&self, ctx: &ObservationContext, star: &FixedStar) -> Result<BodyState> {
        let (alt, az) = observed_horizontal(star, ctx)?;
        Ok(BodyState {
            altitude: alt.to_degrees(),
            azimuth: az.to_degrees(),
            ra: star.ra,
            dec: star.dec,
            distance_km: 0.0,
            satellite: None,
        })
    }

    fn evaluate_satellite(&self, ctx: &ObservationContext, sat: &Satellite) -> Result<BodyState> {
        let teme = sat.teme_position(ctx.mjd)?;
        let ecef = teme_to_ecef(&teme, ctx.mjd);

        let (alt, az, range_km) =
            topocentric_horizontal(&ecef, ctx.latitude, ctx.longitude, ctx.elevation_m());
        let (sub_lat, sub_lon, height_km) = sub_satellite_point(&ecef);

        let t = centuries_since_j2000(ephem_to_jd_tt(ctx.mjd));
        let eclipsed = is_eclipsed(&teme, &sun_position(t).to_vector());
        let (ra, dec, distance_km) = vector_to_radec(&teme);

        let alt_deg = alt.to_degrees();
        Ok(BodyState {
            altitude: alt_deg + refraction_deg(alt_deg, ctx.pressure_hpa, ctx.temperature_c),
            azimuth: az.to_degrees(),
            ra: ra.to_degrees(),
            dec: dec.to_degrees(),
            distance_km,
            satellite: Some(SatelliteState {
                sub_latitude: sub_lat.to_degrees(),
                sub_longitude: sub_lon.to_degrees(),
                elevation_m: height_km * 1000.0,
                range_km,
                eclipsed,
            }),
        })
    }
}

impl EphemerisEngine for AnalyticEphemeris {
    fn evaluate(&self, ctx: &ObservationContext, body: &Body) -> Result<BodyState> {
        match body {
            Body::Planet(planet) => Ok(self.evaluate_planet(ctx, *planet)),
            Body::Star(star) => self.evaluate_star(ctx, star),
            Body::Satellite(sat) => self.evaluate_satellite(ctx, sat),
        }
    }
}
