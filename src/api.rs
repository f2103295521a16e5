//! Pure functions over primitive inputs
//!
//! Angles are degrees, instants are Unix epoch seconds, altitudes are meters
//! and satellites are given as element-set lines. Every function builds its
//! own observation context and uses the built-in [`AnalyticEphemeris`].

use serde::Serialize;

use crate::ephemeris::{AnalyticEphemeris, Body, EphemerisEngine, FixedStar, Planet};
use crate::error::{AstroError, Result};
use crate::events::altitude_search::{find_altitude_crossing, Crossing, CrossingQuery};
use crate::events::altitude_search::{Event, SearchDirection, TransitTracker};
use crate::events::lunar_phase::{self, LunarPhase};
use crate::events::riseset::{resolve_rise_set, Orientation, RiseSetTransit};
use crate::events::satellite_pass::{next_pass, SatellitePass};
use crate::events::star_riset;
use crate::events::twilight::{classify_twilight, TwilightSegment};
use crate::observer::ObservationContext;
use crate::utils::config::SearchParams;
use crate::utils::time_utils::{ephem_to_epoch_time, epoch_to_ephem_time};

const ENGINE: AnalyticEphemeris = AnalyticEphemeris;

/// Altitude and azimuth, degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalPosition {
    pub altitude: f64,
    pub azimuth: f64,
}

/// Rise, transit and set of one named body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetRiseSet {
    pub body: Planet,
    #[serde(flatten)]
    pub events: RiseSetTransit,
}

/// Where a satellite is over the Earth
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SatelliteStatus {
    /// Sub-satellite east longitude, degrees
    pub longitude: f64,
    /// Sub-satellite latitude, degrees
    pub latitude: f64,
    /// Height above the ellipsoid, meters
    pub elevation: f64,
    pub eclipsed: bool,
}

fn position_of(body: &Body, ctx: &ObservationContext) -> Result<HorizontalPosition> {
    let state = ENGINE.evaluate(ctx, body)?;
    Ok(HorizontalPosition {
        altitude: state.altitude,
        azimuth: state.azimuth,
    })
}

/// Rise, transit and set of a solar-system body.
///
/// With `up` the interval above the horizon is bracketed, otherwise the
/// interval below it.
pub fn object_rise_set(
    planet: Planet,
    longitude: f64,
    latitude: f64,
    altitude: f64,
    time: f64,
    up: bool,
) -> Result<RiseSetTransit> {
    let ctx = ObservationContext::new(longitude, latitude, altitude, time);
    let orientation = if up { Orientation::Up } else { Orientation::Down };
    resolve_rise_set(
        &ENGINE,
        &ctx,
        &Body::Planet(planet),
        orientation,
        0.0,
        SearchParams::SOLAR_SYSTEM,
    )
}

/// [`object_rise_set`] for every named body, in catalogue order
pub fn solar_system_rise_sets(
    longitude: f64,
    latitude: f64,
    altitude: f64,
    time: f64,
) -> Result<Vec<PlanetRiseSet>> {
    Planet::ALL
        .iter()
        .map(|&body| {
            let events = object_rise_set(body, longitude, latitude, altitude, time, true)?;
            Ok(PlanetRiseSet { body, events })
        })
        .collect()
}

/// Next instant the Sun passes `target_altitude` degrees, falling through
/// it when `going_down`. `None` when that does not happen within two days.
pub fn sun_altitude_crossing(
    longitude: f64,
    latitude: f64,
    altitude: f64,
    time: f64,
    going_down: bool,
    target_altitude: f64,
) -> Result<Option<Event>> {
    let ctx = ObservationContext::new(longitude, latitude, altitude, time);
    let crossing = if going_down {
        Crossing::Falling
    } else {
        Crossing::Rising
    };
    let query = CrossingQuery::horizon(crossing, SearchDirection::Forward, SearchParams::SUN_CROSSING)
        .with_target(target_altitude);
    let mut transit = TransitTracker::new(target_altitude);
    find_altitude_crossing(&ENGINE, &ctx, &Body::Planet(Planet::Sun), query, &mut transit)
}

/// Closed-form rise, transit and set of a fixed RA/Dec
pub fn star_rise_set(ra: f64, dec: f64, longitude: f64, latitude: f64, time: f64) -> RiseSetTransit {
    let ctx = ObservationContext::new(longitude, latitude, 0.0, time);
    star_riset::star_rise_set(&ENGINE, &ctx, &FixedStar::new(ra, dec))
}

/// Local apparent sidereal time, hours
pub fn local_sidereal_time(longitude: f64, time: f64) -> f64 {
    ENGINE.local_sidereal_time(&ObservationContext::new(longitude, 0.0, 0.0, time))
}

/// Observed position of a star with proper motion in mas/yr
#[allow(clippy::too_many_arguments)]
pub fn star_position(
    ra: f64,
    dec: f64,
    pm_ra: f64,
    pm_dec: f64,
    longitude: f64,
    latitude: f64,
    altitude: f64,
    time: f64,
) -> Result<HorizontalPosition> {
    let ctx = ObservationContext::new(longitude, latitude, altitude, time);
    let star = FixedStar::with_proper_motion(ra, dec, pm_ra, pm_dec);
    position_of(&Body::Star(star), &ctx)
}

pub fn solar_system_position(
    planet: Planet,
    longitude: f64,
    latitude: f64,
    altitude: f64,
    time: f64,
) -> Result<HorizontalPosition> {
    let ctx = ObservationContext::new(longitude, latitude, altitude, time);
    position_of(&Body::Planet(planet), &ctx)
}

pub fn satellite_position(
    line0: &str,
    line1: &str,
    line2: &str,
    longitude: f64,
    latitude: f64,
    altitude: f64,
    time: f64,
) -> Result<HorizontalPosition> {
    let sat = Body::satellite_from_elements(line0, line1, line2)?;
    let ctx = ObservationContext::new(longitude, latitude, altitude, time);
    position_of(&sat, &ctx)
}

/// Sub-satellite point, height and eclipse state
pub fn satellite_status(line0: &str, line1: &str, line2: &str, time: f64) -> Result<SatelliteStatus> {
    let sat = Body::satellite_from_elements(line0, line1, line2)?;
    let ctx = ObservationContext::geocentric(epoch_to_ephem_time(time));
    let state = ENGINE.evaluate(&ctx, &sat)?;
    let sub = state
        .satellite
        .ok_or_else(|| AstroError::Propagation("no satellite state in evaluation".to_string()))?;
    Ok(SatelliteStatus {
        longitude: sub.sub_longitude,
        latitude: sub.sub_latitude,
        elevation: sub.elevation_m,
        eclipsed: sub.eclipsed,
    })
}

/// Next pass of a satellite and its naked-eye visible part
pub fn next_satellite_pass(
    line0: &str,
    line1: &str,
    line2: &str,
    longitude: f64,
    latitude: f64,
    altitude: f64,
    time: f64,
) -> Result<SatellitePass> {
    let sat = Body::satellite_from_elements(line0, line1, line2)?;
    let ctx = ObservationContext::new(longitude, latitude, altitude, time);
    next_pass(&ENGINE, &ctx, &sat)
}

pub fn lunar_phase(time: f64) -> Result<LunarPhase> {
    lunar_phase::lunar_phase(&ENGINE, epoch_to_ephem_time(time))
}

/// Epoch seconds nearest `time` (ahead when `forward`) at which the
/// Moon-Sun elongation equals `target` radians
pub fn moon_phase_instant(time: f64, forward: bool, target: f64) -> Result<f64> {
    let mjd = lunar_phase::find_moon_phase(&ENGINE, epoch_to_ephem_time(time), forward, target)?;
    Ok(ephem_to_epoch_time(mjd))
}

/// Lighting segments covering `[start, end]`
pub fn sun_details(
    longitude: f64,
    latitude: f64,
    altitude: f64,
    start: f64,
    end: f64,
) -> Result<Vec<TwilightSegment>> {
    let ctx = ObservationContext::new(longitude, latitude, altitude, start);
    classify_twilight(&ENGINE, &ctx, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-20T12:00Z
    const EQUINOX_NOON: f64 = 1_710_936_000.0;

    #[test]
    fn test_sun_crossing_is_ahead_and_on_target() {
        let event = sun_altitude_crossing(0.0, 45.0, 0.0, EQUINOX_NOON, true, -6.0)
            .unwrap()
            .expect("civil dusk");
        let seconds = event.epoch_seconds();
        assert!(seconds > EQUINOX_NOON && seconds < EQUINOX_NOON + 86_400.0);

        let pos = solar_system_position(Planet::Sun, 0.0, 45.0, 0.0, seconds).unwrap();
        assert!((pos.altitude + 6.0).abs() < 0.2, "altitude {}", pos.altitude);
    }

    #[test]
    fn test_sidereal_time_in_range() {
        let lst = local_sidereal_time(-120.0, EQUINOX_NOON);
        assert!((0.0..24.0).contains(&lst));
    }

    #[test]
    fn test_all_bodies_reported() {
        let all = solar_system_rise_sets(0.0, 45.0, 0.0, EQUINOX_NOON).unwrap();
        assert_eq!(all.len(), Planet::ALL.len());
        assert_eq!(all[0].body, Planet::ALL[0]);
        let json = serde_json::to_string(&all[0]).unwrap();
        assert!(json.contains("\"body\"") && json.contains("\"status\""));
    }
}
