//! Next satellite pass and the part of it visible to the naked eye
//!
//! A sample is visible when the sky is dark enough (Sun between -30 and -6
//! degrees), the satellite is at least 10 degrees up, and it is sunlit.

use log::debug;
use serde::Serialize;

use crate::ephemeris::{Body, EphemerisEngine, Planet};
use crate::error::Result;
use crate::events::altitude_search::Event;
use crate::events::riseset::{resolve_rise_set, Orientation, RiseSetTransit};
use crate::observer::ObservationContext;
use crate::utils::config::{
    SearchParams, VISIBILITY_STEP_DAYS, VISIBLE_SAT_MIN_ALT, VISIBLE_SUN_MAX_ALT,
    VISIBLE_SUN_MIN_ALT,
};

/// Contiguous visible stretch of a pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibleWindow {
    /// First visible sample
    pub rise: Event,
    /// Last visible sample
    pub set: Event,
    /// Highest visible sample
    pub peak: Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SatellitePass {
    /// Geometric rise, transit and set
    pub pass: RiseSetTransit,
    /// Absent when no sample of the pass is visible
    pub visible: Option<VisibleWindow>,
}

impl SatellitePass {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Satellite sample as an event, or `None` when it is not visible
fn visible_sample<E: EphemerisEngine + ?Sized>(
    engine: &E,
    ctx: &ObservationContext,
    sat: &Body,
) -> Result<Option<Event>> {
    let sun = engine.evaluate(ctx, &Body::Planet(Planet::Sun))?;
    if sun.altitude <= VISIBLE_SUN_MIN_ALT || sun.altitude >= VISIBLE_SUN_MAX_ALT {
        return Ok(None);
    }

    let state = engine.evaluate(ctx, sat)?;
    let sunlit = state.satellite.is_some_and(|s| !s.eclipsed);
    if state.altitude < VISIBLE_SAT_MIN_ALT || !sunlit {
        return Ok(None);
    }
    Ok(Some(Event {
        time: ctx.mjd,
        azimuth: state.azimuth,
        altitude: Some(state.altitude),
    }))
}

/// Scan `[rise, set]` for the first visible stretch
fn scan_visibility<E: EphemerisEngine + ?Sized>(
    engine: &E,
    ctx: &ObservationContext,
    sat: &Body,
    rise: f64,
    set: f64,
) -> Result<Option<VisibleWindow>> {
    let mut window: Option<VisibleWindow> = None;

    for k in 0.. {
        let time = rise + k as f64 * VISIBILITY_STEP_DAYS;
        if time > set {
            break;
        }
        match (visible_sample(engine, &ctx.at(time), sat)?, window.as_mut()) {
            (Some(event), Some(w)) => {
                w.set = event;
                if event.altitude.unwrap_or(f64::MIN) > w.peak.altitude.unwrap_or(f64::MIN) {
                    w.peak = event;
                }
            }
            (Some(event), None) => {
                window = Some(VisibleWindow {
                    rise: event,
                    set: event,
                    peak: event,
                });
            }
            // First invisible sample after the window closes it
            (None, Some(_)) => break,
            (None, None) => {}
        }
    }
    Ok(window)
}

/// Find the next pass of `sat` over the context's observer and its visible part.
///
/// The geometric pass uses [`SearchParams::SATELLITE`]. A pass that cannot
/// be resolved is returned with its status and no window.
pub fn next_pass<E: EphemerisEngine + ?Sized>(
    engine: &E,
    ctx: &ObservationContext,
    sat: &Body,
) -> Result<SatellitePass> {
    let pass = resolve_rise_set(engine, ctx, sat, Orientation::Up, 0.0, SearchParams::SATELLITE)?;

    let visible = match (pass.rise, pass.set) {
        (Some(rise), Some(set)) => scan_visibility(engine, ctx, sat, rise.time, set.time)?,
        _ => None,
    };

    debug!(
        "{} pass {:?}, visible: {}",
        sat.name(),
        pass.status,
        visible.is_some()
    );
    Ok(SatellitePass { pass, visible })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{BodyState, SatelliteState};

    /// Sun fixed at -12, satellite altitude a triangle over [0.0, 0.01]
    /// peaking at 40, eclipsed after 0.008
    struct DuskSky {
        sun_altitude: f64,
    }

    impl EphemerisEngine for DuskSky {
        fn evaluate(&self, ctx: &ObservationContext, body: &Body) -> Result<BodyState> {
            let t = ctx.mjd - 100.0;
            let (altitude, satellite) = match body {
                Body::Planet(Planet::Sun) => (self.sun_altitude, None),
                _ => {
                    let alt = if (0.0..=0.01).contains(&t) {
                        40.0 - 8000.0 * (t - 0.005).abs() - 0.001
                    } else {
                        -20.0
                    };
                    let state = SatelliteState {
                        sub_latitude: 0.0,
                        sub_longitude: 0.0,
                        elevation_m: 400_000.0,
                        range_km: 1000.0,
                        eclipsed: t > 0.008,
                    };
                    (alt, Some(state))
                }
            };
            Ok(BodyState {
                altitude,
                azimuth: 90.0,
                ra: 0.0,
                dec: 0.0,
                distance_km: 0.0,
                satellite,
            })
        }
    }

    // Any non-solar body stands in for the satellite
    fn stand_in() -> Body {
        Body::Planet(Planet::Mercury)
    }

    fn scan(sky: &DuskSky) -> Option<VisibleWindow> {
        let ctx = ObservationContext::geocentric(100.0);
        scan_visibility(sky, &ctx, &stand_in(), 100.0, 100.01).unwrap()
    }

    #[test]
    fn test_window_clipped_by_shadow() {
        let sky = DuskSky { sun_altitude: -12.0 };
        let window = scan(&sky).expect("visible");

        // 10 degrees is reached 0.00125 d from each end
        assert!(window.rise.time >= 100.00125 - 1e-9);
        assert!(window.rise.time - 100.00125 <= VISIBILITY_STEP_DAYS);
        assert!(window.set.time <= 100.008);
        assert!(100.008 - window.set.time <= VISIBILITY_STEP_DAYS);
        assert!(window.rise.altitude.unwrap() >= VISIBLE_SAT_MIN_ALT);
        assert!((window.peak.time - 100.005).abs() <= VISIBILITY_STEP_DAYS);
    }

    #[test]
    fn test_bright_sky_has_no_window() {
        let sky = DuskSky { sun_altitude: -3.0 };
        assert!(scan(&sky).is_none());
    }
}
