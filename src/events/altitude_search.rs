//! Altitude-crossing search
//!
//! Steps away from a starting instant at a fixed increment until the body's
//! altitude passes a target value in the requested sense. The reported
//! instant and azimuth are the midpoints of the two bracketing samples; no
//! further refinement is done, so the error is bounded by half a step.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ephemeris::spherical::norm_pm180;
use crate::ephemeris::{Body, BodyState, EphemerisEngine};
use crate::error::Result;
use crate::observer::ObservationContext;
use crate::utils::config::SearchParams;
use crate::utils::time_utils::ephem_to_epoch_time;

/// Sense of an altitude crossing, in forward time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crossing {
    Rising,
    Falling,
}

impl Crossing {
    pub fn opposite(self) -> Crossing {
        match self {
            Crossing::Rising => Crossing::Falling,
            Crossing::Falling => Crossing::Rising,
        }
    }

    /// Whether the pair `earlier -> later` passes through `target` in this sense
    #[inline]
    fn bracketed(self, earlier: f64, later: f64, target: f64) -> bool {
        match self {
            Crossing::Rising => earlier <= target && later >= target,
            Crossing::Falling => earlier >= target && later <= target,
        }
    }
}

/// Which way in time a search walks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl SearchDirection {
    #[inline]
    fn sign(self) -> f64 {
        match self {
            SearchDirection::Forward => 1.0,
            SearchDirection::Backward => -1.0,
        }
    }
}

/// One altitude-crossing search: what to cross, which way, how far
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingQuery {
    /// Target altitude, degrees
    pub target: f64,
    pub crossing: Crossing,
    pub direction: SearchDirection,
    pub params: SearchParams,
}

impl CrossingQuery {
    /// Horizon crossing (target 0)
    pub fn horizon(crossing: Crossing, direction: SearchDirection, params: SearchParams) -> Self {
        CrossingQuery {
            target: 0.0,
            crossing,
            direction,
            params,
        }
    }

    pub fn with_target(self, target: f64) -> Self {
        CrossingQuery { target, ..self }
    }
}

/// An instant with the body's azimuth there. Only transits carry an altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Event {
    /// Continuous-scale instant
    pub time: f64,
    /// Degrees in [0, 360)
    pub azimuth: f64,
    /// Degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl Event {
    pub fn epoch_seconds(&self) -> f64 {
        ephem_to_epoch_time(self.time)
    }
}

/// Running maximum of sampled altitude, seeded with a floor so that only
/// samples above it count as a transit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitTracker {
    floor: f64,
    best: Option<Event>,
}

impl TransitTracker {
    pub fn new(floor: f64) -> Self {
        TransitTracker { floor, best: None }
    }

    pub fn observe(&mut self, time: f64, state: &BodyState) {
        let highest = self.best.and_then(|e| e.altitude).unwrap_or(self.floor);
        if state.altitude > highest {
            self.best = Some(Event {
                time,
                azimuth: state.azimuth,
                altitude: Some(state.altitude),
            });
        }
    }

    pub fn reset(&mut self) {
        self.best = None;
    }

    pub fn transit(&self) -> Option<Event> {
        self.best
    }
}

/// Find the first crossing of the query's target altitude in its sense,
/// walking from the context's instant in the query's direction.
///
/// Every sample, including the one at the starting instant, feeds `transit`.
/// Returns `Ok(None)` when the search horizon is exhausted.
pub fn find_altitude_crossing<E: EphemerisEngine + ?Sized>(
    engine: &E,
    ctx: &ObservationContext,
    body: &Body,
    query: CrossingQuery,
    transit: &mut TransitTracker,
) -> Result<Option<Event>> {
    let CrossingQuery {
        target,
        crossing,
        direction,
        params,
    } = query;
    let origin = ctx.mjd;
    let sign = direction.sign();

    let mut prev = engine.evaluate(ctx, body)?;
    let mut prev_time = origin;
    transit.observe(origin, &prev);

    for i in 1..params.max_samples() {
        let time = origin + sign * i as f64 * params.step_days;
        let curr = engine.evaluate(&ctx.at(time), body)?;
        transit.observe(time, &curr);

        // Walking backward the later sample is the previous one
        let found = match direction {
            SearchDirection::Forward => crossing.bracketed(prev.altitude, curr.altitude, target),
            SearchDirection::Backward => crossing.bracketed(curr.altitude, prev.altitude, target),
        };
        if found {
            let azimuth = (prev.azimuth + norm_pm180(curr.azimuth - prev.azimuth) / 2.0)
                .rem_euclid(360.0);
            let event = Event {
                time: (prev_time + time) / 2.0,
                azimuth,
                altitude: None,
            };
            debug!(
                "{} {crossing:?} through {target:.3} deg at mjd {:.6} ({direction:?}, {i} steps)",
                body.name(),
                event.time
            );
            return Ok(Some(event));
        }

        prev = curr;
        prev_time = time;
        if (time - origin).abs() > params.limit_days {
            break;
        }
    }

    debug!(
        "{} no {crossing:?} through {target:.3} deg within {} days ({direction:?})",
        body.name(),
        params.limit_days
    );
    Ok(None)
}
