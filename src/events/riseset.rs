//! Rise, transit and set of a single body
//!
//! A body already in the wanted state is bracketed by one backward and one
//! forward search from the query instant. Otherwise the resolver moves
//! through two explicit steps: seek the entry into the wanted state, then
//! re-anchor there and seek the exit. The exit search starts at the entry,
//! so a set can never be reported ahead of its rise.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ephemeris::{Body, BodyState, EphemerisEngine};
use crate::error::Result;
use crate::events::altitude_search::{
    find_altitude_crossing, Crossing, CrossingQuery, Event, SearchDirection, TransitTracker,
};
use crate::observer::ObservationContext;
use crate::utils::config::SearchParams;

/// Which side of the horizon the caller wants bracketed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Rise then set: the interval the body is above the horizon
    Up,
    /// Set then rise: the interval the body is below the horizon
    Down,
}

impl Orientation {
    /// Crossing that enters the wanted state
    fn entry(self) -> Crossing {
        match self {
            Orientation::Up => Crossing::Rising,
            Orientation::Down => Crossing::Falling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiseSetStatus {
    Found,
    /// Below the horizon for the whole search horizon
    NeverRises,
    /// Above the horizon for the whole search horizon
    NeverSets,
    /// A crossing was found but its partner was not
    SearchFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiseSetTransit {
    pub rise: Option<Event>,
    pub transit: Option<Event>,
    pub set: Option<Event>,
    /// Body at the query instant
    pub current: BodyState,
    pub status: RiseSetStatus,
}

impl RiseSetTransit {
    /// Result without events, keeping the query-instant snapshot
    pub fn without_events(current: BodyState, status: RiseSetStatus) -> Self {
        RiseSetTransit {
            rise: None,
            transit: None,
            set: None,
            current,
            status,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == RiseSetStatus::Found
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Degenerate status for a body that stayed on one side of the horizon
fn stayed(is_up: bool) -> RiseSetStatus {
    if is_up {
        RiseSetStatus::NeverSets
    } else {
        RiseSetStatus::NeverRises
    }
}

/// Order an entry/exit pair into rise and set slots
fn assign(orientation: Orientation, entry: Event, exit: Event) -> (Event, Event) {
    match orientation {
        Orientation::Up => (entry, exit),
        Orientation::Down => (exit, entry),
    }
}

struct Resolver<'a, E: ?Sized> {
    engine: &'a E,
    body: &'a Body,
    orientation: Orientation,
    horizon: f64,
    params: SearchParams,
    transit: TransitTracker,
}

impl<E: EphemerisEngine + ?Sized> Resolver<'_, E> {
    fn search(
        &mut self,
        ctx: &ObservationContext,
        crossing: Crossing,
        direction: SearchDirection,
    ) -> Result<Option<Event>> {
        let query = CrossingQuery::horizon(crossing, direction, self.params).with_target(self.horizon);
        find_altitude_crossing(self.engine, ctx, self.body, query, &mut self.transit)
    }

    /// Body already in the wanted state: entry behind, exit ahead
    fn bracket_current(
        &mut self,
        ctx: &ObservationContext,
        current: BodyState,
        is_up: bool,
    ) -> Result<RiseSetTransit> {
        let entry_sense = self.orientation.entry();
        let entry = self.search(ctx, entry_sense, SearchDirection::Backward)?;
        let exit = self.search(ctx, entry_sense.opposite(), SearchDirection::Forward)?;

        Ok(match (entry, exit) {
            (Some(entry), Some(exit)) => self.found(entry, exit, current),
            (None, None) => RiseSetTransit::without_events(current, stayed(is_up)),
            _ => RiseSetTransit::without_events(current, RiseSetStatus::SearchFailed),
        })
    }

    /// Step one: first transition into the wanted state after the query instant
    fn seek_entry(&mut self, ctx: &ObservationContext) -> Result<Option<Event>> {
        self.search(ctx, self.orientation.entry(), SearchDirection::Forward)
    }

    /// Step two: re-anchored at the entry, the transition back out
    fn seek_exit_after(&mut self, ctx: &ObservationContext, entry: &Event) -> Result<Option<Event>> {
        self.transit.reset();
        let anchored = ctx.at(entry.time);
        self.search(&anchored, self.orientation.entry().opposite(), SearchDirection::Forward)
    }

    fn next_interval(
        &mut self,
        ctx: &ObservationContext,
        current: BodyState,
        is_up: bool,
    ) -> Result<RiseSetTransit> {
        let Some(entry) = self.seek_entry(ctx)? else {
            return Ok(RiseSetTransit::without_events(current, stayed(is_up)));
        };
        let Some(exit) = self.seek_exit_after(ctx, &entry)? else {
            return Ok(RiseSetTransit::without_events(current, RiseSetStatus::SearchFailed));
        };
        Ok(self.found(entry, exit, current))
    }

    fn found(&self, entry: Event, exit: Event, current: BodyState) -> RiseSetTransit {
        let (rise, set) = assign(self.orientation, entry, exit);
        RiseSetTransit {
            rise: Some(rise),
            transit: self.transit.transit(),
            set: Some(set),
            current,
            status: RiseSetStatus::Found,
        }
    }
}

/// Resolve rise, transit and set of `body` around the context's instant.
///
/// # Arguments
/// * `horizon` - Crossing altitude in degrees (0 for a conventional rise/set)
/// * `params` - Step and horizon of each search, part of the caller's contract
///
/// Satellites always take the forward path so that the result is the next
/// complete pass rather than the one in progress.
pub fn resolve_rise_set<E: EphemerisEngine + ?Sized>(
    engine: &E,
    ctx: &ObservationContext,
    body: &Body,
    orientation: Orientation,
    horizon: f64,
    params: SearchParams,
) -> Result<RiseSetTransit> {
    let current = engine.evaluate(ctx, body)?;
    let is_up = current.altitude > horizon;
    let wants_up = orientation == Orientation::Up;

    let mut resolver = Resolver {
        engine,
        body,
        orientation,
        horizon,
        params,
        transit: TransitTracker::new(horizon),
    };

    let result = if is_up == wants_up && !body.is_satellite() {
        resolver.bracket_current(ctx, current, is_up)?
    } else {
        resolver.next_interval(ctx, current, is_up)?
    };

    debug!(
        "{} {orientation:?} at mjd {:.6}: {:?}",
        body.name(),
        ctx.mjd,
        result.status
    );
    Ok(result)
}
