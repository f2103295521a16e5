//! Closed-form rise, transit and set of a fixed equatorial position
//!
//! No stepping: the hour angles of the horizon crossings come straight from
//! the spherical triangle, and sidereal offsets convert to solar time at the
//! sidereal rate.

use crate::ephemeris::{basic_rise_set, horizontal_from_equatorial, BasicRiseSet, BodyState};
use crate::ephemeris::{EphemerisEngine, FixedStar};
use crate::events::altitude_search::Event;
use crate::events::riseset::{RiseSetStatus, RiseSetTransit};
use crate::observer::ObservationContext;
use crate::utils::config::SIDEREAL_RATE;

/// Geometric `(altitude, azimuth)` in degrees at local sidereal time `lst` hours
fn horizontal_at(ctx: &ObservationContext, star: &FixedStar, lst: f64) -> (f64, f64) {
    let ha = (lst * 15.0 - star.ra).to_radians();
    let (alt, az) = horizontal_from_equatorial(ctx.latitude, ha, star.dec.to_radians());
    (alt.to_degrees(), az.to_degrees())
}

/// Rise, transit and set of `star` around the context's instant.
///
/// A star above the horizon is bracketed by the rise before and the set
/// after; otherwise the next rise and the set following it are given.
pub fn star_rise_set<E: EphemerisEngine + ?Sized>(
    engine: &E,
    ctx: &ObservationContext,
    star: &FixedStar,
) -> RiseSetTransit {
    let lst = engine.local_sidereal_time(ctx);
    let (altitude, azimuth) = horizontal_at(ctx, star, lst);
    let current = BodyState {
        altitude,
        azimuth,
        ra: star.ra,
        dec: star.dec,
        distance_km: 0.0,
        satellite: None,
    };

    let (rise_lst, set_lst, rise_az, set_az) =
        match basic_rise_set(star.ra.to_radians(), star.dec.to_radians(), ctx.latitude, ctx.dip) {
            BasicRiseSet::Crosses {
                rise_lst,
                set_lst,
                rise_az,
                set_az,
            } => (rise_lst, set_lst, rise_az, set_az),
            BasicRiseSet::Circumpolar => {
                return RiseSetTransit::without_events(current, RiseSetStatus::NeverSets)
            }
            BasicRiseSet::NeverRises => {
                return RiseSetTransit::without_events(current, RiseSetStatus::NeverRises)
            }
        };

    // Sidereal hours, unwrapped so that rise < set and now < set
    let mut rise = rise_lst.to_degrees() / 15.0;
    let mut set = set_lst.to_degrees() / 15.0;
    if set < rise {
        rise -= 24.0;
    }
    if lst > set {
        rise += 24.0;
        set += 24.0;
    }
    let transit = (rise + set) / 2.0;

    let solar_days = |sidereal: f64| ctx.mjd + (sidereal - lst) / 24.0 / SIDEREAL_RATE;
    let (transit_alt, transit_az) = horizontal_at(ctx, star, transit);

    RiseSetTransit {
        rise: Some(Event {
            time: solar_days(rise),
            azimuth: rise_az.to_degrees(),
            altitude: None,
        }),
        transit: Some(Event {
            time: solar_days(transit),
            azimuth: transit_az,
            altitude: Some(transit_alt),
        }),
        set: Some(Event {
            time: solar_days(set),
            azimuth: set_az.to_degrees(),
            altitude: None,
        }),
        current,
        status: RiseSetStatus::Found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::AnalyticEphemeris;

    const SECONDS: f64 = 1_710_892_800.0; // 2024-03-20T00:00Z

    #[test]
    fn test_equatorial_star_at_equator() {
        let ctx = ObservationContext::new(0.0, 0.0, 0.0, SECONDS);
        let star = FixedStar::new(120.0, 0.0);
        let r = star_rise_set(&AnalyticEphemeris, &ctx, &star);
        assert_eq!(r.status, RiseSetStatus::Found);

        let (rise, set) = (r.rise.unwrap(), r.set.unwrap());
        assert!((rise.azimuth - 90.0).abs() < 1e-6);
        assert!((set.azimuth - 270.0).abs() < 1e-6);
        // Half a sidereal day up
        let up = set.time - rise.time;
        assert!((up - 0.5 / SIDEREAL_RATE).abs() < 1e-9, "up for {up} days");

        let transit = r.transit.unwrap();
        assert!((transit.altitude.unwrap() - 90.0).abs() < 1e-4);
        assert!(rise.time < transit.time && transit.time < set.time);
    }

    #[test]
    fn test_current_instant_is_bracketed_or_before() {
        let engine = AnalyticEphemeris;
        let star = FixedStar::new(250.0, 20.0);
        for hour in 0..24 {
            let ctx = ObservationContext::new(-70.0, 30.0, 0.0, SECONDS + hour as f64 * 3600.0);
            let r = star_rise_set(&engine, &ctx, &star);
            let (rise, set) = (r.rise.unwrap(), r.set.unwrap());
            assert!(set.time > ctx.mjd, "set behind now at hour {hour}");
            assert!(rise.time < set.time);
            if r.current.altitude > 0.0 {
                assert!(rise.time <= ctx.mjd, "hour {hour}");
            } else {
                assert!(rise.time >= ctx.mjd, "hour {hour}");
            }
        }
    }

    #[test]
    fn test_circumpolar_and_hidden_stars() {
        let ctx = ObservationContext::new(0.0, 45.0, 0.0, SECONDS);
        let north = star_rise_set(&AnalyticEphemeris, &ctx, &FixedStar::new(10.0, 80.0));
        assert_eq!(north.status, RiseSetStatus::NeverSets);
        assert!(north.rise.is_none() && north.transit.is_none());

        let south = star_rise_set(&AnalyticEphemeris, &ctx, &FixedStar::new(10.0, -80.0));
        assert_eq!(south.status, RiseSetStatus::NeverRises);
        assert!(south.current.altitude < 0.0);
    }
}
