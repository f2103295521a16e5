//! Twilight classification
//!
//! Solar altitude is sampled every 20 seconds across an interval and each
//! sample is placed in a lighting band. Within a twilight band the sense of
//! the Sun's motion is a tri-state: ascending (dawn), descending (dusk), or
//! ambiguous once the motion reverses inside the band. Ambiguity is sticky
//! until the Sun leaves the band, so a Sun that dips into a band and climbs
//! back out is reported as neither dawn nor dusk.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ephemeris::{Body, EphemerisEngine, Planet};
use crate::error::Result;
use crate::events::track::{altitude_track, TRACK_ALTITUDE};
use crate::observer::ObservationContext;
use crate::utils::config::{
    ASTRONOMICAL_MAX_ALT, BLUE_HOUR_MAX_ALT, CIVIL_MAX_ALT, GOLDEN_HOUR_MAX_ALT, NAUTICAL_MAX_ALT,
    NIGHT_MAX_ALT, SECONDS_PER_DAY, TWILIGHT_STEP_SECONDS,
};
use crate::utils::time_utils::epoch_to_ephem_time;

/// Lighting bands between night and day, darkest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwilightBand {
    /// -18 to -12 degrees
    Astronomical,
    /// -12 to -6 degrees
    Nautical,
    /// -6 to -4 degrees
    BlueHour,
    /// -4 to 0 degrees
    Civil,
    /// 0 to 6 degrees
    GoldenHour,
}

impl TwilightBand {
    fn index(self) -> u8 {
        match self {
            TwilightBand::Astronomical => 0,
            TwilightBand::Nautical => 1,
            TwilightBand::BlueHour => 2,
            TwilightBand::Civil => 3,
            TwilightBand::GoldenHour => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TwilightBand::Astronomical => "astronomical",
            TwilightBand::Nautical => "nautical",
            TwilightBand::BlueHour => "blue hour",
            TwilightBand::Civil => "civil",
            TwilightBand::GoldenHour => "golden hour",
        }
    }
}

/// Sense of the Sun's motion through a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandDirection {
    /// Dawn
    Ascending,
    /// Dusk
    Descending,
    /// Reversed inside the band
    Ambiguous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SunState {
    Night,
    Twilight {
        band: TwilightBand,
        direction: BandDirection,
    },
    Day,
}

impl SunState {
    /// Stable numeric code: 1 night, 2-6 dawn, 7 day, 8-12 dusk, 13-17 unknown.
    /// Dawn codes run darkest first, dusk and unknown codes brightest first.
    pub fn code(&self) -> u8 {
        match *self {
            SunState::Night => 1,
            SunState::Day => 7,
            SunState::Twilight { band, direction } => match direction {
                BandDirection::Ascending => 2 + band.index(),
                BandDirection::Descending => 12 - band.index(),
                BandDirection::Ambiguous => 17 - band.index(),
            },
        }
    }
}

impl fmt::Display for SunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SunState::Night => write!(f, "night"),
            SunState::Day => write!(f, "day"),
            SunState::Twilight { band, direction } => {
                let when = match direction {
                    BandDirection::Ascending => "dawn",
                    BandDirection::Descending => "dusk",
                    BandDirection::Ambiguous => "unknown",
                };
                write!(f, "{} {when}", band.name())
            }
        }
    }
}

/// A run of samples sharing one state, in epoch seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwilightSegment {
    pub start: f64,
    pub end: f64,
    pub state: SunState,
}

impl TwilightSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Band of a solar altitude in degrees, `None` for night or day
fn band_of(altitude: f64) -> Option<TwilightBand> {
    match altitude {
        a if a <= NIGHT_MAX_ALT => None,
        a if a <= ASTRONOMICAL_MAX_ALT => Some(TwilightBand::Astronomical),
        a if a <= NAUTICAL_MAX_ALT => Some(TwilightBand::Nautical),
        a if a <= BLUE_HOUR_MAX_ALT => Some(TwilightBand::BlueHour),
        a if a <= CIVIL_MAX_ALT => Some(TwilightBand::Civil),
        a if a <= GOLDEN_HOUR_MAX_ALT => Some(TwilightBand::GoldenHour),
        _ => None,
    }
}

/// Hysteresis over the current band visit
#[derive(Debug, Default)]
struct BandTracker {
    visit: Option<(TwilightBand, BandDirection)>,
}

impl BandTracker {
    fn update(&mut self, altitude: f64, ascending: bool) -> SunState {
        let Some(band) = band_of(altitude) else {
            self.visit = None;
            return if altitude <= NIGHT_MAX_ALT {
                SunState::Night
            } else {
                SunState::Day
            };
        };
        let trend = if ascending {
            BandDirection::Ascending
        } else {
            BandDirection::Descending
        };

        let direction = match self.visit {
            Some((current, direction)) if current == band => {
                if direction == BandDirection::Ambiguous || direction == trend {
                    direction
                } else {
                    BandDirection::Ambiguous
                }
            }
            _ => trend,
        };
        self.visit = Some((band, direction));
        SunState::Twilight { band, direction }
    }
}

/// Split `[start, end]` (epoch seconds) into lighting segments for the
/// context's observer.
///
/// Segments are ordered, contiguous, and cover the whole interval. An
/// interval with `end < start` yields no segments.
pub fn classify_twilight<E: EphemerisEngine + ?Sized>(
    engine: &E,
    ctx: &ObservationContext,
    start: f64,
    end: f64,
) -> Result<Vec<TwilightSegment>> {
    if end < start {
        return Ok(Vec::new());
    }

    // One sample before `start` seeds the trend
    let count = ((end - start) / TWILIGHT_STEP_SECONDS).floor() as usize + 2;
    let track = altitude_track(
        engine,
        ctx,
        &Body::Planet(Planet::Sun),
        epoch_to_ephem_time(start - TWILIGHT_STEP_SECONDS),
        TWILIGHT_STEP_SECONDS / SECONDS_PER_DAY,
        count,
    )?;
    let altitudes = track.column(TRACK_ALTITUDE);

    let mut segments = Vec::new();
    let mut bands = BandTracker::default();
    let mut running: Option<(f64, SunState)> = None;

    for k in 1..count {
        let time = start + (k - 1) as f64 * TWILIGHT_STEP_SECONDS;
        let state = bands.update(altitudes[k], altitudes[k] >= altitudes[k - 1]);
        match running {
            None => running = Some((start, state)),
            Some((since, current)) if current != state => {
                segments.push(TwilightSegment {
                    start: since,
                    end: time,
                    state: current,
                });
                running = Some((time, state));
            }
            Some(_) => {}
        }
    }
    if let Some((since, state)) = running {
        segments.push(TwilightSegment {
            start: since,
            end,
            state,
        });
    }

    debug!(
        "twilight over {:.0} s: {} segments from {} samples",
        end - start,
        segments.len(),
        count
    );
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::BodyState;

    /// Solar altitude `offset + amplitude * cos(2π (t - noon))`
    struct CosineSun {
        amplitude: f64,
        offset: f64,
        noon: f64,
    }

    impl EphemerisEngine for CosineSun {
        fn evaluate(&self, ctx: &ObservationContext, _body: &Body) -> Result<BodyState> {
            let phase = (ctx.mjd - self.noon).fract() * std::f64::consts::TAU;
            Ok(BodyState {
                altitude: self.offset + self.amplitude * phase.cos(),
                azimuth: 0.0,
                ra: 0.0,
                dec: 0.0,
                distance_km: 0.0,
                satellite: None,
            })
        }
    }

    // Epoch seconds of continuous-scale day 40000.0
    const DAY_START: f64 = 1_246_968_000.0;

    fn classify(sun: &CosineSun) -> Vec<TwilightSegment> {
        classify_twilight(
            sun,
            &ObservationContext::geocentric(0.0),
            DAY_START,
            DAY_START + SECONDS_PER_DAY,
        )
        .unwrap()
    }

    #[test]
    fn test_state_codes() {
        let dawn = |band| SunState::Twilight {
            band,
            direction: BandDirection::Ascending,
        };
        let dusk = |band| SunState::Twilight {
            band,
            direction: BandDirection::Descending,
        };
        let unknown = |band| SunState::Twilight {
            band,
            direction: BandDirection::Ambiguous,
        };
        assert_eq!(SunState::Night.code(), 1);
        assert_eq!(dawn(TwilightBand::Astronomical).code(), 2);
        assert_eq!(dawn(TwilightBand::GoldenHour).code(), 6);
        assert_eq!(SunState::Day.code(), 7);
        assert_eq!(dusk(TwilightBand::GoldenHour).code(), 8);
        assert_eq!(dusk(TwilightBand::Astronomical).code(), 12);
        assert_eq!(unknown(TwilightBand::GoldenHour).code(), 13);
        assert_eq!(unknown(TwilightBand::Astronomical).code(), 17);
        assert_eq!(dusk(TwilightBand::BlueHour).to_string(), "blue hour dusk");
    }

    #[test]
    fn test_full_day_sequence() {
        // Midnight at both ends, one sunrise and one sunset between
        let segments = classify(&CosineSun {
            amplitude: 40.0,
            offset: 0.0,
            noon: 0.5,
        });
        let codes: Vec<u8> = segments.iter().map(|s| s.state.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 1]);

        assert_eq!(segments[0].start, DAY_START);
        assert_eq!(segments.last().unwrap().end, DAY_START + SECONDS_PER_DAY);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_grazing_band_is_ambiguous() {
        // Minimum -14 degrees at 0.5: into astronomical and back out
        let segments = classify(&CosineSun {
            amplitude: 30.0,
            offset: 16.0,
            noon: 0.0,
        });
        let codes: Vec<u8> = segments.iter().map(|s| s.state.code()).collect();
        assert!(!codes.contains(&1), "no night expected: {codes:?}");
        assert!(codes.contains(&17), "astronomical unknown expected: {codes:?}");
        assert!(!codes.contains(&2), "no astronomical dawn expected: {codes:?}");

        let turn = codes.iter().position(|&c| c == 17).unwrap();
        assert_eq!(codes[turn - 1], 12);
        assert_eq!(codes[turn + 1], 3);
    }

    #[test]
    fn test_reversed_interval_is_empty() {
        let sun = CosineSun {
            amplitude: 40.0,
            offset: 0.0,
            noon: 0.5,
        };
        let ctx = ObservationContext::geocentric(0.0);
        assert!(classify_twilight(&sun, &ctx, DAY_START, DAY_START - 1.0).unwrap().is_empty());
    }
}
