//! Lunar phase solver
//!
//! The phase angle is the Moon's ecliptic longitude minus the Sun's. A first
//! guess at the instant the angle reaches a target comes from the mean
//! synodic rate, then a secant iteration refines it.

use std::f64::consts::{PI, TAU};

use log::trace;
use serde::Serialize;

use crate::ephemeris::{Body, BodyState, EphemerisEngine, Planet};
use crate::error::Result;
use crate::observer::ObservationContext;
use crate::utils::config::{PHASE_MAX_ITERATIONS, PHASE_TOLERANCE_DAYS, SYNODIC_MONTH_DAYS};
use crate::utils::moon::{calculate_moon_illumination_from_vectors, moon_phase_name};
use crate::utils::time_utils::ephem_to_epoch_time;
use crate::utils::vector_math::radec_to_unit_vector;

/// Phase angle of new moon, radians
pub const NEW_MOON: f64 = 0.0;
/// Phase angle of full moon, radians
pub const FULL_MOON: f64 = PI;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LunarPhase {
    /// Most recent new moon, epoch seconds
    pub previous_new: f64,
    /// Next new moon, epoch seconds
    pub next_new: f64,
    /// Next full moon, epoch seconds
    pub next_full: f64,
    /// Fraction of the current lunation, 0 at new and 0.5 at full
    pub phase: f64,
    pub name: String,
    pub waxing: bool,
    /// Illuminated fraction of the disc
    pub illumination: f64,
}

impl LunarPhase {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn sun_and_moon<E: EphemerisEngine + ?Sized>(engine: &E, mjd: f64) -> Result<(BodyState, BodyState)> {
    let ctx = ObservationContext::geocentric(mjd);
    let sun = engine.evaluate(&ctx, &Body::Planet(Planet::Sun))?;
    let moon = engine.evaluate(&ctx, &Body::Planet(Planet::Moon))?;
    Ok((sun, moon))
}

/// Phase angle minus `target`, wrapped to [-π, π)
fn phase_residual<E: EphemerisEngine + ?Sized>(engine: &E, mjd: f64, target: f64) -> Result<f64> {
    let (sun, moon) = sun_and_moon(engine, mjd)?;
    let (_, sun_lon) = engine.ecliptic_coordinates(mjd, sun.ra, sun.dec);
    let (_, moon_lon) = engine.ecliptic_coordinates(mjd, moon.ra, moon.dec);
    let elongation = (moon_lon - sun_lon).to_radians();
    Ok((elongation - target - PI).rem_euclid(TAU) - PI)
}

/// Modulo taking the sign of the divisor
#[inline]
fn floor_mod(a: f64, m: f64) -> f64 {
    a - m * (a / m).floor()
}

/// Instant (continuous scale) nearest `mjd` in the given direction at which
/// the phase angle equals `target` radians (0 new, π full).
pub fn find_moon_phase<E: EphemerisEngine + ?Sized>(
    engine: &E,
    mjd: f64,
    forward: bool,
    target: f64,
) -> Result<f64> {
    let motion = if forward { TAU } else { -TAU };
    let residual = phase_residual(engine, mjd, target)?;
    let angle = floor_mod(-residual, motion);
    let guess = mjd + SYNODIC_MONTH_DAYS * angle / TAU;

    let mut x0 = guess;
    let mut f0 = phase_residual(engine, x0, target)?;
    let mut x1 = guess + 1.0 / 24.0;
    let mut f1 = phase_residual(engine, x1, target)?;

    for iteration in 0..PHASE_MAX_ITERATIONS {
        // Converged, or the residual stopped changing
        if (x1 - x0).abs() <= PHASE_TOLERANCE_DAYS || f1 == f0 {
            break;
        }
        let next = x1 - f1 * (x1 - x0) / (f1 - f0);
        x0 = x1;
        f0 = f1;
        x1 = next;
        f1 = phase_residual(engine, x1, target)?;
        trace!("phase {target:.3} iteration {iteration}: mjd {x1:.6}, residual {f1:.3e}");
    }
    Ok(x1)
}

/// Illuminated fraction of the Moon's disc at `mjd`
pub fn moon_illumination<E: EphemerisEngine + ?Sized>(engine: &E, mjd: f64) -> Result<f64> {
    let (sun, moon) = sun_and_moon(engine, mjd)?;
    let to_vector = |s: &BodyState| {
        radec_to_unit_vector(s.ra.to_radians(), s.dec.to_radians()).map(|c| c * s.distance_km)
    };
    Ok(calculate_moon_illumination_from_vectors(
        to_vector(&sun),
        to_vector(&moon),
    ))
}

/// Phase of the Moon at `mjd` with the surrounding new and full moons
pub fn lunar_phase<E: EphemerisEngine + ?Sized>(engine: &E, mjd: f64) -> Result<LunarPhase> {
    let previous_new = find_moon_phase(engine, mjd, false, NEW_MOON)?;
    let next_new = find_moon_phase(engine, mjd, true, NEW_MOON)?;
    let next_full = find_moon_phase(engine, mjd, true, FULL_MOON)?;

    let lunation = next_new - previous_new;
    let phase = if lunation > 0.0 {
        ((mjd - previous_new) / lunation).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Ok(LunarPhase {
        previous_new: ephem_to_epoch_time(previous_new),
        next_new: ephem_to_epoch_time(next_new),
        next_full: ephem_to_epoch_time(next_full),
        phase,
        name: moon_phase_name(phase).to_string(),
        waxing: phase < 0.5,
        illumination: moon_illumination(engine, mjd)?,
    })
}
