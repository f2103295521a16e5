//! Batch altitude tracks

use ndarray::Array2;

use crate::ephemeris::{Body, EphemerisEngine};
use crate::error::Result;
use crate::observer::ObservationContext;

/// Column of the continuous-scale instant in a track
pub const TRACK_MJD: usize = 0;
/// Column of the altitude (degrees) in a track
pub const TRACK_ALTITUDE: usize = 1;
/// Column of the azimuth (degrees) in a track
pub const TRACK_AZIMUTH: usize = 2;

/// Evaluate `body` at `count` evenly spaced instants.
///
/// # Returns
/// An N x 3 array of `[mjd, altitude, azimuth]` rows
pub fn altitude_track<E: EphemerisEngine + ?Sized>(
    engine: &E,
    ctx: &ObservationContext,
    body: &Body,
    start_mjd: f64,
    step_days: f64,
    count: usize,
) -> Result<Array2<f64>> {
    let mut track = Array2::<f64>::zeros((count, 3));
    for (i, mut row) in track.rows_mut().into_iter().enumerate() {
        let mjd = start_mjd + i as f64 * step_days;
        let state = engine.evaluate(&ctx.at(mjd), body)?;
        row[TRACK_MJD] = mjd;
        row[TRACK_ALTITUDE] = state.altitude;
        row[TRACK_AZIMUTH] = state.azimuth;
    }
    Ok(track)
}
