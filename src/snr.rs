//! Signal-to-noise ratio for a candidate stellar magnitude.
//!
//! S/N is the source electron count over the total noise of a precomputed
//! [`NoiseBudget`]. Since the budget is magnitude-independent and the
//! signal is strictly decreasing in magnitude, S/N is strictly decreasing
//! too; the solver depends on that monotonicity.

use thiserror::Error;

use crate::instrument::{ConfigError, InstrumentConfig};
use crate::noise::NoiseBudget;
use crate::observation::ObservationConditions;
use crate::signal::compute_signal;

/// Errors from S/N evaluation.
#[derive(Error, Debug)]
pub enum SnrError {
    /// Total noise is zero or non-finite, leaving S/N undefined.
    #[error("total noise is {total_noise_e:.3} e-; S/N is undefined")]
    ZeroNoise {
        /// The degenerate total noise value.
        total_noise_e: f64,
    },

    /// Instrument, conditions, or magnitude failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Magnitude sweep range is empty or malformed.
    #[error("invalid magnitude range [{start}, {end}] with step {step}")]
    InvalidRange {
        /// Range start.
        start: f64,
        /// Range end.
        end: f64,
        /// Step size.
        step: f64,
    },
}

/// Compute S/N for a star of the given magnitude.
///
/// # Errors
///
/// Returns [`SnrError::ZeroNoise`] for a degenerate budget (all noise
/// sources zero, or non-finite totals) rather than silently producing
/// infinity; callers must guard zero-noise configurations. Propagates
/// validation errors from the signal model.
pub fn compute_snr(
    budget: &NoiseBudget,
    instrument: &InstrumentConfig,
    conditions: &ObservationConditions,
    magnitude: f64,
) -> Result<f64, SnrError> {
    let signal = compute_signal(instrument, conditions, magnitude)?;
    let total = budget.total_noise_e();
    if !(total > 0.0) || !total.is_finite() {
        log::warn!(
            "degenerate noise budget (total {total:.3} e-) for instrument {}",
            instrument.name
        );
        return Err(SnrError::ZeroNoise {
            total_noise_e: total,
        });
    }
    Ok(signal / total)
}

/// Maximum number of samples in one magnitude sweep.
///
/// A 0.001 mag step over the full useful magnitude range stays well
/// under this; anything larger points at a malformed step.
const MAX_CURVE_POINTS: usize = 100_000;

/// Sample the S/N curve over a magnitude range.
///
/// Produces `(magnitude, snr)` pairs from `start` to `end` inclusive in
/// increments of `step`, for consumption by an external plotting or
/// tabulation collaborator. The numeric core does no rendering itself.
/// Sweeps that would exceed [`MAX_CURVE_POINTS`] samples are rejected as
/// an invalid range.
pub fn snr_curve(
    budget: &NoiseBudget,
    instrument: &InstrumentConfig,
    conditions: &ObservationConditions,
    start: f64,
    end: f64,
    step: f64,
) -> Result<Vec<(f64, f64)>, SnrError> {
    if !(step > 0.0) || !(end > start) || !start.is_finite() || !end.is_finite() {
        return Err(SnrError::InvalidRange { start, end, step });
    }

    // Checked in f64 so a tiny step cannot overflow the usize conversion
    let span = (end - start) / step;
    if !span.is_finite() || span >= MAX_CURVE_POINTS as f64 {
        return Err(SnrError::InvalidRange { start, end, step });
    }

    let points = span.floor() as usize + 1;
    let mut curve = Vec::with_capacity(points);
    for i in 0..points {
        let magnitude = start + i as f64 * step;
        let snr = compute_snr(budget, instrument, conditions, magnitude)?;
        curve.push((magnitude, snr));
    }
    Ok(curve)
}
