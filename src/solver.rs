//! Limiting-magnitude solver.
//!
//! Inverts the S/N curve by bisection: S/N is strictly decreasing in
//! magnitude (signal monotonicity plus a magnitude-independent noise
//! budget), so a bracket with `snr(bright) > target > snr(faint)`
//! converges reliably. The search bracket is checked up front and the
//! solver never reports a boundary value as a root.

use thiserror::Error;

use crate::instrument::InstrumentConfig;
use crate::noise::NoiseBudget;
use crate::observation::ObservationConditions;
use crate::snr::{compute_snr, SnrError};

/// Iteration cap for the bisection loop.
///
/// 64 halvings shrink any realistic magnitude bracket far below any
/// useful tolerance; hitting the cap means the input was degenerate.
pub const MAX_ITERATIONS: usize = 64;

/// Errors from the limiting-magnitude search.
#[derive(Error, Debug)]
pub enum SolveError {
    /// The bright (low-magnitude) bound already fails the threshold.
    #[error(
        "target S/N {target:.2} unreachable: S/N at bright bound {bound:.2} mag is only {snr:.3}"
    )]
    BrightBoundTooFaint {
        /// Bright bracket bound in magnitudes.
        bound: f64,
        /// S/N evaluated at that bound.
        snr: f64,
        /// Requested threshold.
        target: f64,
    },

    /// The faint (high-magnitude) bound still exceeds the threshold.
    #[error(
        "target S/N {target:.2} not crossed: S/N at faint bound {bound:.2} mag is still {snr:.3}"
    )]
    FaintBoundTooBright {
        /// Faint bracket bound in magnitudes.
        bound: f64,
        /// S/N evaluated at that bound.
        snr: f64,
        /// Requested threshold.
        target: f64,
    },

    /// Bracket or tolerance is malformed.
    #[error("invalid search bracket [{bright}, {faint}] with tolerance {tolerance}")]
    InvalidBracket {
        /// Bright bound.
        bright: f64,
        /// Faint bound.
        faint: f64,
        /// Requested tolerance.
        tolerance: f64,
    },

    /// Iteration budget exhausted before reaching tolerance.
    #[error("no convergence after {iterations} iterations (bracket width {width:.3e} mag)")]
    MaxIterations {
        /// Iterations performed.
        iterations: usize,
        /// Remaining bracket width in magnitudes.
        width: f64,
    },

    /// S/N evaluation failed inside the search.
    #[error(transparent)]
    Snr(#[from] SnrError),
}

/// Outcome of a limiting-magnitude search.
///
/// Carries the iteration count and convergence flag alongside the root so
/// callers can assess convergence quality rather than receiving a bare
/// number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult {
    /// Magnitude at which S/N equals the target, to within tolerance.
    pub magnitude: f64,
    /// Bisection iterations performed.
    pub iterations: usize,
    /// Whether the bracket width reached the requested tolerance.
    pub converged: bool,
}

/// Find the magnitude at which S/N equals `target_snr`.
///
/// `bracket` is `(bright, faint)` in magnitudes with `bright < faint`.
/// The bracket must straddle the root: S/N above the target at the bright
/// bound and below it at the faint bound, otherwise the search fails with
/// [`SolveError::BrightBoundTooFaint`] or
/// [`SolveError::FaintBoundTooBright`] naming the insufficient bound.
///
/// Deterministic: identical inputs always produce identical output.
pub fn find_limiting_magnitude(
    budget: &NoiseBudget,
    instrument: &InstrumentConfig,
    conditions: &ObservationConditions,
    target_snr: f64,
    bracket: (f64, f64),
    tolerance: f64,
) -> Result<SolveResult, SolveError> {
    let (bright, faint) = bracket;
    if !(bright < faint) || !(tolerance > 0.0) || !(target_snr > 0.0) {
        return Err(SolveError::InvalidBracket {
            bright,
            faint,
            tolerance,
        });
    }

    let snr_bright = compute_snr(budget, instrument, conditions, bright)?;
    if snr_bright <= target_snr {
        return Err(SolveError::BrightBoundTooFaint {
            bound: bright,
            snr: snr_bright,
            target: target_snr,
        });
    }
    let snr_faint = compute_snr(budget, instrument, conditions, faint)?;
    if snr_faint >= target_snr {
        return Err(SolveError::FaintBoundTooBright {
            bound: faint,
            snr: snr_faint,
            target: target_snr,
        });
    }

    let mut low = bright;
    let mut high = faint;
    let mut iterations = 0;

    while (high - low) > tolerance && iterations < MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let snr_mid = compute_snr(budget, instrument, conditions, mid)?;
        if snr_mid > target_snr {
            // Still above threshold: the root lies faintward
            low = mid;
        } else {
            high = mid;
        }
        iterations += 1;
    }

    let width = high - low;
    if width > tolerance {
        return Err(SolveError::MaxIterations { iterations, width });
    }

    Ok(SolveResult {
        magnitude: (low + high) / 2.0,
        iterations,
        converged: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::ApertureRadius;
    use crate::noise::compute_noise_budget;
    use approx::assert_relative_eq;
    use std::time::Duration;

    fn demo_instrument() -> InstrumentConfig {
        InstrumentConfig::new(
            "demo",
            0.25,
            2.0,
            0.01,
            5.0,
            25.0,
            ApertureRadius::Pixels(3.0),
        )
    }

    fn demo_conditions() -> ObservationConditions {
        ObservationConditions::new(19.0, Duration::from_secs(3600), 1, 50.0)
    }

    #[test]
    fn test_finds_limiting_magnitude() {
        let instrument = demo_instrument();
        let conditions = demo_conditions();
        let budget = compute_noise_budget(&instrument, &conditions).expect("valid");

        let result =
            find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (15.0, 25.0), 1e-3)
                .expect("root is bracketed");

        assert!(result.converged);
        assert!(result.iterations <= MAX_ITERATIONS);
        assert_relative_eq!(result.magnitude, 24.3883, epsilon = 2e-3);

        // The recovered magnitude reproduces the target S/N
        let snr = compute_snr(&budget, &instrument, &conditions, result.magnitude)
            .expect("valid magnitude");
        assert_relative_eq!(snr, 5.0, epsilon = 0.01);
    }

    #[test]
    fn test_matches_closed_form() {
        let instrument = demo_instrument();
        let conditions = demo_conditions();
        let budget = compute_noise_budget(&instrument, &conditions).expect("valid");

        // With background-limited noise the root has a closed form:
        // m = zp - 2.5 log10(target * total_noise / t)
        let expected = instrument.zero_point_mag
            - 2.5 * (5.0 * budget.total_noise_e() / conditions.total_exposure_s()).log10();

        let result =
            find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (10.0, 30.0), 1e-6)
                .expect("root is bracketed");
        assert_relative_eq!(result.magnitude, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_bracket_too_faint_everywhere() {
        let instrument = demo_instrument();
        let conditions = demo_conditions();
        let budget = compute_noise_budget(&instrument, &conditions).expect("valid");

        // True root is near 24.4; a [10, 12] bracket never drops below 5
        let err =
            find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (10.0, 12.0), 1e-3)
                .expect_err("root not bracketed");
        assert!(matches!(err, SolveError::FaintBoundTooBright { .. }));
    }

    #[test]
    fn test_bracket_too_bright_bound_fails() {
        let instrument = demo_instrument();
        let conditions = demo_conditions();
        let budget = compute_noise_budget(&instrument, &conditions).expect("valid");

        // Both bounds fainter than the root: even the bright bound misses S/N 5
        let err =
            find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (26.0, 28.0), 1e-3)
                .expect_err("root not bracketed");
        assert!(matches!(err, SolveError::BrightBoundTooFaint { .. }));
    }

    #[test]
    fn test_rejects_malformed_bracket() {
        let instrument = demo_instrument();
        let conditions = demo_conditions();
        let budget = compute_noise_budget(&instrument, &conditions).expect("valid");

        assert!(matches!(
            find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (25.0, 15.0), 1e-3),
            Err(SolveError::InvalidBracket { .. })
        ));
        assert!(matches!(
            find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (15.0, 25.0), 0.0),
            Err(SolveError::InvalidBracket { .. })
        ));
        assert!(matches!(
            find_limiting_magnitude(&budget, &instrument, &conditions, -1.0, (15.0, 25.0), 1e-3),
            Err(SolveError::InvalidBracket { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let instrument = demo_instrument();
        let conditions = demo_conditions();
        let budget = compute_noise_budget(&instrument, &conditions).expect("valid");

        let a = find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (15.0, 25.0), 1e-4)
            .expect("bracketed");
        let b = find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (15.0, 25.0), 1e-4)
            .expect("bracketed");
        assert_eq!(a, b);
    }

    #[test]
    fn test_iteration_budget_exhausted_below_float_resolution() {
        let instrument = demo_instrument();
        let conditions = demo_conditions();
        let budget = compute_noise_budget(&instrument, &conditions).expect("valid");

        // A 10 mag bracket cannot be halved to 1e-25 in 64 iterations;
        // the solver must report the exhausted budget, not a boundary
        // value dressed up as a root.
        let err =
            find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (15.0, 25.0), 1e-25)
                .expect_err("tolerance is unreachable");
        match err {
            SolveError::MaxIterations { iterations, width } => {
                assert_eq!(iterations, MAX_ITERATIONS);
                assert!(width > 1e-25);
            }
            other => panic!("expected MaxIterations, got {other:?}"),
        }
    }

    #[test]
    fn test_iteration_count_matches_bracket_halving() {
        let instrument = demo_instrument();
        let conditions = demo_conditions();
        let budget = compute_noise_budget(&instrument, &conditions).expect("valid");

        let result =
            find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (15.0, 25.0), 1e-3)
                .expect("bracketed");
        // Width 10 at tolerance 1e-3 needs ceil(log2(1e4)) = 14 halvings
        assert_eq!(result.iterations, 14);
    }
}
