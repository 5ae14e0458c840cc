//! Stellar magnitude to collected photo-electrons.

use crate::instrument::{ConfigError, InstrumentConfig};
use crate::observation::ObservationConditions;

/// Expected source electrons for a star of the given magnitude.
///
/// Converts magnitude to an electron rate through the instrument zero
/// point, `10^((zp − m)/2.5)` e⁻/s, then integrates over the total
/// exposure time. Strictly decreasing in magnitude, which the limiting
/// magnitude solver relies on.
///
/// # Errors
///
/// Returns [`ConfigError`] if the instrument or conditions fail
/// validation, or if `magnitude` is not finite. Any finite magnitude,
/// including negative ones, is accepted.
pub fn compute_signal(
    instrument: &InstrumentConfig,
    conditions: &ObservationConditions,
    magnitude: f64,
) -> Result<f64, ConfigError> {
    instrument.validate()?;
    conditions.validate()?;
    if !magnitude.is_finite() {
        return Err(ConfigError::NonFiniteMagnitude { value: magnitude });
    }

    let electrons_per_s = 10f64.powf((instrument.zero_point_mag - magnitude) / 2.5);
    Ok(electrons_per_s * conditions.total_exposure_s())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::ApertureRadius;
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
    fn test_star_at_zero_point_gives_one_electron_per_second() {
        let signal = compute_signal(&demo_instrument(), &demo_conditions(), 25.0)
            .expect("valid inputs");
        assert_relative_eq!(signal, 3600.0, max_relative = 1e-12);
    }

    #[test]
    fn test_five_magnitudes_is_factor_hundred() {
        let instrument = demo_instrument();
        let conditions = demo_conditions();
        let bright = compute_signal(&instrument, &conditions, 15.0).expect("valid");
        let faint = compute_signal(&instrument, &conditions, 20.0).expect("valid");
        assert_relative_eq!(bright / faint, 100.0, max_relative = 1e-10);
    }

    #[test]
    fn test_strictly_decreasing_in_magnitude() {
        let instrument = demo_instrument();
        let conditions = demo_conditions();
        let mut previous = f64::INFINITY;
        let mut magnitude = -5.0;
        while magnitude <= 30.0 {
            let signal = compute_signal(&instrument, &conditions, magnitude).expect("valid");
            assert!(
                signal < previous,
                "signal not decreasing at magnitude {magnitude}"
            );
            previous = signal;
            magnitude += 0.5;
        }
    }

    #[test]
    fn test_scales_with_total_exposure() {
        let instrument = demo_instrument();
        let one_read = ObservationConditions::new(19.0, Duration::from_secs(600), 1, 50.0);
        let six_reads = ObservationConditions::new(19.0, Duration::from_secs(600), 6, 50.0);
        let a = compute_signal(&instrument, &one_read, 20.0).expect("valid");
        let b = compute_signal(&instrument, &six_reads, 20.0).expect("valid");
        assert_relative_eq!(b, 6.0 * a, max_relative = 1e-12);
    }

    #[test]
    fn test_non_finite_magnitude_rejected() {
        assert!(matches!(
            compute_signal(&demo_instrument(), &demo_conditions(), f64::NAN),
            Err(ConfigError::NonFiniteMagnitude { .. })
        ));
    }

    #[test]
    fn test_non_finite_zero_point_rejected() {
        let mut instrument = demo_instrument();
        instrument.zero_point_mag = f64::INFINITY;
        assert!(matches!(
            compute_signal(&instrument, &demo_conditions(), 20.0),
            Err(ConfigError::NonFiniteZeroPoint { .. })
        ));
    }
}
