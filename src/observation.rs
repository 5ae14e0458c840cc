//! Sky and exposure conditions for a planned observation.
//!
//! [`ObservationConditions`] has the same lifecycle as
//! [`InstrumentConfig`](crate::InstrumentConfig): built once, never
//! mutated, shared read-only by the noise and signal models.
//!
//! The exposure follows the standard NIR DIT×NDIT convention: `exposure`
//! is the per-read integration time and `n_exposures` the number of
//! co-added reads. Sky and dark charge accumulate over the total
//! integration time; read noise is paid once per read.

use std::time::Duration;

use once_cell::sync::Lazy;

use crate::instrument::ConfigError;

/// Sky and exposure parameters for one observation.
#[derive(Debug, Clone)]
pub struct ObservationConditions {
    /// Sky surface brightness in the observed filter, mag/arcsec².
    pub sky_mag_per_arcsec2: f64,
    /// Per-read integration time (DIT).
    pub exposure: Duration,
    /// Number of co-added reads (NDIT).
    pub n_exposures: u32,
    /// Percentile of atmospheric conditions assumed (e.g. 50.0 for median).
    pub percentile: f64,
}

impl ObservationConditions {
    /// Create new observation conditions.
    pub fn new(
        sky_mag_per_arcsec2: f64,
        exposure: Duration,
        n_exposures: u32,
        percentile: f64,
    ) -> Self {
        Self {
            sky_mag_per_arcsec2,
            exposure,
            n_exposures,
            percentile,
        }
    }

    /// Check all observation parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let seconds = self.exposure.as_secs_f64();
        if !(seconds > 0.0) {
            return Err(ConfigError::NonPositiveExposure { seconds });
        }
        if self.n_exposures == 0 {
            return Err(ConfigError::ZeroExposures);
        }
        if !self.sky_mag_per_arcsec2.is_finite() {
            return Err(ConfigError::NonFiniteSkyBrightness {
                value: self.sky_mag_per_arcsec2,
            });
        }
        if !(self.percentile > 0.0 && self.percentile <= 100.0) {
            return Err(ConfigError::PercentileOutOfRange {
                value: self.percentile,
            });
        }
        Ok(())
    }

    /// Total integration time in seconds (DIT × NDIT).
    pub fn total_exposure_s(&self) -> f64 {
        self.exposure.as_secs_f64() * self.n_exposures as f64
    }
}

/// Reference sky conditions.
pub mod skies {
    use super::*;

    /// Median Ks-band sky at a dark site, one hour total integration.
    pub static KS_MEDIAN_1H: Lazy<ObservationConditions> =
        Lazy::new(|| ObservationConditions::new(13.0, Duration::from_secs(3600), 1, 50.0));

    /// Median J-band sky at a dark site, one hour total integration.
    pub static J_MEDIAN_1H: Lazy<ObservationConditions> =
        Lazy::new(|| ObservationConditions::new(16.5, Duration::from_secs(3600), 1, 50.0));
}
