//! Instrument configuration for limiting-magnitude calculations.
//!
//! An [`InstrumentConfig`] bundles the detector and photometric parameters
//! that characterize an imager in a single filter: pixel scale, gain, dark
//! current, read noise, zero point, and the photometric aperture. It is
//! created once at startup and shared read-only by the noise and signal
//! models.
//!
//! All internal computation is carried out in photo-electrons. The zero
//! point is the magnitude that produces 1 e⁻/s, so no gain factor enters
//! the noise or signal formulas; `gain_e_per_adu` is validated and carried
//! for callers that convert electron results back to detector counts.

use std::f64::consts::PI;

use once_cell::sync::Lazy;
use thiserror::Error;

/// Errors from instrument or observation parameter validation.
///
/// Raised eagerly at the boundary of the noise and signal models; invalid
/// parameters are never silently clamped.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Exposure time must be strictly positive.
    #[error("exposure time must be positive, got {seconds:.3} s")]
    NonPositiveExposure {
        /// Offending exposure time in seconds.
        seconds: f64,
    },

    /// At least one read is required.
    #[error("number of exposures must be at least 1")]
    ZeroExposures,

    /// Photometric aperture radius must be strictly positive.
    #[error("aperture radius must be positive, got {radius:.3}")]
    NonPositiveAperture {
        /// Offending radius (pixels or arcsec, as configured).
        radius: f64,
    },

    /// Pixel scale must be strictly positive.
    #[error("pixel scale must be positive, got {arcsec_per_px:.4} arcsec/px")]
    NonPositivePixelScale {
        /// Offending pixel scale.
        arcsec_per_px: f64,
    },

    /// Detector gain must be strictly positive.
    #[error("gain must be positive, got {gain:.3} e-/ADU")]
    NonPositiveGain {
        /// Offending gain.
        gain: f64,
    },

    /// A rate or noise parameter was negative.
    #[error("{name} must be non-negative, got {value:.4}")]
    NegativeRate {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Zero-point magnitude must be finite.
    #[error("zero point must be finite, got {value}")]
    NonFiniteZeroPoint {
        /// Offending zero point.
        value: f64,
    },

    /// Sky brightness must be finite.
    #[error("sky brightness must be finite, got {value}")]
    NonFiniteSkyBrightness {
        /// Offending sky brightness.
        value: f64,
    },

    /// Candidate magnitude must be finite.
    #[error("magnitude must be finite, got {value}")]
    NonFiniteMagnitude {
        /// Offending magnitude.
        value: f64,
    },

    /// Conditions percentile must be in (0, 100].
    #[error("conditions percentile must be in (0, 100], got {value:.1}")]
    PercentileOutOfRange {
        /// Offending percentile.
        value: f64,
    },
}

/// Photometric aperture radius, in pixels or on-sky arcseconds.
///
/// Seeing-limited apertures are naturally quoted in arcseconds; detector
/// work often uses pixels. Either form resolves to pixels through the
/// instrument pixel scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApertureRadius {
    /// Radius in detector pixels.
    Pixels(f64),
    /// Radius in arcseconds on the sky.
    Arcsec(f64),
}

impl ApertureRadius {
    /// Radius in pixels for the given pixel scale (arcsec/pixel).
    pub fn as_pixels(&self, pixel_scale_arcsec: f64) -> f64 {
        match *self {
            ApertureRadius::Pixels(px) => px,
            ApertureRadius::Arcsec(arcsec) => arcsec / pixel_scale_arcsec,
        }
    }

    /// Raw configured value, for validation and display.
    pub fn value(&self) -> f64 {
        match *self {
            ApertureRadius::Pixels(px) => px,
            ApertureRadius::Arcsec(arcsec) => arcsec,
        }
    }
}

/// Configuration for a NIR imaging instrument in a single filter.
#[derive(Debug, Clone)]
pub struct InstrumentConfig {
    /// Instrument/filter name.
    pub name: String,
    /// Pixel scale in arcseconds per pixel.
    pub pixel_scale_arcsec: f64,
    /// Detector gain in electrons per ADU.
    pub gain_e_per_adu: f64,
    /// Dark current in electrons per pixel per second.
    pub dark_current_e_p_s: f64,
    /// Read noise in electrons per pixel per read.
    pub read_noise_e: f64,
    /// Photometric zero point: magnitude producing 1 e⁻/s.
    pub zero_point_mag: f64,
    /// Photometric aperture radius.
    pub aperture: ApertureRadius,
}

impl InstrumentConfig {
    /// Create a new instrument configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        pixel_scale_arcsec: f64,
        gain_e_per_adu: f64,
        dark_current_e_p_s: f64,
        read_noise_e: f64,
        zero_point_mag: f64,
        aperture: ApertureRadius,
    ) -> Self {
        Self {
            name: name.into(),
            pixel_scale_arcsec,
            gain_e_per_adu,
            dark_current_e_p_s,
            read_noise_e,
            zero_point_mag,
            aperture,
        }
    }

    /// Check all physical parameters.
    ///
    /// Called by the noise and signal models before any computation so
    /// that invalid configurations fail at the boundary.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pixel_scale_arcsec > 0.0) {
            return Err(ConfigError::NonPositivePixelScale {
                arcsec_per_px: self.pixel_scale_arcsec,
            });
        }
        if !(self.gain_e_per_adu > 0.0) {
            return Err(ConfigError::NonPositiveGain {
                gain: self.gain_e_per_adu,
            });
        }
        if !(self.dark_current_e_p_s >= 0.0) {
            return Err(ConfigError::NegativeRate {
                name: "dark current",
                value: self.dark_current_e_p_s,
            });
        }
        if !(self.read_noise_e >= 0.0) {
            return Err(ConfigError::NegativeRate {
                name: "read noise",
                value: self.read_noise_e,
            });
        }
        if !self.zero_point_mag.is_finite() {
            return Err(ConfigError::NonFiniteZeroPoint {
                value: self.zero_point_mag,
            });
        }
        if !(self.aperture.value() > 0.0) {
            return Err(ConfigError::NonPositiveAperture {
                radius: self.aperture.value(),
            });
        }
        Ok(())
    }

    /// Aperture radius in pixels.
    pub fn aperture_radius_px(&self) -> f64 {
        self.aperture.as_pixels(self.pixel_scale_arcsec)
    }

    /// Number of pixels covered by the circular aperture (π·r²).
    pub fn aperture_pixels(&self) -> f64 {
        let r = self.aperture_radius_px();
        PI * r * r
    }

    /// On-sky aperture area in square arcseconds.
    pub fn aperture_area_arcsec2(&self) -> f64 {
        self.aperture_pixels() * self.pixel_scale_arcsec * self.pixel_scale_arcsec
    }
}

/// Standard instrument models.
pub mod models {
    use super::*;

    /// HAWK-I-like Ks-band imager on an 8 m class telescope.
    ///
    /// Pixel scale, dark current, and read noise follow the HAWK-I user
    /// manual values; the aperture matches the 0.8″ median seeing disk.
    pub static HAWKI_KS: Lazy<InstrumentConfig> = Lazy::new(|| {
        InstrumentConfig::new(
            "HAWK-I Ks",
            0.106,
            1.705,
            0.0125,
            8.5,
            24.0,
            ApertureRadius::Arcsec(0.8),
        )
    });

    /// HAWK-I-like J-band configuration on the same detector.
    pub static HAWKI_J: Lazy<InstrumentConfig> = Lazy::new(|| {
        InstrumentConfig::new(
            "HAWK-I J",
            0.106,
            1.705,
            0.0125,
            8.5,
            23.7,
            ApertureRadius::Arcsec(0.8),
        )
    });
}
