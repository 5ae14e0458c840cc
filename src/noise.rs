//! Photon noise budget over the photometric aperture.
//!
//! The budget combines three independent noise sources, all in
//! photo-electrons:
//!
//! - **Sky**: Poisson noise of the sky background collected over the
//!   aperture area and total integration time.
//! - **Dark current**: Poisson noise of thermally generated charge in the
//!   aperture pixels.
//! - **Read noise**: per-pixel electronic noise, added in quadrature over
//!   aperture pixels and reads.
//!
//! None of the terms depends on the candidate star, so a [`NoiseBudget`]
//! is computed once per instrument/conditions pair and reused for every
//! magnitude query.

use crate::instrument::{ConfigError, InstrumentConfig};
use crate::observation::ObservationConditions;

/// Noise components in photo-electrons for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseBudget {
    /// Sky background noise (e⁻), sqrt of the sky electron count.
    pub sky_noise_e: f64,
    /// Dark current noise (e⁻), sqrt of the dark electron count.
    pub dark_noise_e: f64,
    /// Read noise (e⁻) summed in quadrature over pixels and reads.
    pub read_noise_e: f64,
}

impl NoiseBudget {
    /// Total noise (e⁻): quadrature sum of the three components.
    pub fn total_noise_e(&self) -> f64 {
        (self.sky_noise_e * self.sky_noise_e
            + self.dark_noise_e * self.dark_noise_e
            + self.read_noise_e * self.read_noise_e)
            .sqrt()
    }
}

/// Compute the noise budget for an instrument and observation.
///
/// Sky electrons follow from the sky surface brightness through the
/// instrument zero point: `10^((zp − sky_mag)/2.5)` e⁻/s/arcsec², scaled
/// by the aperture area and total integration time. Dark electrons are
/// `rate × time × n_pixels`. Both convert to noise as the square root of
/// the count. Read noise is `read_noise² × n_pixels × n_reads` in
/// quadrature.
///
/// # Errors
///
/// Returns [`ConfigError`] for non-positive exposure time or aperture,
/// negative rates, or a non-finite zero point or sky brightness. Pure
/// function of its inputs; no side effects.
pub fn compute_noise_budget(
    instrument: &InstrumentConfig,
    conditions: &ObservationConditions,
) -> Result<NoiseBudget, ConfigError> {
    instrument.validate()?;
    conditions.validate()?;

    let total_s = conditions.total_exposure_s();
    let n_pixels = instrument.aperture_pixels();

    let sky_e_per_s_arcsec2 =
        10f64.powf((instrument.zero_point_mag - conditions.sky_mag_per_arcsec2) / 2.5);
    let sky_electrons = sky_e_per_s_arcsec2 * instrument.aperture_area_arcsec2() * total_s;

    let dark_electrons = instrument.dark_current_e_p_s * total_s * n_pixels;

    let read_variance =
        instrument.read_noise_e * instrument.read_noise_e * n_pixels * conditions.n_exposures as f64;

    Ok(NoiseBudget {
        sky_noise_e: sky_electrons.sqrt(),
        dark_noise_e: dark_electrons.sqrt(),
        read_noise_e: read_variance.sqrt(),
    })
}
