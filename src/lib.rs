//! Exposure-time calculations for ground-based near-infrared imaging.
//!
//! This crate answers the observer's question "how faint can I go?": given
//! an instrument configuration and sky conditions, it builds a photon
//! noise budget, evaluates signal-to-noise ratio as a function of stellar
//! magnitude, and inverts that relation to the limiting magnitude at a
//! target S/N threshold.
//!
//! The computation is split into small pure pieces:
//!
//! - [`compute_noise_budget`]: sky, dark-current, and read noise in
//!   photo-electrons over the photometric aperture. The budget depends
//!   only on the configuration, never on the candidate star, so it is
//!   computed once and reused across magnitude queries.
//! - [`compute_signal`]: stellar magnitude to collected photo-electrons
//!   through the instrument zero point.
//! - [`compute_snr`]: signal over total noise for one magnitude.
//! - [`find_limiting_magnitude`]: bisection over a magnitude bracket to
//!   the magnitude where S/N crosses the threshold.
//!
//! Printing and plotting live in the `limiting_mag` binary; the library
//! performs no I/O.
//!
//! ```rust
//! use std::time::Duration;
//! use nir_etc::{
//!     compute_noise_budget, compute_snr, find_limiting_magnitude,
//!     ApertureRadius, InstrumentConfig, ObservationConditions,
//! };
//!
//! let instrument = InstrumentConfig::new(
//!     "demo",
//!     0.25,                      // arcsec/pixel
//!     2.0,                       // e-/ADU
//!     0.01,                      // dark current e-/s/pixel
//!     5.0,                       // read noise e-/pixel/read
//!     25.0,                      // zero point (mag at 1 e-/s)
//!     ApertureRadius::Pixels(3.0),
//! );
//! let conditions = ObservationConditions::new(19.0, Duration::from_secs(3600), 1, 50.0);
//!
//! let budget = compute_noise_budget(&instrument, &conditions).unwrap();
//! let result =
//!     find_limiting_magnitude(&budget, &instrument, &conditions, 5.0, (15.0, 25.0), 1e-3)
//!         .unwrap();
//!
//! let snr = compute_snr(&budget, &instrument, &conditions, result.magnitude).unwrap();
//! assert!((snr - 5.0).abs() < 0.01);
//! ```

pub mod instrument;
pub mod noise;
pub mod observation;
pub mod signal;
pub mod snr;
pub mod solver;

// Re-exports for easier access
pub use instrument::{ApertureRadius, ConfigError, InstrumentConfig};
pub use noise::{compute_noise_budget, NoiseBudget};
pub use observation::ObservationConditions;
pub use signal::compute_signal;
pub use snr::{compute_snr, snr_curve, SnrError};
pub use solver::{find_limiting_magnitude, SolveError, SolveResult};
