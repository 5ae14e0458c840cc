//! Report the limiting magnitude for an instrument and sky configuration.
//!
//! Prints the noise budget and the magnitude at which S/N crosses the
//! target threshold, and optionally renders the S/N-vs-magnitude curve to
//! a PNG. All numeric work happens in the library; this binary is
//! presentation glue only.

use std::time::Duration;

use clap::Parser;
use plotters::prelude::*;

use nir_etc::{
    compute_noise_budget, compute_snr, find_limiting_magnitude, snr_curve, ApertureRadius,
    InstrumentConfig, ObservationConditions,
};

#[derive(Parser, Debug)]
#[command(
    name = "limiting_mag",
    about = "Compute the limiting magnitude of a NIR imager at a target S/N"
)]
struct Args {
    /// Photometric zero point (magnitude at 1 e-/s)
    #[arg(long, default_value_t = 25.0)]
    zero_point: f64,

    /// Pixel scale in arcsec/pixel
    #[arg(long, default_value_t = 0.25)]
    pixel_scale: f64,

    /// Detector gain in e-/ADU
    #[arg(long, default_value_t = 2.0)]
    gain: f64,

    /// Dark current in e-/pixel/s
    #[arg(long, default_value_t = 0.01)]
    dark_current: f64,

    /// Read noise in e-/pixel/read
    #[arg(long, default_value_t = 5.0)]
    read_noise: f64,

    /// Aperture radius in pixels
    #[arg(long, default_value_t = 3.0, conflicts_with = "aperture_arcsec")]
    aperture_px: f64,

    /// Aperture radius in arcsec (overrides --aperture-px)
    #[arg(long)]
    aperture_arcsec: Option<f64>,

    /// Sky surface brightness in mag/arcsec²
    #[arg(long, default_value_t = 19.0)]
    sky: f64,

    /// Per-read integration time in seconds
    #[arg(long, default_value_t = 3600.0)]
    exposure: f64,

    /// Number of co-added reads
    #[arg(long, default_value_t = 1)]
    n_exposures: u32,

    /// Conditions percentile assumed for the sky brightness
    #[arg(long, default_value_t = 50.0)]
    percentile: f64,

    /// Target signal-to-noise ratio
    #[arg(long, default_value_t = 5.0)]
    target_snr: f64,

    /// Bright end of the magnitude search bracket
    #[arg(long, default_value_t = 10.0)]
    mag_bright: f64,

    /// Faint end of the magnitude search bracket
    #[arg(long, default_value_t = 30.0)]
    mag_faint: f64,

    /// Convergence tolerance in magnitudes
    #[arg(long, default_value_t = 1e-3)]
    tolerance: f64,

    /// Write the S/N-vs-magnitude curve to this PNG file
    #[arg(long)]
    plot: Option<String>,

    /// Magnitude step for the plotted curve
    #[arg(long, default_value_t = 0.1)]
    curve_step: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if !(args.exposure > 0.0) || !args.exposure.is_finite() {
        return Err(format!("--exposure must be a positive number of seconds, got {}", args.exposure).into());
    }

    let aperture = match args.aperture_arcsec {
        Some(arcsec) => ApertureRadius::Arcsec(arcsec),
        None => ApertureRadius::Pixels(args.aperture_px),
    };
    let instrument = InstrumentConfig::new(
        "cli",
        args.pixel_scale,
        args.gain,
        args.dark_current,
        args.read_noise,
        args.zero_point,
        aperture,
    );
    let conditions = ObservationConditions::new(
        args.sky,
        Duration::from_secs_f64(args.exposure),
        args.n_exposures,
        args.percentile,
    );

    let budget = compute_noise_budget(&instrument, &conditions)?;
    println!("Noise budget ({:.0} s total integration)", conditions.total_exposure_s());
    println!("{:-<42}", "");
    println!("{:<24} {:>12.2}", "Sky noise (e-)", budget.sky_noise_e);
    println!("{:<24} {:>12.2}", "Dark current noise (e-)", budget.dark_noise_e);
    println!("{:<24} {:>12.2}", "Read noise (e-)", budget.read_noise_e);
    println!("{:<24} {:>12.2}", "Total noise (e-)", budget.total_noise_e());
    println!();

    let result = find_limiting_magnitude(
        &budget,
        &instrument,
        &conditions,
        args.target_snr,
        (args.mag_bright, args.mag_faint),
        args.tolerance,
    )?;
    let achieved_snr = compute_snr(&budget, &instrument, &conditions, result.magnitude)?;

    println!(
        "Limiting magnitude at S/N {:.1}: {:.3} ({} iterations, S/N there {:.3})",
        args.target_snr, result.magnitude, result.iterations, achieved_snr
    );

    if let Some(path) = &args.plot {
        let curve = snr_curve(
            &budget,
            &instrument,
            &conditions,
            args.mag_bright,
            args.mag_faint,
            args.curve_step,
        )?;
        render_curve(path, &curve, args.target_snr, result.magnitude)?;
        println!("S/N curve written to {path}");
    }

    Ok(())
}

/// Render the S/N curve with a log-scaled y-axis and the threshold line.
fn render_curve(
    path: &str,
    curve: &[(f64, f64)],
    target_snr: f64,
    limiting_mag: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mag_min = curve.first().map(|&(m, _)| m).unwrap_or(10.0);
    let mag_max = curve.last().map(|&(m, _)| m).unwrap_or(30.0);
    let snr_min = curve
        .iter()
        .map(|&(_, s)| s)
        .fold(f64::INFINITY, f64::min)
        .min(target_snr)
        * 0.5;
    let snr_max = curve.iter().map(|&(_, s)| s).fold(0.0f64, f64::max) * 2.0;

    let mut chart = ChartBuilder::on(&root)
        .caption("S/N vs. stellar magnitude", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(mag_min..mag_max, (snr_min..snr_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Magnitude")
        .y_desc("S/N")
        .draw()?;

    chart
        .draw_series(LineSeries::new(curve.iter().copied(), &BLACK))?
        .label("S/N")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BLACK));

    chart
        .draw_series(LineSeries::new(
            [(mag_min, target_snr), (mag_max, target_snr)],
            &RED,
        ))?
        .label(format!("target S/N = {target_snr:.1}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], RED));

    chart.draw_series(LineSeries::new(
        [(limiting_mag, snr_min), (limiting_mag, snr_max)],
        &BLUE,
    ))?;

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
