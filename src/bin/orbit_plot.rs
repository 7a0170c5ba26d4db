use std::error::Error;
use std::f64::consts::TAU;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use plotters::prelude::*;
use tracing::{error, info};

use solar_orrery::astro::ReferenceFrame;
use solar_orrery::consts::{DAYS_PER_YEAR, DEFAULT_BODY_FILE, DEFAULT_YEAR_SECONDS};
use solar_orrery::file::read_file;
use solar_orrery::logging;
use solar_orrery::model::{BodyState, Orrery};

/// Plots every orbit from above (the x-z plane), with each body drawn where
/// it is at `--time`.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, default_value = "plots/orbits.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 0.0)]
    time: f64,
    #[arg(long, default_value_t = 800)]
    size: u32,
    #[arg(long, default_value = DEFAULT_BODY_FILE)]
    bodies: PathBuf,
    #[arg(long, default_value_t = DEFAULT_YEAR_SECONDS)]
    year_seconds: f64,
    #[arg(long, default_value_t = DAYS_PER_YEAR)]
    days_per_year: f64,
}

const N_POINTS: usize = 360;

fn main() {
    logging::init();
    if let Err(e) = run(Args::parse()) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let valid = |x: f64| x > 0.0 && x.is_finite();
    if !(valid(args.year_seconds) && valid(args.days_per_year)) {
        return Err("--year-seconds and --days-per-year must be positive".into());
    }
    let frame = ReferenceFrame::new(args.year_seconds, args.days_per_year);
    let orrery = read_file(&args.bodies, frame)?;

    create_parent_dir(&args.output)?;
    draw_plot(&orrery, &args)?;
    info!("Wrote {}", args.output.display());
    Ok(())
}

fn create_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

fn draw_plot(orrery: &Orrery, args: &Args) -> Result<(), Box<dyn Error>> {
    let solved = orrery.tick(args.time);

    // Leave some room past the outermost orbit
    let extent = orrery
        .bodies()
        .filter_map(|body| body.orbit())
        .map(|orbit| orbit.semimajor_axis())
        .fold(1.0, f64::max)
        * 1.1;

    let root = BitMapBackend::new(&args.output, (args.size, args.size)).into_drawing_area();
    root.fill(&BLACK)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(5)
        .caption(
            format!("t = {:.1} s", args.time),
            ("sans-serif", 20).into_font().color(&WHITE),
        )
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    for body in orrery.bodies() {
        let c = body.info.color;
        let color = RGBColor(
            (c.x * 255.0) as u8,
            (c.y * 255.0) as u8,
            (c.z * 255.0) as u8,
        );

        let trace: Vec<(f64, f64)> = match &body.state {
            BodyState::FixedAtOrigin { .. } => vec![],
            BodyState::Orbiting { orbit, .. } => (0..=N_POINTS)
                .map(|i| orbit.point_at_angle(TAU * i as f64 / N_POINTS as f64))
                .map(|p| (p.x, p.z))
                .collect(),
            BodyState::Satellite {
                primary_id, radius, ..
            } => {
                let center = solved[primary_id].position;
                (0..=N_POINTS)
                    .map(|i| TAU * i as f64 / N_POINTS as f64)
                    .map(|s| (center.x + radius * s.cos(), center.z + radius * s.sin()))
                    .collect()
            }
        };
        chart.draw_series(LineSeries::new(trace, &color))?;

        let p = solved[&body.id].position;
        chart.draw_series(std::iter::once(Circle::new(
            (p.x, p.z),
            (body.info.radius / 2.0).max(2.0) as i32,
            color.filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_parent_dir() {
        let dir = std::env::temp_dir().join(format!("orbit_plot_{}", process::id()));
        let output = dir.join("nested").join("orbits.png");
        assert!(!dir.exists());

        create_parent_dir(&output).unwrap();
        assert!(dir.join("nested").is_dir());
        // Already there is fine too
        create_parent_dir(&output).unwrap();
        // As is a bare file name
        create_parent_dir(Path::new("orbits.png")).unwrap();

        fs::remove_dir_all(&dir).unwrap();
    }
}
