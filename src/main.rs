use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;
use tracing::{error, info};

use solar_orrery::astro::ReferenceFrame;
use solar_orrery::consts::{DAYS_PER_YEAR, DEFAULT_BODY_FILE, DEFAULT_YEAR_SECONDS};
use solar_orrery::file::read_file;
use solar_orrery::gui::Simulation;
use solar_orrery::logging;

#[derive(Debug, Parser)]
struct Args {
    /// Body table to load
    #[arg(long, default_value = DEFAULT_BODY_FILE)]
    bodies: PathBuf,
    /// Directory that asset identifiers are resolved against
    #[arg(long, default_value = "public")]
    asset_root: PathBuf,
    /// Seconds on screen for one orbit of the reference body
    #[arg(long, default_value_t = DEFAULT_YEAR_SECONDS)]
    year_seconds: f64,
    /// Reference-body days per reference-body year
    #[arg(long, default_value_t = DAYS_PER_YEAR)]
    days_per_year: f64,
}

fn main() {
    logging::init();
    if let Err(e) = run(Args::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let valid = |x: f64| x > 0.0 && x.is_finite();
    if !(valid(args.year_seconds) && valid(args.days_per_year)) {
        return Err("--year-seconds and --days-per-year must be positive".into());
    }
    let frame = ReferenceFrame::new(args.year_seconds, args.days_per_year);
    let orrery = read_file(&args.bodies, frame)?;

    let mut window = Window::new("Solar System");
    window.set_light(Light::StickToCamera);
    window.set_background_color(0.0, 0.0, 0.02);
    window.set_framerate_limit(Some(60));

    info!("Starting simulation, one year is {} s", args.year_seconds);
    let simulation = Simulation::new(orrery, &args.asset_root, &mut window);
    window.render_loop(simulation);
    Ok(())
}
