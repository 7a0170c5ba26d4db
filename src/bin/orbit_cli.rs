use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;

use solar_orrery::astro::ReferenceFrame;
use solar_orrery::consts::{DAYS_PER_YEAR, DEFAULT_BODY_FILE, DEFAULT_YEAR_SECONDS};
use solar_orrery::file::read_file;
use solar_orrery::logging;
use solar_orrery::model::{BodyState, Orrery};

#[derive(Debug, Parser)]
struct Args {
    /// Body to describe, case-insensitive
    name: String,
    /// Also print the solved state at this many seconds
    #[arg(long)]
    time: Option<f64>,
    #[arg(long, default_value = DEFAULT_BODY_FILE)]
    bodies: PathBuf,
    #[arg(long, default_value_t = DEFAULT_YEAR_SECONDS)]
    year_seconds: f64,
    #[arg(long, default_value_t = DAYS_PER_YEAR)]
    days_per_year: f64,
}

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

    let body = orrery
        .find_body(&args.name)
        .ok_or_else(|| format!("no body named {:?}", args.name))?;

    println!("Orbital characteristics for {}", body.info.name);
    println!("- Asset: {}", body.info.asset);
    println!("- Display radius: {}", body.info.radius);
    if body.id == orrery.reference_body().id {
        println!("- Reference body");
    }
    describe_orbit(&orrery, &body.state);

    if let Some(time) = args.time {
        let solved = orrery.tick(time)[&body.id];
        let p = solved.position;
        println!("State at t = {} s", time);
        println!("- Position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
        println!("- Rotation angle: {:.3} rad", solved.rotation_angle);
    }
    Ok(())
}

fn describe_orbit(orrery: &Orrery, state: &BodyState) {
    match state {
        BodyState::FixedAtOrigin { rotation_speed } => {
            println!("- Fixed at the origin");
            println!("- Rotation speed: {} rad/s", rotation_speed);
        }
        BodyState::Orbiting { parent_id, orbit } => {
            let speeds = orbit.speeds();
            println!("- Orbiting: {}", orrery.get_body(*parent_id).info.name);
            println!("- Semi-major axis: {}", orbit.semimajor_axis());
            println!("- Semi-minor axis: {}", orbit.semiminor_axis());
            println!("- Orbital eccentricity: {}", orbit.eccentricity());
            println!("- Orbital inclination: {}", orbit.inclination_degrees());
            println!("- Orbit speed: {} rad/s", speeds.orbit);
            println!("- Orbital period: {} s", speeds.orbit_period_seconds());
            println!("- Rotation speed: {} rad/s", speeds.rotation);
        }
        BodyState::Satellite {
            primary_id,
            radius,
            speeds,
        } => {
            println!("- Satellite of: {}", orrery.get_body(*primary_id).info.name);
            println!("- Orbit radius: {}", radius);
            println!("- Orbit speed: {} rad/s", speeds.orbit);
            println!("- Orbital period: {} s", speeds.orbit_period_seconds());
            println!("- Rotation speed: {} rad/s", speeds.rotation);
        }
    }
}
