//! dashsim
//!
//! Headless driver for the vehicle simulator: feeds scripted pedal inputs and
//! prints the snapshot the instrument cluster would render.
//!
//! # Usage
//!
//! ```bash
//! # Offline full-throttle launch as JSON lines
//! dashsim run --scenario launch
//!
//! # Every 10th frame of a custom drive as CSV
//! dashsim --config phaeton.json run --scenario drive.json --every 10 --format csv -o drive.csv
//!
//! # Wall-clock pacing, 4 updates per second
//! dashsim live --scenario cruise
//! ```

mod output;
mod scenario;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use log::{LevelFilter, info};
use simcore::VehicleConfig;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use vehicle::VehicleSimulator;

use crate::output::{Format, SnapshotWriter};
use crate::scenario::Scenario;

/// Frame period of the live loop
const LIVE_FRAME: Duration = Duration::from_millis(30);
/// The center display refreshes at 4 Hz
const LIVE_REPORT: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "dashsim")]
#[command(version, about = "Headless vehicle simulator for an instrument cluster", long_about = None)]
struct Cli {
    /// Vehicle config (JSON); missing fields keep the built-in defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate as fast as possible with a fixed timestep
    Run {
        /// Timestep (s)
        #[arg(long, default_value_t = 0.03)]
        dt: f64,

        /// Built-in scenario name or path to a scenario JSON file
        #[arg(short, long, default_value = "launch")]
        scenario: String,

        /// Emit every n-th frame
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        every: u64,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pace the simulation against the wall clock
    Live {
        /// Built-in scenario name or path to a scenario JSON file
        #[arg(short, long, default_value = "cruise")]
        scenario: String,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

fn build_simulator(config: Option<&PathBuf>) -> Result<VehicleSimulator, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => VehicleConfig::from_file(path)?,
        None => VehicleConfig::default(),
    };
    Ok(VehicleSimulator::new(config)?)
}

fn run(
    mut sim: VehicleSimulator,
    scenario: &Scenario,
    dt: f64,
    every: u64,
    format: Format,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !(dt > 0.0) {
        return Err(format!("timestep must be positive, got {}", dt).into());
    }

    let out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = SnapshotWriter::new(out, format);

    let frames = (scenario.duration() / dt).ceil() as u64;
    for frame in 1..=frames {
        let (throttle, brake) = scenario.inputs_at(sim.elapsed());
        sim.set_inputs(throttle, brake);
        let snapshot = sim.update(dt);
        if frame % every == 0 {
            writer.write(sim.elapsed(), &snapshot)?;
        }
    }
    writer.flush()?;

    let last = sim.snapshot();
    info!(
        "'{}': {} frames, {:.1} s simulated, {} km/h in gear {}, {:.2} L left",
        scenario.name,
        frames,
        sim.elapsed(),
        last.speed_kmh,
        last.gear,
        last.fuel_liters
    );
    Ok(())
}

fn live(mut sim: VehicleSimulator, scenario: &Scenario, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = SnapshotWriter::new(io::stdout().lock(), format);
    let mut last_frame = Instant::now();
    let mut last_report: Option<Instant> = None;

    while sim.elapsed() < scenario.duration() {
        thread::sleep(LIVE_FRAME);
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        let (throttle, brake) = scenario.inputs_at(sim.elapsed());
        sim.set_inputs(throttle, brake);
        let snapshot = sim.update(dt);

        let due = last_report.is_none_or(|at| now.duration_since(at) >= LIVE_REPORT);
        if due {
            writer.write(sim.elapsed(), &snapshot)?;
            writer.flush()?;
            last_report = Some(now);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    TermLogger::init(
        parse_level(&cli.log_level),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let sim = build_simulator(cli.config.as_ref())?;

    match cli.command {
        Commands::Run {
            dt,
            scenario,
            every,
            format,
            output,
        } => {
            let scenario = Scenario::load(&scenario)?;
            info!("running '{}' offline ({:.1} s at dt = {} s)", scenario.name, scenario.duration(), dt);
            run(sim, &scenario, dt, every, format, output)?;
        }
        Commands::Live { scenario, format } => {
            let scenario = Scenario::load(&scenario)?;
            info!("running '{}' live ({:.1} s)", scenario.name, scenario.duration());
            live(sim, &scenario, format)?;
        }
    }

    Ok(())
}
