use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

use fazel::config::{Config, ConfigError};
use fazel::plan::{ObservationRequest, Plan, PlanError};
use fazel::pointing::{Feed, WindowEvent, WindowEventKind};
use fazel::scan::{self, OriginPolicy, ScanPattern};
use fazel::sky::{EquatorialCoord, EquatorialTransform, SkyError};

#[derive(Parser)]
#[command(name = "fazel")]
#[command(about = "Pointing schedules and scan patterns for a steerable dish")]
struct Cli {
    /// YAML file with observer, cable wrap limits and named sources
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a pointing file tracking a source
    Fazel {
        /// Source name (eg. 'Cas A', 'PSR B1957+20')
        #[arg(short, long)]
        source: String,
        /// J2000 right ascension, overrides the source table
        #[arg(long, requires = "dec", allow_hyphen_values = true)]
        ra: Option<String>,
        /// J2000 declination, overrides the source table (eg. -05d00m00s)
        #[arg(long, requires = "ra", allow_hyphen_values = true)]
        dec: Option<String>,
        /// Date (yyyy-mm-dd), defaults to today (UTC)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long, default_value = "chime")]
        feed: Feed,
        /// Starting hour after midnight UTC, defaults to the current hour
        #[arg(long)]
        hour_start: Option<u32>,
        /// Observation length
        #[arg(long, default_value = "4h", value_parser = parse_duration)]
        duration: Duration,
        /// Time between pointings
        #[arg(long, default_value = "1s", value_parser = parse_duration)]
        step: Duration,
        /// Output file, defaults to fazel_<source>_<date>_<feed>.txt
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the offsets of a scan pattern
    Scan {
        #[arg(short, long, value_enum)]
        pattern: ScanPattern,
        /// Number of grid points away from the origin in each direction
        #[arg(short)]
        n: u32,
        #[arg(long, value_enum, default_value_t = OriginPolicy::Exclude)]
        origin: OriginPolicy,
        /// Grid spacing in degrees; integer offsets are printed when absent
        #[arg(long)]
        spacing: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// List known feeds and their mounting offsets
    Feeds,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Sky(#[from] SkyError),
    #[error("{0}")]
    Plan(#[from] PlanError),
    #[error("source {0} not found in the source table, pass --ra and --dec")]
    UnknownSource(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fazel {
            source,
            ra,
            dec,
            date,
            feed,
            hour_start,
            duration,
            step,
            output,
        } => load_config(cli.config).and_then(|config| {
            let now = Utc::now();
            let request = ObservationRequest {
                source: resolve_source(&config, &source, ra.zip(dec))?,
                source_name: source,
                date: date.unwrap_or_else(|| now.date_naive()),
                hour_start: hour_start.unwrap_or_else(|| now.hour()),
                duration,
                step,
                feed,
            };
            fazel_file(&config, request, output)
        }),
        Commands::Scan {
            pattern,
            n,
            origin,
            spacing,
            json,
        } => print_scan(pattern, n, origin, spacing, json),
        Commands::Feeds => {
            print_feeds();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))
}

fn load_config(path: Option<PathBuf>) -> Result<Config, CliError> {
    match path {
        Some(path) => Ok(Config::from_file(&path)?),
        None => Ok(Config::default()),
    }
}

fn resolve_source(
    config: &Config,
    name: &str,
    coordinates: Option<(String, String)>,
) -> Result<EquatorialCoord, CliError> {
    if let Some((ra, dec)) = coordinates {
        return Ok(EquatorialCoord::parse(&ra, &dec)?);
    }
    config
        .find_source(name)
        .map(|(_, coord)| coord)
        .ok_or_else(|| CliError::UnknownSource(name.to_string()))
}

fn fazel_file(
    config: &Config,
    request: ObservationRequest,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let observer = config.observer()?;
    let params = request.feed.params();

    log::info!("Creating Fazel file for     : {}", request.source_name);
    log::info!(
        "RA, Dec (J2000)             : {:.4}, {:.4} degrees",
        request.source.ra_deg,
        request.source.dec_deg
    );
    log::info!("Date (UTC)                  : {}", request.date);
    log::info!("Starting hour (0=midnight)  : {}", request.hour_start);
    log::info!("Feed                        : {}", request.feed);
    log::info!("Alt Offset                  : {} deg", params.altitude_offset_deg);
    log::info!("Az Offset                   : {} deg", params.azimuth_offset_deg);
    log::info!(
        "Observation length          : {}",
        humantime::format_duration(request.duration.to_std().unwrap_or_default())
    );
    log::info!(
        "Time step between pointings : {}",
        humantime::format_duration(request.step.to_std().unwrap_or_default())
    );

    let transform = EquatorialTransform::new(observer);
    let plan = Plan::build(request, &transform, &config.hazard_bounds())?;
    report_windows(&plan);

    let path = output.unwrap_or_else(|| PathBuf::from(plan.request.default_filename()));
    plan.write(&path)?;
    Ok(())
}

fn report_windows(plan: &Plan) {
    let report = &plan.report;

    let entries: Vec<DateTime<Utc>> = report.entries().map(|e| e.timestamp).collect();
    if entries.is_empty() {
        log::info!("Source starts in Alt range");
    } else {
        log::info!("Source enters Alt range at: {}", join_times(&entries));
    }

    let exits: Vec<DateTime<Utc>> = report.exits().map(|e| e.timestamp).collect();
    if exits.is_empty() {
        log::info!("Source ends in Alt range");
    } else {
        log::info!("Source leaves Alt range at: {}", join_times(&exits));
    }

    let hazards: Vec<&WindowEvent> = report.hazards().collect();
    if !hazards.is_empty() {
        log::warn!(
            "You might encounter the cable wrap issue at the following times. Check source by hand!"
        );
        for event in hazards {
            if let WindowEventKind::HazardEntry(boundary) = event.kind {
                log::warn!("  {} ({} boundary)", event.timestamp, boundary);
            }
        }
    }
}

fn join_times(times: &[DateTime<Utc>]) -> String {
    times
        .iter()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Serialize)]
struct Offset {
    x_deg: f64,
    y_deg: f64,
}

fn print_scan(
    pattern: ScanPattern,
    n: u32,
    origin: OriginPolicy,
    spacing: Option<f64>,
    json: bool,
) -> Result<(), CliError> {
    let points = scan::generate(pattern, n, origin);
    log::debug!("{} scan, n={}, origin {}: {} points", pattern, n, origin, points.len());

    match (spacing, json) {
        (None, false) => {
            for p in &points {
                println!("{} {}", p.x, p.y);
            }
        }
        (None, true) => println!("{}", serde_json::to_string_pretty(&points)?),
        (Some(spacing), false) => {
            for p in &points {
                let (x, y) = p.scaled(spacing);
                println!("{:.4} {:.4}", x, y);
            }
        }
        (Some(spacing), true) => {
            let offsets: Vec<Offset> = points
                .iter()
                .map(|p| {
                    let (x_deg, y_deg) = p.scaled(spacing);
                    Offset { x_deg, y_deg }
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&offsets)?);
        }
    }
    Ok(())
}

fn print_feeds() {
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>10}",
        "feed", "alt_off", "az_off", "floor", "tolerance"
    );
    for feed in Feed::ALL {
        let p = feed.params();
        println!(
            "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            feed.to_string(),
            p.altitude_offset_deg,
            p.azimuth_offset_deg,
            p.elevation_floor_deg,
            p.angular_tolerance_deg
        );
    }
}
