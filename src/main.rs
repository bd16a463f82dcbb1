//! CatPoint: console entry point.
//!
//! Wires the adapters around the security core and reads one command per
//! line from stdin (see [`catpoint::app::commands`] for the grammar).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  JsonFileRepository   FakeCatDetector   LogEventSink     │
//! │  (SecurityRepository) (CatDetector)     (EventSink)      │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ─────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        SecurityService (pure rules)            │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `catpoint [config.json]`.  `RUST_LOG` controls verbosity.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use catpoint::adapters::cat_detector::FakeCatDetector;
use catpoint::adapters::json_store::JsonFileRepository;
use catpoint::adapters::log_sink::LogEventSink;
use catpoint::app::commands::SecurityCommand;
use catpoint::app::ports::{CatDetector, SecurityRepository};
use catpoint::config::SecurityConfig;
use catpoint::SecurityService;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => SecurityConfig::load(Path::new(&path))
            .with_context(|| format!("loading config {}", Path::new(&path).display()))?,
        None => SecurityConfig::default(),
    };

    let repo = JsonFileRepository::open(&config.state_file)
        .with_context(|| format!("opening state file {}", config.state_file.display()))?;
    let mut service = SecurityService::new(repo, FakeCatDetector::new(), config);
    service.subscribe(LogEventSink::new());

    info!("CatPoint console ready. Type `status` or `quit`.");
    print_status(&service);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let cmd: SecurityCommand = match line.parse() {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };
        match cmd {
            SecurityCommand::Quit => break,
            SecurityCommand::Status => print_status(&service),
            cmd => {
                if let Err(e) = service.handle_command(cmd) {
                    warn!("Command failed: {}", e);
                }
            }
        }
    }

    info!("CatPoint console exiting");
    Ok(())
}

fn print_status<R: SecurityRepository, D: CatDetector>(service: &SecurityService<R, D>) {
    let mut out = io::stdout().lock();
    let alarm = service.alarm_status();
    let arming = service.arming_status();
    // Console output is best-effort; a closed stdout is not worth aborting for.
    let _ = writeln!(out, "System Status: {} ({})", alarm.description(), alarm);
    let _ = writeln!(out, "Arming: {} ({})", arming.description(), arming);
    for sensor in service.sensors() {
        let _ = writeln!(
            out,
            "  {:<7} {:<20} {}",
            sensor.sensor_type().description(),
            sensor.name(),
            if sensor.is_active() { "Active" } else { "Inactive" }
        );
    }
}
