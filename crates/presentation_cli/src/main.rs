//! weatherdash CLI
//!
//! Terminal front end for the weather dashboard: a one-shot `show` and an
//! interactive `session` that reads commands from stdin.

#![allow(clippy::print_stdout)]

mod render;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use application::{ApplyOutcome, DashboardService};
use clap::{Parser, Subcommand};
use domain::Units;
use infrastructure::{AppConfig, SystemClock, WeatherAdapter, init_telemetry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::render::render;
use crate::session::{HELP, SessionCommand};

/// weatherdash CLI
#[derive(Parser)]
#[command(name = "weatherdash")]
#[command(author, version, about = "Weather dashboard in the terminal", long_about = None)]
struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace); overrides RUST_LOG
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(long, env = "WEATHERDASH_CONFIG")]
    config: Option<PathBuf>,

    /// Log as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch once and print the dashboard
    ///
    /// Example: weatherdash show --city Oslo --units imperial --hour 4
    Show {
        /// City to search for (default: dashboard.default_city)
        #[arg(short, long)]
        city: Option<String>,

        /// Unit system: metric or imperial
        #[arg(short, long)]
        units: Option<Units>,

        /// Select today's n-th forecast hour (0-based)
        #[arg(long)]
        hour: Option<usize>,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session reading commands from stdin
    Session {
        /// City to start with (default: dashboard.default_city)
        #[arg(short, long)]
        city: Option<String>,

        /// Unit system to start with
        #[arg(short, long)]
        units: Option<Units>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Load configuration and apply command-line overrides
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.telemetry.force_filter(filter);
    }
    if cli.log_json {
        config.telemetry.json = true;
    }

    let (city, units) = match &cli.command {
        Commands::Show { city, units, .. } | Commands::Session { city, units } => (city, units),
    };
    if let Some(city) = city {
        config.dashboard.default_city.clone_from(city);
    }
    if let Some(units) = units {
        config.dashboard.default_units = *units;
    }

    Ok(config)
}

fn build_service(config: &AppConfig) -> anyhow::Result<DashboardService> {
    let weather = WeatherAdapter::with_config(config.weather.clone())?;
    let service = DashboardService::new(Arc::new(weather), Arc::new(SystemClock), &config.dashboard)?;
    Ok(service)
}

async fn run_session(service: &DashboardService) -> anyhow::Result<()> {
    service.refresh().await;
    println!("{}", render(&service.view()));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(session::ParseError::Empty) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            },
        };
        debug!(?command, "Session command");

        match command {
            SessionCommand::City(name) => {
                if let Err(e) = service.set_city(&name).await {
                    println!("{e}");
                    continue;
                }
            },
            SessionCommand::ToggleUnits => {
                service.toggle_units().await;
            },
            SessionCommand::Units(units) => {
                if service.set_units(units).await.is_none() {
                    println!("Already showing {units}.");
                    continue;
                }
            },
            SessionCommand::Hour(index) => {
                let applied = service.set_cursor(index);
                if applied != index {
                    println!("Showing hour {applied}, the last one available.");
                }
            },
            SessionCommand::Refresh => {
                service.refresh().await;
            },
            SessionCommand::Help => {
                println!("{HELP}");
                continue;
            },
            SessionCommand::Quit => break,
        }

        println!("{}", render(&service.view()));
    }

    info!("Session ended");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_telemetry(&config.telemetry)?;
    config.validate()?;

    let service = build_service(&config)?;

    match cli.command {
        Commands::Show { hour, json, .. } => {
            let outcome = service.refresh().await;
            if let (ApplyOutcome::Committed, Some(index)) = (outcome, hour) {
                service.set_cursor(index);
            }

            let view = service.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render(&view));
            }
        },

        Commands::Session { .. } => run_session(&service).await?,
    }

    Ok(())
}
