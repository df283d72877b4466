//! Gazekit CLI
//!
//! Inspection commands for raw eye-tracking instrument logs.

use chrono::Utc;
use clap::{Parser, Subcommand};
use gazekit::{read_events, read_fixations, read_samples, Config, VERSION};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gazekit")]
#[command(version = VERSION)]
#[command(about = "Eye-tracking log inspection and feature-export toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a gaze sample log and summarize it
    Samples {
        /// Path to the sample log file
        file: PathBuf,

        /// Dump the parsed records as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Parse a fixation log and summarize it
    Fixations {
        /// Path to the fixation log file
        file: PathBuf,

        /// Horizontal media offset to subtract from mapped coordinates
        #[arg(long, default_value = "0")]
        offset_x: i64,

        /// Vertical media offset to subtract from mapped coordinates
        #[arg(long, default_value = "0")]
        offset_y: i64,

        /// Dump the parsed records as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Parse an event log and list its events
    Events {
        /// Path to the event log file
        file: PathBuf,

        /// Show at most this many events
        #[arg(long)]
        limit: Option<usize>,

        /// Dump the parsed records as JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Show configuration
    Config,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Samples { file, json } => cmd_samples(&file, json),
        Commands::Fixations {
            file,
            offset_x,
            offset_y,
            json,
        } => cmd_fixations(&file, (offset_x, offset_y), json),
        Commands::Events { file, limit, json } => cmd_events(&file, limit, json),
        Commands::Config => cmd_config(),
    }
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: could not load config, using defaults: {e}");
            Config::default()
        }
    }
}

fn cmd_samples(file: &PathBuf, json: bool) {
    let config = load_config();
    let samples = match read_samples(file, &config) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("Error reading {file:?}: {e}");
            std::process::exit(1);
        }
    };

    if json {
        print_json(&samples);
        return;
    }

    let valid = samples.iter().filter(|s| s.is_valid()).count();
    let first = samples.first().and_then(|s| s.timestamp);
    let last = samples.last().and_then(|s| s.timestamp);

    println!(
        "[{}] parsed {} samples from {:?}",
        Utc::now().format("%H:%M:%S"),
        samples.len(),
        file
    );
    if !samples.is_empty() {
        println!(
            "  valid: {} ({:.1}%)",
            valid,
            100.0 * valid as f64 / samples.len() as f64
        );
    }
    if let (Some(first), Some(last)) = (first, last) {
        println!("  timestamps: {first} .. {last}");
    }
}

fn cmd_fixations(file: &PathBuf, media_offset: (i64, i64), json: bool) {
    let config = load_config();
    let fixations = match read_fixations(file, media_offset, &config) {
        Ok(fixations) => fixations,
        Err(e) => {
            eprintln!("Error reading {file:?}: {e}");
            std::process::exit(1);
        }
    };

    if json {
        print_json(&fixations);
        return;
    }

    println!(
        "[{}] parsed {} fixations from {:?}",
        Utc::now().format("%H:%M:%S"),
        fixations.len(),
        file
    );

    let durations: Vec<i64> = fixations.iter().filter_map(|f| f.duration).collect();
    if !durations.is_empty() {
        let total: i64 = durations.iter().sum();
        let longest = durations.iter().max().copied().unwrap_or(0);
        println!(
            "  duration: mean {:.1} ms, longest {} ms",
            total as f64 / durations.len() as f64,
            longest
        );
    }
}

fn cmd_events(file: &PathBuf, limit: Option<usize>, json: bool) {
    let config = load_config();
    let events = match read_events(file, &config) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Error reading {file:?}: {e}");
            std::process::exit(1);
        }
    };

    if json {
        print_json(&events);
        return;
    }

    println!(
        "[{}] parsed {} events from {:?}",
        Utc::now().format("%H:%M:%S"),
        events.len(),
        file
    );
    let shown = limit.unwrap_or(events.len());
    for event in events.iter().take(shown) {
        let timestamp = event
            .timestamp
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {timestamp}\t{}\t{}", event.event, event.descriptor);
    }
    if shown < events.len() {
        println!("  ... and {} more", events.len() - shown);
    }
}

fn cmd_config() {
    let config = load_config();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

fn print_json<T: serde::Serialize>(records: &T) {
    match serde_json::to_string_pretty(records) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing records: {e}");
            std::process::exit(1);
        }
    }
}
