//! SameDay CLI - Demo scenarios and rate quoting.
//!
//! # Usage
//!
//! ```bash
//! # Walk a seeded shipment through the full lifecycle
//! sameday demo
//!
//! # Same, at urgent priority
//! sameday demo -p urgent
//!
//! # Quote a rate for a route
//! sameday quote -d 12.5 -w 2.0 -p priority
//! ```
//!
//! # Commands
//!
//! - `demo` - Seed fixtures and run a full shipment lifecycle
//! - `quote` - Compute a shipping rate from distance, weight and priority

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use sameday_core::ShipmentPriority;

mod commands;

#[derive(Parser)]
#[command(name = "sameday")]
#[command(author, version, about = "SameDay shipment tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed fixtures and run a full shipment lifecycle
    Demo {
        /// Shipment priority (`standard`, `priority`, `urgent`)
        #[arg(short, long, default_value = "standard", value_parser = parse_priority)]
        priority: ShipmentPriority,
    },
    /// Compute a shipping rate from route parameters
    Quote {
        /// Route distance in grid units
        #[arg(short, long)]
        distance: f64,

        /// Package weight in kilograms
        #[arg(short, long)]
        weight: f64,

        /// Shipment priority (`standard`, `priority`, `urgent`)
        #[arg(short, long, default_value = "standard", value_parser = parse_priority)]
        priority: ShipmentPriority,
    },
}

fn parse_priority(value: &str) -> Result<ShipmentPriority, String> {
    match value.to_ascii_lowercase().as_str() {
        "standard" => Ok(ShipmentPriority::Standard),
        "priority" => Ok(ShipmentPriority::Priority),
        "urgent" => Ok(ShipmentPriority::Urgent),
        other => Err(format!(
            "unknown priority `{other}` (expected standard, priority or urgent)"
        )),
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Demo { priority } => commands::demo::run(priority)?,
        Commands::Quote {
            distance,
            weight,
            priority,
        } => commands::quote::run(distance, weight, priority),
    }
    Ok(())
}
