// src/cli/mod.rs
//! CLI definitions for CarbonTrack
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carbontrack")]
#[command(author = "CarbonTrack Contributors")]
#[command(version)]
#[command(about = "Carbon emission calculator with persistent history", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    #[cfg(feature = "server")]
    Serve {
        /// Address to bind to (overrides config)
        #[arg(short, long)]
        bind: Option<String>,

        /// Path to the database file (overrides config)
        #[arg(short, long)]
        db_path: Option<PathBuf>,

        /// TOML factor file replacing the built-in table
        #[arg(long)]
        factors: Option<PathBuf>,
    },

    /// Initialize the emissions database
    Init {
        /// Path to the database file (overrides config)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },

    /// List categories, activities and emission factors
    Categories {
        /// TOML factor file replacing the built-in table
        #[arg(long)]
        factors: Option<PathBuf>,
    },

    /// Calculate an activity's emissions and record it
    Calculate {
        /// Category (e.g. transport, food)
        category: String,

        /// Activity within the category (e.g. car_petrol, beef)
        activity: String,

        /// Quantity in the category's unit
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Unit label (defaults to the category's unit)
        #[arg(short, long)]
        unit: Option<String>,

        /// Path to the database file (overrides config)
        #[arg(short, long)]
        db_path: Option<PathBuf>,

        /// TOML factor file replacing the built-in table
        #[arg(long)]
        factors: Option<PathBuf>,
    },

    /// Show recent calculations, newest first
    History {
        /// Maximum number of records (defaults to config)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Path to the database file (overrides config)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },

    /// Show totals, breakdown and recommendations
    Stats {
        /// Path to the database file (overrides config)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },
}
