//! spriteloop CLI - Command-line interface for sprite descriptors
//!
//! This binary provides commands for inspecting sprite descriptors, driving
//! the animation clock in real time, and packing frame-list sprites into
//! single-sheet exports.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use spriteloop_cli::commands;

/// spriteloop - Sprite descriptor loader, animation clock, and sheet exporter
#[derive(Parser)]
#[command(name = "spriteloop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a sprite descriptor and print its resolved parameters
    Info {
        /// Path to the descriptor file
        descriptor: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a sprite and advance its animation clock in real time
    Play {
        /// Path to the descriptor file
        descriptor: String,

        /// Number of clock ticks to run
        #[arg(long, default_value_t = 60)]
        ticks: u64,

        /// Tick rate in Hz
        #[arg(long, default_value_t = 60)]
        rate: u32,
    },

    /// Pack a frame-list sprite into a sheet image plus descriptor
    Export {
        /// Path to the descriptor file
        descriptor: String,

        /// Output base path; `.png` and `.ini` are appended
        #[arg(short, long)]
        out: String,

        /// Overwrite existing destination files
        #[arg(short, long)]
        force: bool,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { descriptor, json } => commands::info::run(&descriptor, json),
        Commands::Play {
            descriptor,
            ticks,
            rate,
        } => commands::play::run(&descriptor, ticks, rate),
        Commands::Export {
            descriptor,
            out,
            force,
            json,
        } => commands::export::run(&descriptor, &out, force, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            // {:#} keeps the context chain on one line
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
