//! Play command implementation
//!
//! Drives the animation clock at a fixed tick rate for a fixed number of
//! ticks, reporting each frame advance with the rectangle a renderer would
//! sample.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Result};
use colored::Colorize;
use spriteloop_core::AnimationClock;

use super::load_sprite;

/// Immutable playback configuration, built once from command-line flags.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackOptions {
    /// Ticks delivered per second.
    pub rate_hz: u32,
    /// Total ticks to deliver before stopping.
    pub ticks: u64,
}

impl PlaybackOptions {
    /// Validate and freeze playback settings.
    pub fn new(rate_hz: u32, ticks: u64) -> Result<Self> {
        if rate_hz == 0 {
            bail!("tick rate must be at least 1 Hz");
        }
        Ok(Self { rate_hz, ticks })
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.rate_hz))
    }
}

/// Run the play command.
///
/// # Arguments
/// * `descriptor_path` - Path to the descriptor file
/// * `ticks` - Number of ticks to deliver before exiting
/// * `rate_hz` - Tick rate in Hz (must be >= 1)
pub fn run(descriptor_path: &str, ticks: u64, rate_hz: u32) -> Result<ExitCode> {
    let options = PlaybackOptions::new(rate_hz, ticks)?;
    let sprite = load_sprite(descriptor_path)?;

    println!("{} {}", "Playing:".cyan().bold(), descriptor_path);
    println!(
        "{} {} frame(s), delay {}, {} Hz",
        "Clock:".dimmed(),
        sprite.frame_count(),
        sprite.frame_delay(),
        options.rate_hz
    );

    let mut clock = AnimationClock::for_sprite(&sprite);
    print_frame(&sprite, 0, clock.current_frame());

    for tick in 1..=options.ticks {
        std::thread::sleep(options.tick_interval());
        if clock.tick() {
            print_frame(&sprite, tick, clock.current_frame());
        }
    }

    println!(
        "\n{} {} tick(s) delivered",
        "SUCCESS".green().bold(),
        options.ticks
    );
    Ok(ExitCode::SUCCESS)
}

fn print_frame(sprite: &spriteloop_core::SpriteResource, tick: u64, frame: u32) {
    let rect = sprite.frame_rect(frame);
    println!(
        "tick {:>5}  frame {}  rect {},{} {}x{}",
        tick, frame, rect.x, rect.y, rect.width, rect.height
    );
}
