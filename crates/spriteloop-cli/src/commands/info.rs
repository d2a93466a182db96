//! Info command implementation
//!
//! Loads a sprite from a descriptor and prints its configuration and
//! geometry, flagging sheet descriptors whose strip is too small for the
//! frame count they declare.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::load_sprite;

/// Machine-readable sprite summary.
#[derive(Debug, Serialize)]
pub struct SpriteSummary {
    pub descriptor: String,
    pub variant: &'static str,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: u32,
    pub frame_delay: u32,
    pub use_alpha: bool,
    pub alpha_key: [u8; 3],
    pub bitmaps: usize,
    pub sheet_geometry_consistent: bool,
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sprite: Option<SpriteSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the info command.
///
/// # Arguments
/// * `descriptor_path` - Path to the descriptor file
/// * `json_output` - Whether to print machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the sprite loads, 1 otherwise.
pub fn run(descriptor_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(descriptor_path)
    } else {
        run_human(descriptor_path)
    }
}

fn summarize(descriptor_path: &str) -> Result<SpriteSummary> {
    let sprite = load_sprite(descriptor_path)?;
    let key = sprite.alpha_key();
    Ok(SpriteSummary {
        descriptor: descriptor_path.to_string(),
        variant: if sprite.is_sheet() {
            "sheet"
        } else {
            "frame-list"
        },
        frame_width: sprite.frame_width(),
        frame_height: sprite.frame_height(),
        frame_count: sprite.frame_count(),
        frame_delay: sprite.frame_delay(),
        use_alpha: sprite.use_alpha(),
        alpha_key: [key.r, key.g, key.b],
        bitmaps: sprite.bitmaps().len(),
        sheet_geometry_consistent: sprite.sheet_geometry_consistent(),
    })
}

fn run_human(descriptor_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), descriptor_path);

    let summary = summarize(descriptor_path)?;

    println!("{} {}", "Variant:".dimmed(), summary.variant);
    println!(
        "{} {}x{}",
        "Frame size:".dimmed(),
        summary.frame_width,
        summary.frame_height
    );
    println!("{} {}", "Frames:".dimmed(), summary.frame_count);
    println!(
        "{} {} tick(s) per frame",
        "Delay:".dimmed(),
        summary.frame_delay
    );
    if summary.use_alpha {
        let [r, g, b] = summary.alpha_key;
        println!("{} {},{},{}", "Alpha key:".dimmed(), r, g, b);
    }

    if !summary.sheet_geometry_consistent {
        println!(
            "  {} sheet is smaller than num_frames x frame size; trailing frames will render clipped",
            "!".yellow()
        );
    }

    println!("\n{} Sprite loaded", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}

fn run_json(descriptor_path: &str) -> Result<ExitCode> {
    let (output, code) = match summarize(descriptor_path) {
        Ok(summary) => (
            InfoOutput {
                ok: true,
                sprite: Some(summary),
                error: None,
            },
            ExitCode::SUCCESS,
        ),
        Err(e) => (
            InfoOutput {
                ok: false,
                sprite: None,
                error: Some(format!("{e:#}")),
            },
            ExitCode::from(1),
        ),
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{json}");
    Ok(code)
}
