//! Export command implementation
//!
//! Packs a loaded frame-list sprite into `<out>.png` plus `<out>.ini`.
//! The overwrite check lives here, not in the core exporter: without
//! `--force` an existing destination file aborts the command before
//! anything is written.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use spriteloop_core::SheetExport;

use super::load_sprite;

#[derive(Debug, Serialize)]
struct ExportOutput {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    descriptor: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frame_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    png_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ExportOutput {
    fn success(report: &SheetExport) -> Self {
        Self {
            ok: true,
            image: Some(report.image_path.clone()),
            descriptor: Some(report.descriptor_path.clone()),
            width: Some(report.width),
            height: Some(report.height),
            frame_count: Some(report.frame_count),
            png_hash: Some(report.png_hash.clone()),
            error: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            ok: false,
            image: None,
            descriptor: None,
            width: None,
            height: None,
            frame_count: None,
            png_hash: None,
            error: Some(message),
        }
    }
}

/// Run the export command.
///
/// # Arguments
/// * `descriptor_path` - Path to the source descriptor file
/// * `out_base` - Output base path; `.png` and `.ini` are appended
/// * `force` - Overwrite existing destination files
/// * `json_output` - Whether to print machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on refusal or export failure.
pub fn run(descriptor_path: &str, out_base: &str, force: bool, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(descriptor_path, out_base, force)
    } else {
        run_human(descriptor_path, out_base, force)
    }
}

fn destination_in_the_way(out_base: &str, force: bool) -> Option<PathBuf> {
    if force {
        return None;
    }
    [".png", ".ini"]
        .iter()
        .map(|suffix| PathBuf::from(format!("{out_base}{suffix}")))
        .find(|candidate| candidate.exists())
}

fn run_human(descriptor_path: &str, out_base: &str, force: bool) -> Result<ExitCode> {
    println!("{} {}", "Exporting:".cyan().bold(), descriptor_path);

    if let Some(existing) = destination_in_the_way(out_base, force) {
        println!(
            "\n{} {} already exists (pass --force to overwrite)",
            "FAILED".red().bold(),
            existing.display()
        );
        return Ok(ExitCode::from(1));
    }

    let sprite = load_sprite(descriptor_path)?;
    match spriteloop_core::export(&sprite, out_base.as_ref()) {
        Ok(report) => {
            println!("{} {}", "Image:".dimmed(), report.image_path.display());
            println!(
                "{} {}",
                "Descriptor:".dimmed(),
                report.descriptor_path.display()
            );
            println!(
                "{} {}x{} ({} frames)",
                "Atlas:".dimmed(),
                report.width,
                report.height,
                report.frame_count
            );
            println!("{} {}", "Hash:".dimmed(), report.png_hash);
            println!("\n{} Sheet exported", "SUCCESS".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("\n{} {}", "FAILED".red().bold(), e);
            Ok(ExitCode::from(1))
        }
    }
}

fn run_json(descriptor_path: &str, out_base: &str, force: bool) -> Result<ExitCode> {
    let (output, code) = if let Some(existing) = destination_in_the_way(out_base, force) {
        (
            ExportOutput::failure(format!(
                "{} already exists (pass --force to overwrite)",
                existing.display()
            )),
            ExitCode::from(1),
        )
    } else {
        match load_sprite(descriptor_path) {
            Ok(sprite) => match spriteloop_core::export(&sprite, out_base.as_ref()) {
                Ok(report) => (ExportOutput::success(&report), ExitCode::SUCCESS),
                Err(e) => (ExportOutput::failure(e.to_string()), ExitCode::from(1)),
            },
            Err(e) => (ExportOutput::failure(format!("{e:#}")), ExitCode::from(1)),
        }
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{json}");
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_check_finds_existing_image() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("sheet");
        std::fs::write(dir.path().join("sheet.png"), b"x").unwrap();

        let found = destination_in_the_way(base.to_str().unwrap(), false).unwrap();
        assert!(found.ends_with("sheet.png"));
    }

    #[test]
    fn test_destination_check_finds_existing_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("sheet");
        std::fs::write(dir.path().join("sheet.ini"), b"x").unwrap();

        let found = destination_in_the_way(base.to_str().unwrap(), false).unwrap();
        assert!(found.ends_with("sheet.ini"));
    }

    #[test]
    fn test_destination_check_passes_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("sheet");
        assert!(destination_in_the_way(base.to_str().unwrap(), false).is_none());
    }

    #[test]
    fn test_force_skips_destination_check() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("sheet");
        std::fs::write(dir.path().join("sheet.png"), b"x").unwrap();
        std::fs::write(dir.path().join("sheet.ini"), b"x").unwrap();

        assert!(destination_in_the_way(base.to_str().unwrap(), true).is_none());
    }
}
