//! CLI command implementations

pub mod export;
pub mod info;
pub mod play;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spriteloop_core::SpriteResource;
use spriteloop_descriptor::Descriptor;

/// Read a descriptor file and load its sprite, resolving frame files
/// against the descriptor's directory.
pub(crate) fn load_sprite(descriptor_path: &str) -> Result<SpriteResource> {
    let path = Path::new(descriptor_path);
    let descriptor = Descriptor::from_path(path)
        .with_context(|| format!("Failed to read descriptor: {descriptor_path}"))?;

    let base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    spriteloop_core::load(&base_dir, &descriptor)
        .with_context(|| format!("Failed to load sprite from {descriptor_path}"))
}
