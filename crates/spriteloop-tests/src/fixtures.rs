//! Test fixture utilities for building sprite directories on disk.

use std::fs;
use std::path::{Path, PathBuf};

use spriteloop_core::{write_png_with_hash, Bitmap, PngConfig};
use tempfile::TempDir;

/// A test fixture representing a sprite directory: frame PNGs next to a
/// descriptor file, the way sprites ship on disk.
pub struct SpriteFixture {
    pub root: TempDir,
}

impl SpriteFixture {
    /// Create a new empty sprite directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self { root }
    }

    /// Get the sprite directory path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write an arbitrary bitmap into the directory as a PNG.
    pub fn write_bitmap(&self, name: &str, bitmap: &Bitmap) -> PathBuf {
        let path = self.path().join(name);
        write_png_with_hash(bitmap, &path, &PngConfig::default())
            .expect("Failed to write fixture PNG");
        path
    }

    /// Write a solid-color frame image into the directory.
    pub fn add_frame(&self, name: &str, width: u32, height: u32, color: [u8; 4]) -> PathBuf {
        self.write_bitmap(name, &Bitmap::new(width, height, color))
    }

    /// Write a descriptor file with the given text.
    pub fn add_descriptor(&self, name: &str, text: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, text).expect("Failed to write fixture descriptor");
        path
    }

    /// Write the standard two-frame walker: a red and a green 32x32 frame
    /// held for three ticks each (`frame_delay=2`). Returns the descriptor
    /// path.
    pub fn walker(&self) -> PathBuf {
        self.add_frame("walk_a.png", 32, 32, [255, 0, 0, 255]);
        self.add_frame("walk_b.png", 32, 32, [0, 255, 0, 255]);
        self.add_descriptor(
            "walker.ini",
            r#"use_alpha=0
is_sheet=0
frame_delay=2
num_frames=2

[SIZE]
width=32
height=32

[FILES]
file0=walk_a.png
file1=walk_b.png
"#,
        )
    }

    /// Write the walker as a pre-assembled sheet: one 64x32 strip with a red
    /// cell at x 0..32 and a green cell at x 32..64. Returns the descriptor
    /// path.
    pub fn sheet_walker(&self) -> PathBuf {
        let mut strip = Bitmap::new(64, 32, [255, 0, 0, 255]);
        for y in 0..32 {
            for x in 32..64 {
                strip.set(x, y, [0, 255, 0, 255]);
            }
        }
        self.write_bitmap("walker_sheet.png", &strip);
        self.add_descriptor(
            "walker_sheet.ini",
            r#"use_alpha=0
is_sheet=1
frame_delay=2
num_frames=2

[SIZE]
width=32
height=32

[FILES]
file0=walker_sheet.png
"#,
        )
    }
}

impl Default for SpriteFixture {
    fn default() -> Self {
        Self::new()
    }
}
