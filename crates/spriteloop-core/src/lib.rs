//! Sprite Loading, Playback, and Sheet Export
//!
//! This crate turns a descriptor document plus a directory of PNG images into
//! an owned [`SpriteResource`], advances a looping animation over it with an
//! [`AnimationClock`], and packs a frame-list resource back into a horizontal
//! sprite-sheet strip plus a descriptor that reproduces it.
//!
//! A sprite comes in two shapes:
//!
//! - **Frame list**: one bitmap per logical frame, in the order the
//!   descriptor's `[FILES]` section lists them.
//! - **Sheet**: a single pre-assembled strip bitmap, sliced into
//!   `frame_width`-wide cells at draw time.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use spriteloop_core::{export, load, AnimationClock};
//! use spriteloop_descriptor::Descriptor;
//!
//! let descriptor = Descriptor::from_path(Path::new("walker.ini"))?;
//! let sprite = load(Path::new("."), &descriptor)?;
//!
//! let mut clock = AnimationClock::for_sprite(&sprite);
//! for _ in 0..10 {
//!     clock.tick();
//!     let rect = sprite.frame_rect(clock.current_frame());
//!     println!("frame {} at {},{}", clock.current_frame(), rect.x, rect.y);
//! }
//!
//! let report = export(&sprite, Path::new("out/walker_sheet"))?;
//! println!("wrote {} ({})", report.image_path.display(), report.png_hash);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Determinism
//!
//! Exported atlases are byte-stable: PNG encoding uses fixed compression
//! settings, and the descriptor writer emits blocks in a fixed order. The
//! export report carries a BLAKE3 hash of the emitted PNG bytes so callers
//! can fingerprint artifacts.
//!
//! # Modules
//!
//! - [`bitmap`]: RGBA8 pixel buffers, blitting, color-key transparency
//! - [`codec`]: PNG decode/encode with deterministic settings
//! - [`resource`]: The owned [`SpriteResource`] entity and its invariants
//! - [`loader`]: Descriptor-driven loading
//! - [`clock`]: The tick-driven frame-advance state machine
//! - [`exporter`]: Sheet packing and descriptor emission

pub mod bitmap;
pub mod clock;
pub mod codec;
pub mod exporter;
pub mod loader;
pub mod resource;

// Re-export main types for convenience
pub use bitmap::{Bitmap, Rgb};
pub use clock::AnimationClock;
pub use codec::{decode_png, write_png_with_hash, CodecError, PngConfig};
pub use exporter::{export, pack_atlas, sheet_descriptor, ExportError, SheetExport};
pub use loader::{load, LoadError};
pub use resource::{ConfigError, FrameRect, SpriteParams, SpriteResource};
