//! The owned sprite resource.
//!
//! A [`SpriteResource`] owns every decoded bitmap of a sprite and describes
//! how to interpret them. Constructors validate their inputs and return a
//! typed [`ConfigError`] instead of a partially-built value, so a resource
//! that exists always upholds its invariants:
//!
//! - `frame_width > 0` and `frame_height > 0`
//! - `frame_count >= 1`
//! - exactly one backing bitmap for a sheet sprite, `frame_count` bitmaps
//!   for a frame-list sprite
//!
//! Dropping the resource releases every owned bitmap.

use thiserror::Error;

use crate::bitmap::{Bitmap, Rgb};

/// Validation failures for sprite configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Frame width or height was zero or negative.
    #[error("Invalid frame dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    /// The descriptor's `[FILES]` section had no entries.
    #[error("Descriptor lists no frame files")]
    MissingFiles,

    /// The sheet frame count was below one.
    #[error("Invalid frame count {count}: a sprite needs at least one frame")]
    InvalidFrameCount { count: i32 },
}

/// Raw configuration values shared by both sprite shapes, as read from a
/// descriptor. Values are validated when a [`SpriteResource`] is built from
/// them.
#[derive(Debug, Clone, Copy)]
pub struct SpriteParams {
    /// Whether the color-key transparency transform applies.
    pub use_alpha: bool,
    /// The color treated as transparent. Meaningful only when `use_alpha`.
    pub alpha_key: Rgb,
    /// Width of one logical frame in pixels.
    pub frame_width: i32,
    /// Height of one logical frame in pixels.
    pub frame_height: i32,
    /// Ticks a frame is held before advancing. Negative values read as 0.
    pub frame_delay: i32,
}

/// A sub-rectangle of a backing bitmap, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Backing storage: one strip bitmap, or one bitmap per frame.
#[derive(Debug)]
enum FrameStore {
    Sheet(Bitmap),
    Frames(Vec<Bitmap>),
}

/// An in-memory sprite: owned frame bitmaps plus the values describing how
/// to play them back.
#[derive(Debug)]
pub struct SpriteResource {
    use_alpha: bool,
    alpha_key: Rgb,
    frame_width: u32,
    frame_height: u32,
    frame_count: u32,
    frame_delay: u32,
    store: FrameStore,
}

impl SpriteResource {
    /// Build a frame-list sprite from one decoded bitmap per frame, in
    /// animation order. The frame count is the number of bitmaps.
    pub fn from_frames(params: SpriteParams, frames: Vec<Bitmap>) -> Result<Self, ConfigError> {
        let (frame_width, frame_height) =
            validate_dimensions(params.frame_width, params.frame_height)?;
        if frames.is_empty() {
            return Err(ConfigError::MissingFiles);
        }
        let frame_count = frames.len() as u32;
        Ok(Self {
            use_alpha: params.use_alpha,
            alpha_key: params.alpha_key,
            frame_width,
            frame_height,
            frame_count,
            frame_delay: clamp_delay(params.frame_delay),
            store: FrameStore::Frames(frames),
        })
    }

    /// Build a sheet sprite from a single strip bitmap. `frame_count` is
    /// taken on trust from the descriptor; see
    /// [`sheet_geometry_consistent`](Self::sheet_geometry_consistent).
    pub fn from_sheet(
        params: SpriteParams,
        frame_count: i32,
        sheet: Bitmap,
    ) -> Result<Self, ConfigError> {
        let (frame_width, frame_height) =
            validate_dimensions(params.frame_width, params.frame_height)?;
        if frame_count < 1 {
            return Err(ConfigError::InvalidFrameCount { count: frame_count });
        }
        Ok(Self {
            use_alpha: params.use_alpha,
            alpha_key: params.alpha_key,
            frame_width,
            frame_height,
            frame_count: frame_count as u32,
            frame_delay: clamp_delay(params.frame_delay),
            store: FrameStore::Sheet(sheet),
        })
    }

    /// Whether this sprite is backed by a single strip bitmap.
    pub fn is_sheet(&self) -> bool {
        matches!(self.store, FrameStore::Sheet(_))
    }

    /// Whether the color-key transparency transform was applied at load.
    pub fn use_alpha(&self) -> bool {
        self.use_alpha
    }

    /// The color treated as transparent. Meaningful only when
    /// [`use_alpha`](Self::use_alpha).
    pub fn alpha_key(&self) -> Rgb {
        self.alpha_key
    }

    /// Width of one logical frame in pixels.
    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    /// Height of one logical frame in pixels.
    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    /// Number of logical animation frames.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Ticks a frame is held before advancing.
    pub fn frame_delay(&self) -> u32 {
        self.frame_delay
    }

    /// The owned backing bitmaps: one strip for a sheet sprite, one bitmap
    /// per frame otherwise.
    pub fn bitmaps(&self) -> &[Bitmap] {
        match &self.store {
            FrameStore::Sheet(strip) => std::slice::from_ref(strip),
            FrameStore::Frames(frames) => frames,
        }
    }

    /// The bitmap backing logical frame `index`.
    ///
    /// `index` must be below [`frame_count`](Self::frame_count); for a
    /// frame-list sprite an out-of-range index panics like any slice index.
    pub fn frame_bitmap(&self, index: u32) -> &Bitmap {
        match &self.store {
            FrameStore::Sheet(strip) => strip,
            FrameStore::Frames(frames) => &frames[index as usize],
        }
    }

    /// The sub-rectangle of [`frame_bitmap`](Self::frame_bitmap) a renderer
    /// should sample for logical frame `index`.
    ///
    /// The rectangle is clamped to the backing bitmap, so a sheet whose
    /// strip is narrower than the descriptor claims yields a clipped (or
    /// empty) rectangle rather than out-of-bounds coordinates.
    pub fn frame_rect(&self, index: u32) -> FrameRect {
        let backing = self.frame_bitmap(index);
        let x = if self.is_sheet() {
            (u64::from(index) * u64::from(self.frame_width)).min(u64::from(backing.width)) as u32
        } else {
            0
        };
        FrameRect {
            x,
            y: 0,
            width: self.frame_width.min(backing.width - x),
            height: self.frame_height.min(backing.height),
        }
    }

    /// Whether the backing strip of a sheet sprite is large enough for the
    /// frame count and size the descriptor declared. Always true for a
    /// frame-list sprite.
    ///
    /// Loading stays permissive on a mismatch; this exists so callers can
    /// surface a diagnostic instead of sampling a truncated frame.
    pub fn sheet_geometry_consistent(&self) -> bool {
        match &self.store {
            FrameStore::Frames(_) => true,
            FrameStore::Sheet(strip) => {
                u64::from(strip.width) >= u64::from(self.frame_width) * u64::from(self.frame_count)
                    && strip.height >= self.frame_height
            }
        }
    }
}

fn validate_dimensions(width: i32, height: i32) -> Result<(u32, u32), ConfigError> {
    if width <= 0 || height <= 0 {
        return Err(ConfigError::InvalidDimensions { width, height });
    }
    Ok((width as u32, height as u32))
}

fn clamp_delay(delay: i32) -> u32 {
    delay.max(0) as u32
}
