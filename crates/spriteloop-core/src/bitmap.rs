//! RGBA8 pixel buffers.
//!
//! [`Bitmap`] is the in-memory image type for everything in this crate:
//! decoded frames, sheet strips, and packed atlases. Pixels are straight
//! (non-premultiplied) RGBA, row-major.

/// An opaque color, used as the transparency key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A 2D RGBA8 bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (RGBA8, row-major, `width * height * 4` bytes).
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Create a new bitmap filled with a color.
    pub fn new(width: u32, height: u32, fill: [u8; 4]) -> Self {
        let size = width as usize * height as usize;
        let mut data = Vec::with_capacity(size * 4);
        for _ in 0..size {
            data.extend_from_slice(&fill);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap raw RGBA8 bytes. `data.len()` must be `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize * 4,
            "RGBA8 data length must match dimensions"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Fill the whole bitmap with a color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Composite `src` onto this bitmap at `(dest_x, dest_y)` with
    /// source-over blending. Pixels falling outside the destination are
    /// clipped.
    pub fn blit_over(&mut self, src: &Bitmap, dest_x: u32, dest_y: u32) {
        let cols = src.width.min(self.width.saturating_sub(dest_x));
        let rows = src.height.min(self.height.saturating_sub(dest_y));
        for y in 0..rows {
            for x in 0..cols {
                let blended = over(self.get(dest_x + x, dest_y + y), src.get(x, y));
                self.set(dest_x + x, dest_y + y, blended);
            }
        }
    }

    /// Make every pixel whose color channels match `key` fully transparent
    /// (set to transparent black). The existing alpha channel is ignored in
    /// the comparison.
    pub fn color_key_to_alpha(&mut self, key: Rgb) {
        for px in self.data.chunks_exact_mut(4) {
            if px[0] == key.r && px[1] == key.g && px[2] == key.b {
                px.copy_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
}

/// Source-over blending of straight-alpha pixels.
#[inline]
fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    // Alpha and color share one x255-scaled denominator, so the color
    // channels cannot round past 255
    let denom = sa * 255 + da * inv;

    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = u32::from(src[c]) * sa * 255;
        let d = u32::from(dst[c]) * da * inv;
        out[c] = ((s + d) / denom) as u8;
    }
    out[3] = (denom / 255) as u8;
    out
}
