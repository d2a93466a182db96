//! Sheet packing and export.
//!
//! A frame-list sprite is packed into a single horizontal strip (no
//! rotation, no trimming, no padding) and written out as `<base>.png` plus
//! a `<base>.ini` descriptor that reloads as the equivalent sheet sprite.
//! Output is deterministic; the report carries a BLAKE3 hash of the PNG
//! bytes.
//!
//! Overwrite policy belongs to the caller: when invoked, the exporter
//! always overwrites both destination files.

use std::path::{Path, PathBuf};

use spriteloop_descriptor::Descriptor;
use thiserror::Error;

use crate::bitmap::Bitmap;
use crate::codec::{encode_png_to_vec, hash_png, CodecError, PngConfig};
use crate::resource::SpriteResource;

/// Upper bound on atlas pixel count (256 MiB of RGBA8).
pub const MAX_ATLAS_PIXELS: u64 = 64 * 1024 * 1024;

/// Errors from exporting a sprite to a sheet.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The sprite is already sheet-backed; its frames are not individually
    /// addressable, so re-export is refused rather than half-supported.
    #[error("Cannot export a sheet-backed sprite back to a sheet")]
    UnsupportedConversion,

    /// The packed strip would be wider than `u32` or exceed
    /// [`MAX_ATLAS_PIXELS`].
    #[error("Atlas dimensions {width}x{height} exceed the supported size")]
    AtlasTooLarge { width: u64, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding error: {0}")]
    Encoding(#[from] CodecError),

    /// Writing the image or descriptor file failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Report of a completed export.
#[derive(Debug, Clone)]
pub struct SheetExport {
    /// Path of the written atlas image.
    pub image_path: PathBuf,
    /// Path of the written descriptor.
    pub descriptor_path: PathBuf,
    /// Atlas width in pixels (`frame_width * frame_count`).
    pub width: u32,
    /// Atlas height in pixels (`frame_height`).
    pub height: u32,
    /// Number of packed frames.
    pub frame_count: u32,
    /// BLAKE3 hash of the written PNG bytes.
    pub png_hash: String,
}

/// Pack a frame-list sprite into a horizontal strip bitmap.
///
/// The strip is `frame_width * frame_count` wide and `frame_height` tall.
/// The background is opaque white, or the opaque alpha key for a sprite
/// with color-key transparency, so transparent frame regions stay visually
/// consistent against the fill. Frame `i` is composited unscaled at
/// `(i * frame_width, 0)` in frame order.
pub fn pack_atlas(sprite: &SpriteResource) -> Result<Bitmap, ExportError> {
    if sprite.is_sheet() {
        return Err(ExportError::UnsupportedConversion);
    }

    let width = u64::from(sprite.frame_width()) * u64::from(sprite.frame_count());
    let height = sprite.frame_height();
    if width > u64::from(u32::MAX) || width * u64::from(height) > MAX_ATLAS_PIXELS {
        return Err(ExportError::AtlasTooLarge { width, height });
    }

    let fill = if sprite.use_alpha() {
        let key = sprite.alpha_key();
        [key.r, key.g, key.b, 255]
    } else {
        [255, 255, 255, 255]
    };

    let mut atlas = Bitmap::new(width as u32, height, fill);
    for i in 0..sprite.frame_count() {
        atlas.blit_over(sprite.frame_bitmap(i), i * sprite.frame_width(), 0);
    }
    Ok(atlas)
}

/// Build the descriptor document that reloads an exported sheet.
///
/// `image_file` is the file name the single `[FILES]` entry points at.
pub fn sheet_descriptor(sprite: &SpriteResource, image_file: &str) -> Descriptor {
    let mut doc = Descriptor::new();
    doc.set_global("use_alpha", if sprite.use_alpha() { "1" } else { "0" });
    doc.set_global("is_sheet", "1");
    doc.set_global("frame_delay", sprite.frame_delay().to_string());
    doc.set_global("num_frames", sprite.frame_count().to_string());

    let key = sprite.alpha_key();
    doc.push_entry("ALPHA", "r", key.r.to_string());
    doc.push_entry("ALPHA", "g", key.g.to_string());
    doc.push_entry("ALPHA", "b", key.b.to_string());

    doc.push_entry("SIZE", "width", sprite.frame_width().to_string());
    doc.push_entry("SIZE", "height", sprite.frame_height().to_string());

    doc.push_entry("FILES", "file0", image_file);
    doc
}

/// Export a frame-list sprite as `<out_base>.png` + `<out_base>.ini`.
///
/// The extensions are appended to `out_base` as given. The image is written
/// before the descriptor, so a failed image write never leaves a descriptor
/// naming a missing file. Returns the written paths, atlas size, and PNG
/// hash.
pub fn export(sprite: &SpriteResource, out_base: &Path) -> Result<SheetExport, ExportError> {
    let atlas = pack_atlas(sprite)?;
    let image_path = with_suffix(out_base, ".png");
    let descriptor_path = with_suffix(out_base, ".ini");

    let data = encode_png_to_vec(&atlas, &PngConfig::default())?;
    let png_hash = hash_png(&data);
    std::fs::write(&image_path, &data).map_err(|source| ExportError::Io {
        path: image_path.clone(),
        source,
    })?;

    let image_file = image_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| image_path.display().to_string());
    let doc = sheet_descriptor(sprite, &image_file);
    std::fs::write(&descriptor_path, doc.to_text()).map_err(|source| ExportError::Io {
        path: descriptor_path.clone(),
        source,
    })?;

    Ok(SheetExport {
        image_path,
        descriptor_path,
        width: atlas.width,
        height: atlas.height,
        frame_count: sprite.frame_count(),
        png_hash,
    })
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Rgb;
    use crate::resource::SpriteParams;
    use pretty_assertions::assert_eq;

    fn params(width: i32, height: i32) -> SpriteParams {
        SpriteParams {
            use_alpha: false,
            alpha_key: Rgb::default(),
            frame_width: width,
            frame_height: height,
            frame_delay: 3,
        }
    }

    fn two_frame_sprite() -> SpriteResource {
        let red = Bitmap::new(8, 8, [255, 0, 0, 255]);
        let green = Bitmap::new(8, 8, [0, 255, 0, 255]);
        SpriteResource::from_frames(params(8, 8), vec![red, green]).unwrap()
    }

    #[test]
    fn test_pack_atlas_places_frames_in_order() {
        let atlas = pack_atlas(&two_frame_sprite()).unwrap();
        assert_eq!((atlas.width, atlas.height), (16, 8));
        assert_eq!(atlas.get(0, 0), [255, 0, 0, 255]);
        assert_eq!(atlas.get(7, 7), [255, 0, 0, 255]);
        assert_eq!(atlas.get(8, 0), [0, 255, 0, 255]);
        assert_eq!(atlas.get(15, 7), [0, 255, 0, 255]);
    }

    #[test]
    fn test_pack_atlas_fills_background_white() {
        // A 4-wide frame in an 8-wide cell leaves the fill visible
        let narrow = Bitmap::new(4, 8, [0, 0, 255, 255]);
        let sprite = SpriteResource::from_frames(params(8, 8), vec![narrow]).unwrap();

        let atlas = pack_atlas(&sprite).unwrap();
        assert_eq!(atlas.get(0, 0), [0, 0, 255, 255]);
        assert_eq!(atlas.get(6, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_pack_atlas_fills_background_with_alpha_key() {
        let mut p = params(8, 8);
        p.use_alpha = true;
        p.alpha_key = Rgb::new(255, 0, 255);

        // A fully transparent frame leaves the key-colored fill everywhere
        let clear = Bitmap::new(8, 8, [0, 0, 0, 0]);
        let sprite = SpriteResource::from_frames(p, vec![clear]).unwrap();

        let atlas = pack_atlas(&sprite).unwrap();
        assert_eq!(atlas.get(3, 3), [255, 0, 255, 255]);
    }

    #[test]
    fn test_pack_atlas_refuses_sheet_sprites() {
        let strip = Bitmap::new(16, 8, [1, 1, 1, 255]);
        let sprite = SpriteResource::from_sheet(params(8, 8), 2, strip).unwrap();
        assert!(matches!(
            pack_atlas(&sprite).unwrap_err(),
            ExportError::UnsupportedConversion
        ));
    }

    #[test]
    fn test_pack_atlas_rejects_oversized_strips() {
        // 1Mi x 256 pixels per frame blows past the pixel cap without
        // the frame bitmaps themselves being large
        let tiny = Bitmap::new(1, 1, [0, 0, 0, 255]);
        let sprite = SpriteResource::from_frames(params(1 << 20, 256), vec![tiny]).unwrap();

        match pack_atlas(&sprite).unwrap_err() {
            ExportError::AtlasTooLarge { width, height } => {
                assert_eq!(width, 1 << 20);
                assert_eq!(height, 256);
            }
            other => panic!("expected AtlasTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_sheet_descriptor_golden_text() {
        let doc = sheet_descriptor(&two_frame_sprite(), "walker_sheet.png");
        let expected = "\
use_alpha=0
is_sheet=1
frame_delay=3
num_frames=2

[ALPHA]
r=0
g=0
b=0

[SIZE]
width=8
height=8

[FILES]
file0=walker_sheet.png
";
        assert_eq!(doc.to_text(), expected);
    }

    #[test]
    fn test_export_writes_image_and_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let out_base = dir.path().join("walker_sheet");

        let report = export(&two_frame_sprite(), &out_base).unwrap();
        assert_eq!(report.image_path, dir.path().join("walker_sheet.png"));
        assert_eq!(report.descriptor_path, dir.path().join("walker_sheet.ini"));
        assert_eq!((report.width, report.height), (16, 8));
        assert_eq!(report.frame_count, 2);
        assert!(report.image_path.is_file());
        assert!(report.descriptor_path.is_file());

        let text = std::fs::read_to_string(&report.descriptor_path).unwrap();
        let doc = Descriptor::parse(&text).unwrap();
        assert_eq!(doc.global("is_sheet"), Some("1"));
        assert_eq!(doc.entry("FILES", "file0"), Some("walker_sheet.png"));
    }

    #[test]
    fn test_export_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let sprite = two_frame_sprite();

        let first = export(&sprite, &dir.path().join("a")).unwrap();
        let second = export(&sprite, &dir.path().join("b")).unwrap();
        assert_eq!(first.png_hash, second.png_hash);

        let bytes_a = std::fs::read(&first.image_path).unwrap();
        let bytes_b = std::fs::read(&second.image_path).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn test_export_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let out_base = dir.path().join("walker_sheet");
        std::fs::write(dir.path().join("walker_sheet.png"), b"stale").unwrap();
        std::fs::write(dir.path().join("walker_sheet.ini"), b"stale").unwrap();

        let report = export(&two_frame_sprite(), &out_base).unwrap();
        let bytes = std::fs::read(&report.image_path).unwrap();
        assert_ne!(bytes.as_slice(), b"stale");
    }

    #[test]
    fn test_export_failure_leaves_no_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let out_base = dir.path().join("no_such_dir").join("walker_sheet");

        let err = export(&two_frame_sprite(), &out_base).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        // The image write failed, so the descriptor was never attempted
        assert!(!with_suffix(&out_base, ".ini").exists());
    }

    #[test]
    fn test_suffixes_are_appended_not_substituted() {
        let dir = tempfile::tempdir().unwrap();
        let out_base = dir.path().join("run.cycle");

        let report = export(&two_frame_sprite(), &out_base).unwrap();
        assert_eq!(report.image_path, dir.path().join("run.cycle.png"));
        assert_eq!(report.descriptor_path, dir.path().join("run.cycle.ini"));
    }
}
