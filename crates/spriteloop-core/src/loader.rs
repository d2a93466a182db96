//! Descriptor-driven sprite loading.
//!
//! [`load`] turns a parsed descriptor plus a base directory into an owned
//! [`SpriteResource`]. Values are read with the legacy lenient semantics the
//! descriptor format has always had: `use_alpha` is truthy when positive,
//! `is_sheet` when nonzero, and any unparseable number reads as 0.

use std::path::Path;

use spriteloop_descriptor::Descriptor;
use thiserror::Error;

use crate::bitmap::{Bitmap, Rgb};
use crate::codec::{decode_png, CodecError};
use crate::resource::{ConfigError, SpriteParams, SpriteResource};

/// Errors from loading a sprite.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The descriptor's configuration values were invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A frame image could not be decoded. Frames decoded before the
    /// failure are released; the caller receives no resource.
    #[error("Failed to load frame image {file}: {source}")]
    FrameLoad {
        file: String,
        #[source]
        source: CodecError,
    },
}

/// Load a sprite from a descriptor, resolving frame files against
/// `base_dir`.
///
/// Dimensions are validated before any image is opened. For a sheet sprite
/// only the first `[FILES]` entry is read (extra entries are ignored) and
/// the frame count is taken from the `num_frames` global. For a frame-list
/// sprite the frame count is the number of `[FILES]` entries, decoded in
/// entry order. When `use_alpha` is set, the color-key transform runs on
/// each bitmap immediately after its decode.
pub fn load(base_dir: &Path, descriptor: &Descriptor) -> Result<SpriteResource, LoadError> {
    let width = descriptor.entry_int("SIZE", "width");
    let height = descriptor.entry_int("SIZE", "height");
    if width <= 0 || height <= 0 {
        return Err(ConfigError::InvalidDimensions { width, height }.into());
    }

    let use_alpha = descriptor.global_int("use_alpha") > 0;
    let is_sheet = descriptor.global_int("is_sheet") != 0;

    let alpha_key = if use_alpha {
        Rgb::new(
            channel(descriptor.entry_int("ALPHA", "r")),
            channel(descriptor.entry_int("ALPHA", "g")),
            channel(descriptor.entry_int("ALPHA", "b")),
        )
    } else {
        Rgb::default()
    };

    let params = SpriteParams {
        use_alpha,
        alpha_key,
        frame_width: width,
        frame_height: height,
        frame_delay: descriptor.global_int("frame_delay"),
    };

    if is_sheet {
        let num_frames = descriptor.global_int("num_frames");
        if num_frames < 1 {
            return Err(ConfigError::InvalidFrameCount { count: num_frames }.into());
        }
        let entry = descriptor
            .entries("FILES")
            .next()
            .ok_or(ConfigError::MissingFiles)?;
        let strip = decode_frame(base_dir, &entry.value, use_alpha, alpha_key)?;
        Ok(SpriteResource::from_sheet(params, num_frames, strip)?)
    } else {
        let files = descriptor.entries("FILES");
        if files.len() == 0 {
            return Err(ConfigError::MissingFiles.into());
        }
        let mut frames = Vec::with_capacity(files.len());
        for entry in files {
            frames.push(decode_frame(base_dir, &entry.value, use_alpha, alpha_key)?);
        }
        Ok(SpriteResource::from_frames(params, frames)?)
    }
}

fn decode_frame(
    base_dir: &Path,
    file: &str,
    use_alpha: bool,
    alpha_key: Rgb,
) -> Result<Bitmap, LoadError> {
    let path = base_dir.join(file);
    let mut bitmap = decode_png(&path).map_err(|source| LoadError::FrameLoad {
        file: file.to_string(),
        source,
    })?;
    if use_alpha {
        bitmap.color_key_to_alpha(alpha_key);
    }
    Ok(bitmap)
}

fn channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{write_png_with_hash, PngConfig};
    use std::path::PathBuf;

    fn write_solid_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        let bitmap = Bitmap::new(width, height, color);
        write_png_with_hash(&bitmap, &path, &PngConfig::default()).unwrap();
        path
    }

    fn frame_list_descriptor(files: &[&str]) -> Descriptor {
        let mut doc = Descriptor::new();
        doc.set_global("use_alpha", "0");
        doc.set_global("is_sheet", "0");
        doc.set_global("frame_delay", "2");
        doc.set_global("num_frames", &files.len().to_string());
        doc.push_entry("SIZE", "width", "8");
        doc.push_entry("SIZE", "height", "8");
        for (i, file) in files.iter().enumerate() {
            doc.push_entry("FILES", format!("file{i}"), *file);
        }
        doc
    }

    #[test]
    fn test_load_frame_list_in_entry_order() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_png(dir.path(), "red.png", 8, 8, [255, 0, 0, 255]);
        write_solid_png(dir.path(), "green.png", 8, 8, [0, 255, 0, 255]);

        let doc = frame_list_descriptor(&["red.png", "green.png"]);
        let sprite = load(dir.path(), &doc).unwrap();

        assert!(!sprite.is_sheet());
        assert_eq!(sprite.frame_count(), 2);
        assert_eq!(sprite.frame_delay(), 2);
        assert_eq!(sprite.bitmaps().len(), 2);
        assert_eq!(sprite.bitmaps()[0].get(0, 0), [255, 0, 0, 255]);
        assert_eq!(sprite.bitmaps()[1].get(0, 0), [0, 255, 0, 255]);
    }

    #[test]
    fn test_load_rejects_bad_dimensions_before_decoding() {
        let dir = tempfile::tempdir().unwrap();

        // The frame file does not exist; the dimension failure must win
        // because no image may be opened before dimensions are validated.
        let mut doc = Descriptor::new();
        doc.set_global("is_sheet", "0");
        doc.push_entry("SIZE", "width", "0");
        doc.push_entry("SIZE", "height", "8");
        doc.push_entry("FILES", "file0", "absent.png");

        let err = load(dir.path(), &doc).unwrap_err();
        match err {
            LoadError::Config(ConfigError::InvalidDimensions { width, height }) => {
                assert_eq!((width, height), (0, 8));
            }
            other => panic!("expected InvalidDimensions, got {other:?}"),
        }

        // Same for a missing SIZE section entirely: both read as 0
        let mut doc = Descriptor::new();
        doc.push_entry("FILES", "file0", "absent.png");
        assert!(matches!(
            load(dir.path(), &doc).unwrap_err(),
            LoadError::Config(ConfigError::InvalidDimensions {
                width: 0,
                height: 0
            })
        ));
    }

    #[test]
    fn test_load_rejects_empty_file_list() {
        let dir = tempfile::tempdir().unwrap();
        let doc = frame_list_descriptor(&[]);
        let err = load(dir.path(), &doc).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Config(ConfigError::MissingFiles)
        ));
    }

    #[test]
    fn test_load_names_the_failing_frame() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_png(dir.path(), "ok.png", 8, 8, [1, 2, 3, 255]);

        let doc = frame_list_descriptor(&["ok.png", "broken.png"]);
        let err = load(dir.path(), &doc).unwrap_err();
        match err {
            LoadError::FrameLoad { file, .. } => assert_eq!(file, "broken.png"),
            other => panic!("expected FrameLoad, got {other:?}"),
        }
    }

    fn sheet_descriptor(num_frames: &str, files: &[&str]) -> Descriptor {
        let mut doc = Descriptor::new();
        doc.set_global("use_alpha", "0");
        doc.set_global("is_sheet", "1");
        doc.set_global("frame_delay", "0");
        doc.set_global("num_frames", num_frames);
        doc.push_entry("SIZE", "width", "8");
        doc.push_entry("SIZE", "height", "8");
        for (i, file) in files.iter().enumerate() {
            doc.push_entry("FILES", format!("file{i}"), *file);
        }
        doc
    }

    #[test]
    fn test_load_sheet_decodes_one_bitmap() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_png(dir.path(), "strip.png", 32, 8, [9, 9, 9, 255]);

        let doc = sheet_descriptor("4", &["strip.png"]);
        let sprite = load(dir.path(), &doc).unwrap();

        assert!(sprite.is_sheet());
        assert_eq!(sprite.frame_count(), 4);
        assert_eq!(sprite.bitmaps().len(), 1);
        assert!(sprite.sheet_geometry_consistent());
    }

    #[test]
    fn test_load_sheet_reads_only_first_file_entry() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_png(dir.path(), "strip.png", 32, 8, [9, 9, 9, 255]);

        // The second entry does not exist on disk and must be ignored
        let doc = sheet_descriptor("4", &["strip.png", "missing.png"]);
        let sprite = load(dir.path(), &doc).unwrap();
        assert_eq!(sprite.bitmaps().len(), 1);
    }

    #[test]
    fn test_load_sheet_trusts_num_frames_but_reports_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_png(dir.path(), "strip.png", 20, 8, [9, 9, 9, 255]);

        let doc = sheet_descriptor("4", &["strip.png"]);
        let sprite = load(dir.path(), &doc).unwrap();
        assert_eq!(sprite.frame_count(), 4);
        assert!(!sprite.sheet_geometry_consistent());
    }

    #[test]
    fn test_load_sheet_rejects_frame_count_below_one() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_png(dir.path(), "strip.png", 32, 8, [9, 9, 9, 255]);

        let doc = sheet_descriptor("0", &["strip.png"]);
        let err = load(dir.path(), &doc).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Config(ConfigError::InvalidFrameCount { count: 0 })
        ));
    }

    #[test]
    fn test_alpha_key_applied_once_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyed.png");
        let mut bitmap = Bitmap::new(8, 8, [255, 0, 255, 255]);
        bitmap.set(1, 1, [40, 50, 60, 255]);
        write_png_with_hash(&bitmap, &path, &PngConfig::default()).unwrap();

        let mut doc = frame_list_descriptor(&["keyed.png"]);
        doc.set_global("use_alpha", "1");
        doc.push_entry("ALPHA", "r", "255");
        doc.push_entry("ALPHA", "g", "0");
        doc.push_entry("ALPHA", "b", "255");

        let sprite = load(dir.path(), &doc).unwrap();
        assert!(sprite.use_alpha());
        assert_eq!(sprite.alpha_key(), Rgb::new(255, 0, 255));
        assert_eq!(sprite.bitmaps()[0].get(0, 0), [0, 0, 0, 0]);
        assert_eq!(sprite.bitmaps()[0].get(1, 1), [40, 50, 60, 255]);
    }

    #[test]
    fn test_alpha_channels_clamp_to_byte_range() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_png(dir.path(), "f.png", 8, 8, [7, 7, 7, 255]);

        let mut doc = frame_list_descriptor(&["f.png"]);
        doc.set_global("use_alpha", "1");
        doc.push_entry("ALPHA", "r", "300");
        doc.push_entry("ALPHA", "g", "-40");
        doc.push_entry("ALPHA", "b", "128");

        let sprite = load(dir.path(), &doc).unwrap();
        assert_eq!(sprite.alpha_key(), Rgb::new(255, 0, 128));
    }

    #[test]
    fn test_legacy_flag_truthiness() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_png(dir.path(), "f.png", 8, 8, [7, 7, 7, 255]);

        // use_alpha is "greater than zero"; a negative value is off
        let mut doc = frame_list_descriptor(&["f.png"]);
        doc.set_global("use_alpha", "-1");
        let sprite = load(dir.path(), &doc).unwrap();
        assert!(!sprite.use_alpha());

        let mut doc = frame_list_descriptor(&["f.png"]);
        doc.set_global("use_alpha", "2");
        doc.push_entry("ALPHA", "r", "1");
        doc.push_entry("ALPHA", "g", "2");
        doc.push_entry("ALPHA", "b", "3");
        let sprite = load(dir.path(), &doc).unwrap();
        assert!(sprite.use_alpha());

        // is_sheet is "nonzero"; a negative value turns it on
        write_solid_png(dir.path(), "strip.png", 16, 8, [7, 7, 7, 255]);
        let mut doc = sheet_descriptor("2", &["strip.png"]);
        doc.set_global("is_sheet", "-1");
        let sprite = load(dir.path(), &doc).unwrap();
        assert!(sprite.is_sheet());
    }

    #[test]
    fn test_missing_and_garbage_numbers_read_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        write_solid_png(dir.path(), "f.png", 8, 8, [7, 7, 7, 255]);

        let mut doc = Descriptor::new();
        // No use_alpha, no is_sheet, garbage frame_delay
        doc.set_global("frame_delay", "fast");
        doc.push_entry("SIZE", "width", "8");
        doc.push_entry("SIZE", "height", "8");
        doc.push_entry("FILES", "file0", "f.png");

        let sprite = load(dir.path(), &doc).unwrap();
        assert!(!sprite.is_sheet());
        assert!(!sprite.use_alpha());
        assert_eq!(sprite.frame_delay(), 0);
    }
}
