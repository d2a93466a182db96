//! Sprite Descriptor Documents
//!
//! This crate provides the descriptor document model used to describe how a
//! sprite is loaded and reconstructed. Descriptors are small INI-style text
//! files: sectionless global keys first, then named `[SECTION]` blocks of
//! `key=value` entries.
//!
//! Two properties of the format are contractual and drive the design:
//!
//! - **Entry order is meaning.** The entries under `[FILES]` define the frame
//!   order of an animation; iteration must yield them in file-declared order,
//!   and re-invoking the iterator must restart from the first entry.
//! - **Values are legacy-lenient.** Numeric keys are read with C `atoi`
//!   semantics: optional sign, longest leading digit run, and `0` for
//!   anything unparseable or absent.
//!
//! Both rule out general-purpose config crates, which reorder entries,
//! collapse duplicate keys, or reject sectionless globals.
//!
//! # Example
//!
//! ```
//! use spriteloop_descriptor::Descriptor;
//!
//! let text = "\
//! use_alpha=1
//! is_sheet=0
//! frame_delay=2
//! num_frames=2
//!
//! [ALPHA]
//! r=255
//! g=0
//! b=255
//!
//! [SIZE]
//! width=32
//! height=32
//!
//! [FILES]
//! file0=walk_0.png
//! file1=walk_1.png
//! ";
//!
//! let doc = Descriptor::parse(text).unwrap();
//! assert_eq!(doc.global_int("frame_delay"), 2);
//! assert_eq!(doc.entry_int("SIZE", "width"), 32);
//!
//! let files: Vec<&str> = doc.entries("FILES").map(|e| e.value.as_str()).collect();
//! assert_eq!(files, ["walk_0.png", "walk_1.png"]);
//! ```
//!
//! # Modules
//!
//! - [`document`]: The [`Descriptor`] type, accessors, and the text writer
//! - [`parse`]: Text and file parsing
//! - [`error`]: The [`DescriptorError`] type

pub mod document;
pub mod error;
pub mod parse;

pub use document::{parse_legacy_int, Descriptor, Entry, Section};
pub use error::DescriptorError;
