//! spriteloop End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full sprite pipeline:
//!
//! - Playback: descriptor on disk -> loaded sprite -> clock-driven frames
//! - Round-trip: frame-list sprite -> sheet export -> reloaded sheet sprite
//! - CLI: command entry points driven as library calls
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p spriteloop-tests
//! ```
//!
//! The [`fixtures`] module builds sprite directories (frame PNGs plus a
//! descriptor) inside a temp dir, so every test starts from a real on-disk
//! layout rather than pre-built values.

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::SpriteFixture;
