//! Library surface of the `spriteloop` binary.
//!
//! Command implementations live here rather than in `main.rs` so
//! integration tests can drive them directly.

pub mod commands;
