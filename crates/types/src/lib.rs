//! palette-picker-types: Shared data types for the palette-picker dialog.
//!
//! This crate contains pure data types (colors, hex codes, geometry) that are
//! shared across all palette-picker crates. Cairo conversions are
//! only compiled with the `gtk` feature, so the foundation layer stays
//! usable without a display.

pub mod color;
pub mod geometry;

// Re-export commonly used types at the crate root for convenience
pub use color::{Color, ColorCodeError};
pub use geometry::{Point, Position, Size};
