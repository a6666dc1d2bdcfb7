//! Shared constants for the picker

/// Width and height of the generated default palette bitmap
pub const DEFAULT_PALETTE_SIZE: i32 = 256;

/// Default width of the palette drawing area
pub const DEFAULT_DISPLAY_WIDTH: i32 = 315;

/// Default height of the palette drawing area
pub const DEFAULT_DISPLAY_HEIGHT: i32 = 202;

/// Length of each crosshair arm, measured from the marker
pub const CROSSHAIR_ARM: f64 = 5.0;

/// Stroke width of the crosshair lines
pub const CROSSHAIR_LINE_WIDTH: f64 = 2.0;

/// Largest value a channel slider or numeric field can hold
pub const CHANNEL_MAX: u8 = 255;
