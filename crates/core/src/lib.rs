//! palette-picker-core: Toolkit independent logic of the palette-picker dialog.
//!
//! This crate contains the coordinate mapper between the stretched palette
//! display and its bitmap, the nearest-color search, validation of the
//! numeric fields and the picker state that keeps every input surface in
//! sync with the selected color.

pub mod constants;
pub mod mapping;
mod palette;
mod picker;
pub mod validation;

pub use constants::{
    CHANNEL_MAX, CROSSHAIR_ARM, CROSSHAIR_LINE_WIDTH, DEFAULT_DISPLAY_HEIGHT,
    DEFAULT_DISPLAY_WIDTH, DEFAULT_PALETTE_SIZE,
};
pub use palette::{PaletteError, PaletteImage, SearchMode};
pub use picker::{Outcome, PickerEvent, PickerState, SurfaceValues};
pub use validation::parse_and_clamp;

// Re-export types used in public signatures for convenience
pub use palette_picker_types::{Color, ColorCodeError, Point, Position, Size};
