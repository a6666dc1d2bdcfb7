//! palette-picker: An RGB color picker dialog for GTK4
//!
//! This library provides:
//! - The color picker dialog with palette, sliders, numeric and hex inputs
//! - Palette loading and rendering on top of cairo
//! - Configuration management
//!
//! The toolkit independent logic lives in `palette-picker-core`.

pub mod config;
pub mod ui;

// Re-export commonly used types
pub use config::PickerConfig;
pub use palette_picker_core::{Color, PaletteImage, PickerState, SearchMode};
pub use ui::ColorPickerDialog;
