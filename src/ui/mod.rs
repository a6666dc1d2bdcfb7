//! UI components

mod color_picker;
pub mod palette_surface;

pub use color_picker::ColorPickerDialog;
