//! Configuration management

mod settings;

pub use settings::{DisplayConfig, PickerConfig, WindowConfig};
