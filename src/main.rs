use clap::Parser;
use gtk4::gio::ApplicationFlags;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::Application;
use log::{error, info, warn};
use palette_picker::config::PickerConfig;
use palette_picker::ui::ColorPickerDialog;
use palette_picker::Color;
use std::path::PathBuf;

const APP_ID: &str = "com.github.palette_picker";

/// palette-picker - pick an RGB color from a palette, sliders or a hex code
#[derive(Parser, Debug, Clone)]
#[command(name = "palette-picker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Initial color as a hex code (e.g., --color=#FF8000)
    #[arg(short = 'c', long = "color", value_name = "HEX", value_parser = parse_color)]
    color: Option<Color>,

    /// PNG image to use as palette instead of the built-in spectrum
    #[arg(short = 'p', long = "palette", value_name = "PNG")]
    palette: Option<PathBuf>,

    /// Settings file to use instead of the default location
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the default settings file and exit
    #[arg(long = "write-config")]
    write_config: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

/// Parse a hex color code argument
fn parse_color(s: &str) -> Result<Color, String> {
    Color::from_hex(s).map_err(|e| format!("Invalid color '{}': {}", s, e))
}

fn main() -> glib::ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger with verbosity based on -d/--debug flag
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting palette-picker v{}", env!("CARGO_PKG_VERSION"));

    if cli.write_config {
        return write_default_config(cli.config.as_ref());
    }

    let mut config = load_config(cli.config.as_ref());
    if let Some(palette) = cli.palette.clone() {
        config.palette_path = Some(palette);
    }
    let initial = cli.color.or(config.default_color);

    // Each invocation gets its own dialog, so scripts can run several at once
    let app = Application::builder()
        .application_id(APP_ID)
        .flags(ApplicationFlags::NON_UNIQUE)
        .build();

    app.connect_activate(move |app| build_ui(app, initial, &config));

    // Run the application (pass only the program name since we already parsed the args)
    app.run_with_args(&["palette-picker"])
}

/// Load settings from the given file or the default location, falling back to defaults
fn load_config(path: Option<&PathBuf>) -> PickerConfig {
    let loaded = match path {
        Some(path) => PickerConfig::load_from_path(path),
        None => PickerConfig::load(),
    };

    match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load settings, using defaults: {}", e);
            PickerConfig::default()
        }
    }
}

fn write_default_config(path: Option<&PathBuf>) -> glib::ExitCode {
    let config = PickerConfig::default();
    let written = match path {
        Some(path) => config.save_to_path(path).map(|_| path.clone()),
        None => config.save(),
    };

    match written {
        Ok(path) => {
            println!("Wrote {}", path.display());
            glib::ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to write settings: {}", e);
            glib::ExitCode::FAILURE
        }
    }
}

fn build_ui(app: &Application, initial: Option<Color>, config: &PickerConfig) {
    info!("Building UI");

    let picker = ColorPickerDialog::new(None, initial, config);
    picker.window().set_application(Some(app));

    let app = app.clone();
    glib::MainContext::default().spawn_local(async move {
        let color = picker.run().await;
        // The chosen color is the program's output
        println!("{}", color);
        app.quit();
    });
}
