// CurveLens - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Curve store and catalog setup
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use curvelens::app;

pub use curvelens::core;
pub use curvelens::platform;
pub use curvelens::ui;
pub use curvelens::util;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// CurveLens - browse the curve metadata of well logs.
///
/// Point CurveLens at a curve store directory laid out as
/// `<well>/<wellbore>/<log>.json` to browse its wells and inspect the curves
/// of each log.
#[derive(Parser, Debug)]
#[command(name = "CurveLens", version, about)]
struct Cli {
    /// Curve store directory (overrides the config file and platform default).
    path: Option<PathBuf>,

    /// Config file to load instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Write a demo well with a depth log and a time log into the store
    /// before launching.
    #[arg(long = "seed-demo")]
    seed_demo: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before logging so its level and file can be honoured.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform_paths.config_file());
    let (config, config_warnings) = platform::config::load_config(&config_path);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "CurveLens starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // Store directory: CLI override > config > platform default
    let store_root = cli
        .path
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| platform_paths.default_store_dir());
    let store = platform::store::FileCurveStore::new(&store_root)
        .with_fetch_delay(Duration::from_millis(config.fetch_delay_ms));

    if cli.seed_demo {
        if let Err(e) = platform::store::seed_demo(&store) {
            tracing::error!(error = %e, "Failed to write demo store");
            eprintln!("Error: failed to write demo store: {e}");
            std::process::exit(1);
        }
    }

    let server = core::model::ServerRef {
        name: config.server_name.clone(),
        url: config
            .server_url
            .clone()
            .unwrap_or_else(|| format!("file://{}", store_root.display())),
    };

    let (catalog, catalog_error) = match store.catalog() {
        Ok((catalog, warnings)) => {
            for warning in &warnings {
                tracing::warn!(warning = %warning, "Catalog warning");
            }
            (catalog, None)
        }
        Err(e) => {
            tracing::error!(error = %e, root = %store_root.display(), "Catalog unavailable");
            (core::model::Catalog::default(), Some(e))
        }
    };

    tracing::info!(logs = catalog.log_count(), "Ready to launch GUI");

    let mut state = app::state::AppState::new(server, catalog, cli.debug);
    state.dark_mode = config.dark_mode;
    for warning in config_warnings {
        state.notify(app::state::NotificationLevel::Info, warning);
    }
    if let Some(e) = catalog_error {
        state.notify(
            app::state::NotificationLevel::Error,
            format!("Curve store unavailable: {e}"),
        );
    }

    let store = Arc::new(store);
    let font_size = config.font_size;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            apply_font_size(&cc.egui_ctx, font_size);
            Ok(Box::new(gui::CurveLensApp::new(state, store)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch CurveLens GUI: {e}");
        std::process::exit(1);
    }
}

/// Scale the body, button and monospace text styles to the configured size.
fn apply_font_size(ctx: &egui::Context, size: f32) {
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Heading => size * 1.5,
                egui::TextStyle::Small => size * 0.75,
                _ => size,
            };
        }
    });
}
