//! Force Read Mode - markdown note host with a plugin that keeps selected
//! folders and files in reading mode
//!
//! Usage: `force-read-mode [VAULT_DIR]`

mod app;
mod core;
mod plugin;
mod ui;

use std::path::PathBuf;

use app::ForceReadApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    let vault = std::env::args_os().nth(1).map(PathBuf::from);
    tracing::info!("Starting Force Read Mode...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Force Read Mode"),
        ..Default::default()
    };

    eframe::run_native(
        "Force Read Mode",
        native_options,
        Box::new(|cc| Ok(Box::new(ForceReadApp::new(cc, vault)))),
    )
}
