mod app;
mod config;
mod data;
mod session;
mod state;
mod ui;

use std::path::Path;

use app::AnalyzerApp;
use config::{AnalyzerConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match AnalyzerConfig::load(Path::new(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("bad config, using defaults: {e:#}");
            AnalyzerConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Probe Card Analyzer",
        options,
        Box::new(move |_cc| Ok(Box::new(AnalyzerApp::new(AppState::new(config))))),
    )
}
