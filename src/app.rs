use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AnalyzerApp {
    pub state: AppState,
}

impl AnalyzerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.screenshot_requested {
            self.state.screenshot_requested = false;
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
        }
        self.handle_screenshot_events(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: session file list ----
        egui::SidePanel::left("files_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: per-file analysis tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::analysis_view(ui, &mut self.state);
        });
    }
}

impl AnalyzerApp {
    /// Write a completed viewport screenshot to the path the user picked.
    fn handle_screenshot_events(&mut self, ctx: &egui::Context) {
        let screenshot = ctx.input(|input| {
            input.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });

        if let Some(image) = screenshot {
            if let Some(path) = self.state.screenshot_target.take() {
                match save_screenshot(&image, &path) {
                    Ok(()) => {
                        log::info!("saved plot screenshot to {}", path.display());
                        self.state.status_message = Some(format!("Saved {}", path.display()));
                    }
                    Err(e) => {
                        log::error!("screenshot save failed: {e:#}");
                        self.state.status_message = Some(format!("Screenshot failed: {e:#}"));
                    }
                }
            }
        }
    }
}

fn save_screenshot(image: &Arc<egui::ColorImage>, path: &Path) -> Result<()> {
    let [width, height] = image.size;
    let buffer =
        image::RgbaImage::from_raw(width as u32, height as u32, image.as_raw().to_vec())
            .context("screenshot buffer has unexpected size")?;
    buffer
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
