use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::export;
use crate::data::stats::{RankDirection, RankedView};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export plots as PNG…").clicked() {
                request_screenshot(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.session.is_empty() {
            ui.label(format!("{} file(s) loaded", state.session.len()));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – session file list
// ---------------------------------------------------------------------------

/// Render the file list with per-file remove buttons.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Uploaded files");
    ui.separator();

    if ui.button("📂 Open CSV files…").clicked() {
        open_file_dialog(state);
    }
    ui.add_space(4.0);

    if state.session.is_empty() {
        ui.label("No files loaded yet.");
        return;
    }

    let mut to_remove: Option<String> = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for name in state.session.names() {
                ui.horizontal(|ui: &mut Ui| {
                    let selected = state.selected_file.as_deref() == Some(name.as_str());
                    if ui.selectable_label(selected, &name).clicked() {
                        state.selected_file = Some(name.clone());
                    }
                    if ui.small_button("🗑").clicked() {
                        to_remove = Some(name.clone());
                    }
                });
            }
        });

    if let Some(name) = to_remove {
        state.remove_file(&name);
    }
}

// ---------------------------------------------------------------------------
// Central panel – per-file analysis tabs
// ---------------------------------------------------------------------------

/// Render the tab strip and the selected file's report.
pub fn analysis_view(ui: &mut Ui, state: &mut AppState) {
    if state.session.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open CSV exports to analyze  (File → Open…)");
        });
        return;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for name in state.session.names() {
            let selected = state.selected_file.as_deref() == Some(name.as_str());
            if ui.selectable_label(selected, &name).clicked() {
                state.selected_file = Some(name);
            }
        }
    });
    ui.separator();

    let Some(name) = state.selected_file.clone() else {
        return;
    };
    let Some(result) = state.analyses.get(&name) else {
        return;
    };

    let analysis = match result {
        Ok(analysis) => analysis,
        Err(e) => {
            ui.label(RichText::new(format!("❌ {e}")).color(Color32::RED));
            return;
        }
    };

    // The export dialog mutates state, so the click is deferred until the
    // analysis borrow is released.
    let mut export_clicked = false;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(format!(
                "✅ {} probes, {} columns",
                analysis.table.n_rows(),
                analysis.table.n_cols()
            ));
            ui.add_space(4.0);

            ui.strong("Diameter vs Probe ID");
            super::plot::diameter_plot(ui, &analysis.diameter_points, &state.config);
            ui.add_space(8.0);

            ui.strong("Planarity vs Probe ID");
            super::plot::planarity_plot(ui, &analysis.planarity_points);
            ui.add_space(8.0);

            ranking_table(ui, "🔝 Top 5 Largest Diameters", &analysis.top_largest);
            ui.add_space(8.0);
            ranking_table(ui, "🔻 Top 5 Smallest Diameters", &analysis.top_smallest);
            ui.add_space(8.0);

            export_clicked = ui.button("💾 Export cleaned table as CSV…").clicked();
        });

    if export_clicked {
        save_table_dialog(state, &name);
    }
}

/// One ranking table, projected to probe id / probe name / measurement.
fn ranking_table(ui: &mut Ui, title: &str, view: &RankedView) {
    ui.strong(title);
    if view.rows.is_empty() {
        ui.label(format!("No '{}' values in this file.", view.measurement));
        return;
    }

    let salt = match view.direction {
        RankDirection::Largest => "ranking_largest",
        RankDirection::Smallest => "ranking_smallest",
    };
    ui.push_id(salt, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(TableColumn::auto().at_least(80.0))
            .column(TableColumn::auto().at_least(120.0))
            .column(TableColumn::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Probe ID");
                });
                header.col(|ui| {
                    ui.strong("Probe name");
                });
                header.col(|ui| {
                    ui.strong(&view.measurement);
                });
            })
            .body(|mut body| {
                for row in &view.rows {
                    body.row(18.0, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(row.probe_id.to_string());
                        });
                        table_row.col(|ui| {
                            ui.label(row.probe_name.to_string());
                        });
                        table_row.col(|ui| {
                            ui.label(format!("{:.3}", row.value));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open probe card CSV exports")
        .add_filter("CSV", &["csv"])
        .pick_files();

    if let Some(paths) = files {
        state.load_paths(paths);
    }
}

fn save_table_dialog(state: &mut AppState, file_name: &str) {
    let Some(Ok(analysis)) = state.analyses.get(file_name) else {
        return;
    };

    let target = rfd::FileDialog::new()
        .set_title("Export cleaned table")
        .set_file_name(export::default_export_name())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = target {
        match export::save_table(&analysis.table, &path) {
            Ok(()) => {
                log::info!("exported cleaned table to {}", path.display());
                state.status_message = Some(format!("Exported {}", path.display()));
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                state.status_message = Some(format!("Export failed: {e:#}"));
            }
        }
    }
}

fn request_screenshot(state: &mut AppState) {
    let target = rfd::FileDialog::new()
        .set_title("Save plot screenshot")
        .set_file_name("probe_card_plots.png")
        .add_filter("PNG", &["png"])
        .save_file();

    if let Some(path) = target {
        state.screenshot_target = Some(path);
        state.screenshot_requested = true;
    }
}
