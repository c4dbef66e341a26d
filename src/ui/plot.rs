use eframe::egui::{Color32, Ui};
use egui_plot::{HLine, Legend, Plot, Points};

use crate::config::AnalyzerConfig;

// ---------------------------------------------------------------------------
// Diagnostic scatter plots
// ---------------------------------------------------------------------------

/// Diameter vs Probe ID, with the UCL/LCL control lines.
pub fn diameter_plot(ui: &mut Ui, points: &[[f64; 2]], config: &AnalyzerConfig) {
    Plot::new("diameter_plot")
        .legend(Legend::default())
        .x_axis_label("Probe ID")
        .y_axis_label("Diameter (µm)")
        .height(260.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points.to_vec())
                    .name("Measured Diameter")
                    .color(Color32::from_rgb(50, 100, 220))
                    .radius(2.5),
            );
            plot_ui.hline(
                HLine::new(config.diameter_ucl)
                    .name("UCL")
                    .color(Color32::RED)
                    .width(2.0),
            );
            plot_ui.hline(
                HLine::new(config.diameter_lcl)
                    .name("LCL")
                    .color(Color32::RED)
                    .width(2.0),
            );
        });
}

/// Planarity vs Probe ID.  No control limits on this chart.
pub fn planarity_plot(ui: &mut Ui, points: &[[f64; 2]]) {
    Plot::new("planarity_plot")
        .legend(Legend::default())
        .x_axis_label("Probe ID")
        .y_axis_label("Planarity (µm)")
        .height(260.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points.to_vec())
                    .name("Measured Planarity")
                    .color(Color32::from_rgb(40, 150, 70))
                    .radius(2.5),
            );
        });
}
