//! Presentation layer: panels, plots and dialogs around the analysis core.

pub mod panels;
pub mod plot;
