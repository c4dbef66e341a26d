use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::AnalyzerConfig;
use crate::data::{self, Analysis, AnalyzeError};
use crate::session::SessionStore;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Pipeline and chart configuration.
    pub config: AnalyzerConfig,

    /// Raw bytes of every file loaded this session.
    pub session: SessionStore,

    /// Analysis outcome per file name.  Failures stay here so the tab can
    /// show what went wrong without blocking other files.
    pub analyses: BTreeMap<String, Result<Analysis, AnalyzeError>>,

    /// File whose tab is currently shown.
    pub selected_file: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Set when the user asked for a plot screenshot; consumed by the app.
    pub screenshot_requested: bool,

    /// Where the next screenshot should be written.
    pub screenshot_target: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            session: SessionStore::default(),
            analyses: BTreeMap::new(),
            selected_file: None,
            status_message: None,
            screenshot_requested: false,
            screenshot_target: None,
        }
    }

    /// Read and ingest a batch of files from disk.  A failure on one file
    /// never stops the rest.
    pub fn load_paths(&mut self, paths: Vec<PathBuf>) {
        for path in paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            match std::fs::read(&path) {
                Ok(bytes) => self.add_file(name, bytes),
                Err(e) => {
                    log::error!("failed to read {}: {e}", path.display());
                    self.status_message = Some(format!("Could not read {name}: {e}"));
                }
            }
        }
    }

    /// Ingest one file's bytes.  Undecodable files are skipped outright;
    /// files that decode but fail later stay listed with their error so the
    /// operator sees why the tab is empty.
    pub fn add_file(&mut self, name: String, bytes: Vec<u8>) {
        let result = match data::analyze(&bytes, &self.config) {
            Err(e @ AnalyzeError::Decode { .. }) => {
                log::error!("skipping {name}: {e}");
                self.status_message = Some(format!("Skipped {name}: {e}"));
                return;
            }
            other => other,
        };

        if let Err(e) = &result {
            log::error!("{name}: {e}");
        } else {
            log::info!("loaded {name}");
        }

        self.session.add(name.clone(), bytes);
        self.analyses.insert(name.clone(), result);
        self.selected_file = Some(name);
        self.status_message = None;
    }

    /// Drop a file from the session and its derived results.
    pub fn remove_file(&mut self, name: &str) {
        self.session.remove(name);
        self.analyses.remove(name);
        if self.selected_file.as_deref() == Some(name) {
            self.selected_file = self.session.names().first().cloned();
        }
    }

    /// The analysis for the currently selected tab, if any.
    pub fn selected_analysis(&self) -> Option<&Result<Analysis, AnalyzeError>> {
        self.analyses.get(self.selected_file.as_deref()?)
    }
}
