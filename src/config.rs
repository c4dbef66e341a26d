use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::locate::SentinelMode;

/// File name looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "probe-card-analyzer.json";

// ---------------------------------------------------------------------------
// Analyzer configuration
// ---------------------------------------------------------------------------

/// Tunables for the analysis pipeline and the diameter control chart.
///
/// Defaults match the limits the process engineers run with; a JSON file
/// next to the executable overrides them per station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Upper control limit drawn on the diameter chart, in µm.
    pub diameter_ucl: f64,
    /// Lower control limit drawn on the diameter chart, in µm.
    pub diameter_lcl: f64,
    /// How many rows each ranking table shows.
    pub top_n: usize,
    /// Which structural anchor marks the table header.
    pub sentinel_mode: SentinelMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            diameter_ucl: 24.0,
            diameter_lcl: 14.0,
            top_n: 5,
            sentinel_mode: SentinelMode::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing analyzer config")
    }

    /// Load the station config, falling back to defaults when the file is
    /// absent.  A present-but-broken file is an error so a typo does not
    /// silently revert the station to default limits.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no {} found, using default config", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text)
    }
}
