//! Extraction-and-analysis core, independent of the UI.
//!
//! Pipeline (one uploaded file at a time):
//! ```text
//!   raw bytes
//!       │
//!       ▼
//!  ┌──────────┐
//!  │ encoding  │  detect + decode → text
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  locate   │  sentinel scan → table window
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │ normalize │  header promotion, cleanup, coercion → DataTable
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  stats    │  key-sorted points, top-N rankings
//!  └──────────┘
//! ```
//!
//! Every stage is a pure function over its input; a failure for one file
//! never affects the rest of the batch.

pub mod encoding;
pub mod export;
pub mod locate;
pub mod normalize;
pub mod stats;
pub mod table;

use thiserror::Error;

use crate::config::AnalyzerConfig;
use locate::RawDocument;
use normalize::{DIAMETER_COLUMN, PLANARITY_COLUMN};
use stats::{RankDirection, RankedView};
use table::DataTable;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Per-file analysis failure.  All variants are local to one file; the
/// batch always continues.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("file could not be decoded as {encoding}")]
    Decode { encoding: &'static str },

    #[error("file is not readable as CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("'Probe ID' header not found in the file")]
    HeaderNotFound,

    #[error("data table has no 'Probe ID' column")]
    MissingKeyColumn,
}

// ---------------------------------------------------------------------------
// Analysis – everything one report tab renders
// ---------------------------------------------------------------------------

/// Derived results for one file: the cleaned table plus the views the
/// report needs.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: DataTable,
    pub diameter_points: Vec<[f64; 2]>,
    pub planarity_points: Vec<[f64; 2]>,
    pub top_largest: RankedView,
    pub top_smallest: RankedView,
}

/// Run the full pipeline on one file's raw bytes.
pub fn analyze(bytes: &[u8], config: &AnalyzerConfig) -> Result<Analysis, AnalyzeError> {
    let text = encoding::decode(bytes)?;
    let doc = RawDocument::parse(&text)?;
    let window = locate::locate(&doc, config.sentinel_mode)?;
    let table = normalize::normalize(&doc.rows[window])?;

    log::info!(
        "analyzed table: {} rows, columns {:?}",
        table.n_rows(),
        table.header()
    );

    let diameter_points = stats::xy_points(&table, DIAMETER_COLUMN);
    let planarity_points = stats::xy_points(&table, PLANARITY_COLUMN);
    let top_largest = stats::top_n(&table, DIAMETER_COLUMN, RankDirection::Largest, config.top_n);
    let top_smallest = stats::top_n(&table, DIAMETER_COLUMN, RankDirection::Smallest, config.top_n);

    Ok(Analysis {
        table,
        diameter_points,
        planarity_points,
        top_largest,
        top_smallest,
    })
}
