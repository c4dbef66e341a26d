use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use super::table::DataTable;

// ---------------------------------------------------------------------------
// Cleaned-table export
// ---------------------------------------------------------------------------

/// Default export file name, timestamped like the reports the operators
/// already archive: `analyzed_data_YYYYMMDD_HHMMSS.csv`.
pub fn default_export_name() -> String {
    format!("analyzed_data_{}.csv", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Write the cleaned table as CSV to any writer.
pub fn write_csv<W: std::io::Write>(table: &DataTable, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(table.header()).context("writing header")?;
    for row in 0..table.n_rows() {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|c| c.values[row].to_string())
            .collect();
        out.write_record(&record)
            .with_context(|| format!("writing row {row}"))?;
    }
    out.flush().context("flushing CSV export")?;
    Ok(())
}

/// Write the cleaned table to a file path.
pub fn save_table(table: &DataTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(table, file)
}
