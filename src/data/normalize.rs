use super::table::{CellValue, Column, DataTable};
use super::AnalyzeError;

/// Key column used for sorting and row validity.
pub const KEY_COLUMN: &str = "Probe ID";
pub const DIAMETER_COLUMN: &str = "Diameter (µm)";
pub const PLANARITY_COLUMN: &str = "Planarity (µm)";

/// Columns coerced to numeric during normalization.
pub const NUMERIC_COLUMNS: [&str; 3] = [KEY_COLUMN, DIAMETER_COLUMN, PLANARITY_COLUMN];

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Turn a located table window into a [`DataTable`].
///
/// The steps run in a fixed order so the result is reproducible:
/// 1. the first row of the window becomes the column names;
/// 2. names are trimmed;
/// 3. empty or absent names become `Unnamed_{index}`;
/// 4. later duplicate names are dropped, keeping the first occurrence;
/// 5. columns that are empty in every row are dropped;
/// 6. `Probe ID`, `Diameter (µm)` and `Planarity (µm)` are coerced to
///    numeric, unparseable cells becoming `Missing` (never an error);
/// 7. rows whose `Probe ID` is missing after coercion are dropped.
pub fn normalize(window: &[Vec<String>]) -> Result<DataTable, AnalyzeError> {
    let (header, data) = window.split_first().ok_or(AnalyzeError::HeaderNotFound)?;

    // Ragged exports are common: data rows may be wider than the header.
    let width = data
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);

    let mut columns: Vec<Column> = Vec::with_capacity(width);
    for index in 0..width {
        let trimmed = header.get(index).map(|name| name.trim()).unwrap_or("");
        let name = if trimmed.is_empty() {
            format!("Unnamed_{index}")
        } else {
            trimmed.to_string()
        };

        // Later duplicates are dropped entirely, values included.
        if columns.iter().any(|c| c.name == name) {
            continue;
        }

        let values = data
            .iter()
            .map(|row| match row.get(index) {
                Some(cell) if !cell.trim().is_empty() => CellValue::Text(cell.clone()),
                _ => CellValue::Missing,
            })
            .collect();
        columns.push(Column { name, values });
    }

    // Drop columns that carry no value in any row.  A table with no data
    // rows keeps its columns: there is nothing to judge emptiness by.
    if !data.is_empty() {
        columns.retain(|c| !c.values.iter().all(CellValue::is_missing));
    }

    let mut table = DataTable { columns };

    for name in NUMERIC_COLUMNS {
        coerce_numeric(&mut table, name);
    }

    let key = table
        .column(KEY_COLUMN)
        .ok_or(AnalyzeError::MissingKeyColumn)?;
    let valid: Vec<bool> = key.values.iter().map(|v| !v.is_missing()).collect();
    table.retain_rows(|i| valid[i]);

    Ok(table)
}

/// Best-effort numeric coercion of one named column.  An absent column is
/// simply left absent (all-missing downstream), matching the
/// degrade-gracefully policy for measurement columns.
///
/// `f64::from_str` accepts `"nan"` and `"inf"`; those must become
/// `Missing`, not `Number`, or a `nan` key would dodge the row drop and a
/// NaN measurement would outrank every finite value.
fn coerce_numeric(table: &mut DataTable, name: &str) {
    let Some(column) = table.columns.iter_mut().find(|c| c.name == name) else {
        return;
    };
    for value in &mut column.values {
        if let CellValue::Text(s) = value {
            *value = match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => CellValue::Number(n),
                _ => CellValue::Missing,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    /// Render a table back into header + data rows, the way an export would.
    fn as_rows(table: &DataTable) -> Vec<Vec<String>> {
        let mut rows = vec![table.header().iter().map(|s| s.to_string()).collect::<Vec<_>>()];
        for i in 0..table.n_rows() {
            rows.push(
                table
                    .columns
                    .iter()
                    .map(|c| c.values[i].to_string())
                    .collect(),
            );
        }
        rows
    }

    #[test]
    fn header_names_are_trimmed_and_filled() {
        let w = window(&[
            &[" Probe ID ", "", "Comment"],
            &["1", "x", "fine"],
        ]);
        let t = normalize(&w).unwrap();
        assert_eq!(t.header(), vec!["Probe ID", "Unnamed_1", "Comment"]);
    }

    #[test]
    fn duplicate_names_keep_first_occurrence() {
        let w = window(&[
            &["A", "B", "A", "Probe ID"],
            &["first", "b", "second", "1"],
        ]);
        let t = normalize(&w).unwrap();
        assert_eq!(t.header(), vec!["A", "B", "Probe ID"]);
        assert_eq!(t.cell(0, "A"), Some(&CellValue::Text("first".into())));
    }

    #[test]
    fn all_empty_columns_are_dropped() {
        let w = window(&[
            &["Probe ID", "Empty", "Note"],
            &["1", "", "a"],
            &["2", "  ", "b"],
        ]);
        let t = normalize(&w).unwrap();
        assert_eq!(t.header(), vec!["Probe ID", "Note"]);
    }

    #[test]
    fn coercion_turns_bad_cells_into_missing_and_drops_bad_key_rows() {
        let w = window(&[
            &["Probe ID", "Diameter (µm)"],
            &["1", "12.5"],
            &["oops", "3.0"],
            &["3", "n/a"],
            &["4", "7"],
        ]);
        let t = normalize(&w).unwrap();
        // The row whose key failed coercion is gone entirely.
        assert_eq!(t.n_rows(), 3);
        let d = &t.column("Diameter (µm)").unwrap().values;
        assert_eq!(
            d,
            &vec![
                CellValue::Number(12.5),
                CellValue::Missing,
                CellValue::Number(7.0)
            ]
        );
    }

    #[test]
    fn non_finite_parses_become_missing() {
        let w = window(&[
            &["Probe ID", "Diameter (µm)"],
            &["nan", "20.0"],
            &["2", "NaN"],
            &["3", "-inf"],
            &["4", "18.0"],
        ]);
        let t = normalize(&w).unwrap();
        // The "nan" key row is dropped like any other unparseable key.
        assert_eq!(t.n_rows(), 3);
        let d = &t.column(DIAMETER_COLUMN).unwrap().values;
        assert_eq!(
            d,
            &vec![
                CellValue::Missing,
                CellValue::Missing,
                CellValue::Number(18.0)
            ]
        );
    }

    #[test]
    fn absent_measurement_column_is_not_an_error() {
        let w = window(&[&["Probe ID", "Note"], &["1", "no diameter here"]]);
        let t = normalize(&w).unwrap();
        assert!(t.column(DIAMETER_COLUMN).is_none());
        assert_eq!(t.n_rows(), 1);
    }

    #[test]
    fn absent_key_column_is_an_error() {
        let w = window(&[&["Diameter (µm)", "Note"], &["12.5", "x"]]);
        assert!(matches!(
            normalize(&w),
            Err(AnalyzeError::MissingKeyColumn)
        ));
    }

    #[test]
    fn ragged_rows_pad_with_missing() {
        let w = window(&[
            &["Probe ID", "Note"],
            &["1"],
            &["2", "ok", "extra"],
        ]);
        let t = normalize(&w).unwrap();
        assert_eq!(t.header(), vec!["Probe ID", "Note", "Unnamed_2"]);
        assert_eq!(t.cell(0, "Note"), Some(&CellValue::Missing));
        assert_eq!(t.cell(1, "Unnamed_2"), Some(&CellValue::Text("extra".into())));
    }

    #[test]
    fn normalization_is_idempotent() {
        let w = window(&[
            &["Probe ID", "Diameter (µm)", "User Defined Label 4"],
            &["2", "12.5", "P2"],
            &["1", "bad", "P1"],
        ]);
        let once = normalize(&w).unwrap();
        let twice = normalize(&as_rows(&once)).unwrap();
        assert_eq!(once, twice);
    }
}
