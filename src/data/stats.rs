use super::normalize::KEY_COLUMN;
use super::table::{CellValue, DataTable};

/// Column holding the operator-assigned probe name, shown in rankings.
pub const LABEL_COLUMN: &str = "User Defined Label 4";

// ---------------------------------------------------------------------------
// Sorted view
// ---------------------------------------------------------------------------

/// Row indices sorted ascending by `Probe ID`.
///
/// The sort is stable so rows with equal keys keep their file order, which
/// keeps plot point ordering reproducible across runs.
pub fn sorted_by_key(table: &DataTable) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..table.n_rows()).collect();
    if let Some(key) = table.column(KEY_COLUMN) {
        indices.sort_by(|&a, &b| {
            let ka = key.values[a].as_f64().unwrap_or(f64::NAN);
            let kb = key.values[b].as_f64().unwrap_or(f64::NAN);
            ka.total_cmp(&kb)
        });
    }
    indices
}

/// (probe id, measurement) pairs in key order, for scatter plotting.
/// Rows whose measurement is missing are skipped.
pub fn xy_points(table: &DataTable, measurement: &str) -> Vec<[f64; 2]> {
    let Some(key) = table.column(KEY_COLUMN) else {
        return Vec::new();
    };
    let Some(values) = table.column(measurement) else {
        return Vec::new();
    };
    sorted_by_key(table)
        .into_iter()
        .filter_map(|i| {
            let x = key.values[i].as_f64()?;
            let y = values.values[i].as_f64()?;
            Some([x, y])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Top-N ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDirection {
    Largest,
    Smallest,
}

/// One row of a ranking table, projected to the display columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub probe_id: CellValue,
    pub probe_name: CellValue,
    pub value: f64,
}

/// Top-N rows of a measurement column.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedView {
    pub measurement: String,
    pub direction: RankDirection,
    pub rows: Vec<RankedRow>,
}

/// Rank rows by a measurement column and keep the top `n`.
///
/// Ties keep original row order (stable sort); rows with a missing
/// measurement are excluded.  An absent measurement or label column
/// degrades to an empty ranking / missing labels rather than failing.
pub fn top_n(table: &DataTable, measurement: &str, direction: RankDirection, n: usize) -> RankedView {
    let mut rows = Vec::new();
    if let Some(column) = table.column(measurement) {
        let mut ranked: Vec<(usize, f64)> = column
            .values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_f64().map(|x| (i, x)))
            .collect();
        ranked.sort_by(|a, b| match direction {
            RankDirection::Largest => b.1.total_cmp(&a.1),
            RankDirection::Smallest => a.1.total_cmp(&b.1),
        });
        ranked.truncate(n);

        rows = ranked
            .into_iter()
            .map(|(i, value)| RankedRow {
                probe_id: table
                    .cell(i, KEY_COLUMN)
                    .cloned()
                    .unwrap_or(CellValue::Missing),
                probe_name: table
                    .cell(i, LABEL_COLUMN)
                    .cloned()
                    .unwrap_or(CellValue::Missing),
                value,
            })
            .collect();
    }
    RankedView {
        measurement: measurement.to_string(),
        direction,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalize::DIAMETER_COLUMN;
    use crate::data::table::Column;

    fn table(ids: &[f64], diameters: &[Option<f64>], labels: &[&str]) -> DataTable {
        DataTable {
            columns: vec![
                Column {
                    name: KEY_COLUMN.into(),
                    values: ids.iter().map(|&v| CellValue::Number(v)).collect(),
                },
                Column {
                    name: DIAMETER_COLUMN.into(),
                    values: diameters
                        .iter()
                        .map(|v| v.map_or(CellValue::Missing, CellValue::Number))
                        .collect(),
                },
                Column {
                    name: LABEL_COLUMN.into(),
                    values: labels
                        .iter()
                        .map(|s| CellValue::Text(s.to_string()))
                        .collect(),
                },
            ],
        }
    }

    #[test]
    fn key_sort_is_ascending_and_stable() {
        let t = table(
            &[3.0, 1.0, 2.0, 1.0],
            &[Some(0.0), Some(1.0), Some(2.0), Some(3.0)],
            &["c", "a1", "b", "a2"],
        );
        // The two rows with key 1 keep their original relative order.
        assert_eq!(sorted_by_key(&t), vec![1, 3, 2, 0]);
    }

    #[test]
    fn xy_points_follow_key_order_and_skip_missing() {
        let t = table(
            &[2.0, 1.0, 3.0],
            &[Some(20.0), None, Some(30.0)],
            &["b", "a", "c"],
        );
        assert_eq!(xy_points(&t, DIAMETER_COLUMN), vec![[2.0, 20.0], [3.0, 30.0]]);
    }

    #[test]
    fn top_n_extrema() {
        let diameters = [10.0, 30.0, 5.0, 45.0, 20.0, 15.0, 50.0];
        let ids: Vec<f64> = (1..=7).map(|i| i as f64).collect();
        let labels: Vec<String> = (1..=7).map(|i| format!("P{i}")).collect();
        let t = table(
            &ids,
            &diameters.iter().map(|&d| Some(d)).collect::<Vec<_>>(),
            &labels.iter().map(String::as_str).collect::<Vec<_>>(),
        );

        let largest = top_n(&t, DIAMETER_COLUMN, RankDirection::Largest, 3);
        assert_eq!(
            largest.rows.iter().map(|r| r.value).collect::<Vec<_>>(),
            vec![50.0, 45.0, 30.0]
        );
        let smallest = top_n(&t, DIAMETER_COLUMN, RankDirection::Smallest, 3);
        assert_eq!(
            smallest.rows.iter().map(|r| r.value).collect::<Vec<_>>(),
            vec![5.0, 10.0, 15.0]
        );
        assert_eq!(smallest.rows[0].probe_name, CellValue::Text("P3".into()));
    }

    #[test]
    fn ranking_ties_keep_row_order() {
        let t = table(
            &[1.0, 2.0, 3.0],
            &[Some(9.0), Some(9.0), Some(1.0)],
            &["first", "second", "small"],
        );
        let largest = top_n(&t, DIAMETER_COLUMN, RankDirection::Largest, 2);
        assert_eq!(largest.rows[0].probe_name, CellValue::Text("first".into()));
        assert_eq!(largest.rows[1].probe_name, CellValue::Text("second".into()));
    }

    #[test]
    fn absent_measurement_gives_empty_ranking() {
        let t = table(&[1.0], &[Some(1.0)], &["p"]);
        let view = top_n(&t, "Planarity (µm)", RankDirection::Largest, 5);
        assert!(view.rows.is_empty());
    }
}
