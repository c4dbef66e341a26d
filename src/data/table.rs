use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the normalized table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.  Numeric coercion turns unparseable
/// entries into `Missing` instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    /// Interpret the value as an `f64` (numeric cells only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            // Missing serializes to an empty cell so exports round-trip.
            CellValue::Missing => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column / DataTable – the normalized measurement table
// ---------------------------------------------------------------------------

/// One named column, row-aligned with every other column of its table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

/// The cleaned measurement table produced by the normalizer.
///
/// Invariants: column names are non-empty, trimmed and unique; all columns
/// hold the same number of values; column order matches the source header
/// (after drops) and row order matches the source until an explicit sort.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    pub columns: Vec<Column>,
}

impl DataTable {
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Look up a column by its exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Ordered column names.
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The cell at (row, column name), if both exist.
    pub fn cell(&self, row: usize, name: &str) -> Option<&CellValue> {
        self.column(name).and_then(|c| c.values.get(row))
    }

    /// Keep only the rows whose index passes the predicate, preserving order.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let kept: Vec<usize> = (0..self.n_rows()).filter(|&i| keep(i)).collect();
        for col in &mut self.columns {
            col.values = kept.iter().map(|&i| col.values[i].clone()).collect();
        }
    }
}
