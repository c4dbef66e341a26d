use serde::{Deserialize, Serialize};

use super::AnalyzeError;

/// Token that marks the header row itself (appears inside one of its cells).
pub const HEADER_TOKEN: &str = "Probe ID";

/// Section banner that precedes the header row by exactly one line.
pub const BANNER_TOKEN: &str = "Probe Output Table";

// ---------------------------------------------------------------------------
// RawDocument – decoded, untyped rows of one upload
// ---------------------------------------------------------------------------

/// All rows of a decoded instrument export, in file order.  Blank lines are
/// kept as empty rows because the first fully blank row after the header is
/// the end-of-table sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub rows: Vec<Vec<String>>,
}

impl RawDocument {
    /// Split decoded text into rows of cells.
    ///
    /// The exports are free-form: a variable preamble, the data table, then
    /// trailing metadata, so ragged widths are expected and quoted cells may
    /// span lines.  The CSV reader silently skips empty lines, but those are
    /// the end-of-table sentinel, so they are reconstructed as empty rows
    /// from the gaps between record line positions.
    pub fn parse(text: &str) -> Result<Self, AnalyzeError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows: Vec<Vec<String>> = Vec::new();
        // Physical line (1-based) where the next record is expected.
        let mut next_line = 1u64;
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(next_line, |p| p.line());
            for _ in next_line..line {
                rows.push(Vec::new());
            }
            // A record spans one line plus any newlines inside quoted cells.
            let spanned = 1 + record
                .iter()
                .map(|cell| cell.matches('\n').count() as u64)
                .sum::<u64>();
            next_line = line + spanned;
            rows.push(record.iter().map(str::to_string).collect());
        }

        let total_lines = text.lines().count() as u64;
        for _ in next_line..=total_lines {
            rows.push(Vec::new());
        }

        Ok(RawDocument { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sentinel scan
// ---------------------------------------------------------------------------

/// Which structural anchor identifies the table header.
///
/// The instrument firmware has shipped both layouts over time, so the mode
/// is selected explicitly instead of guessed per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentinelMode {
    /// `"Probe ID"` appears inside a cell of the header row itself.
    #[default]
    HeaderToken,
    /// `"Probe Output Table"` appears as a banner; the header is the row
    /// immediately after it.
    SectionBanner,
}

fn row_contains(row: &[String], lowered_token: &str) -> bool {
    row.iter()
        .any(|cell| cell.to_lowercase().contains(lowered_token))
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Index of the header row, scanning top-to-bottom; first match wins.
/// Matching is case-insensitive containment, not equality.
pub fn find_header(doc: &RawDocument, mode: SentinelMode) -> Option<usize> {
    let token = match mode {
        SentinelMode::HeaderToken => HEADER_TOKEN,
        SentinelMode::SectionBanner => BANNER_TOKEN,
    }
    .to_lowercase();

    let anchor = doc.rows.iter().position(|row| row_contains(row, &token))?;
    match mode {
        SentinelMode::HeaderToken => Some(anchor),
        // A banner on the last row has no header after it.
        SentinelMode::SectionBanner => (anchor + 1 < doc.len()).then_some(anchor + 1),
    }
}

/// Exclusive end of the table: the first fully blank row after the header,
/// or the end of the document if there is none.
pub fn find_table_end(doc: &RawDocument, header: usize) -> usize {
    doc.rows[header + 1..]
        .iter()
        .position(|row| is_blank(row))
        .map_or(doc.len(), |offset| header + 1 + offset)
}

/// Locate the table window `[header, end)`.
pub fn locate(doc: &RawDocument, mode: SentinelMode) -> Result<std::ops::Range<usize>, AnalyzeError> {
    let header = find_header(doc, mode).ok_or(AnalyzeError::HeaderNotFound)?;
    Ok(header..find_table_end(doc, header))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> RawDocument {
        RawDocument::parse(&lines.join("\n")).unwrap()
    }

    #[test]
    fn blank_lines_are_kept_as_empty_rows() {
        let d = doc(&["a,b", "", "c"]);
        assert_eq!(d.len(), 3);
        assert!(d.rows[1].is_empty());
    }

    #[test]
    fn quoted_cells_may_span_lines() {
        let d = RawDocument::parse("a,\"line1\nline2\",c\nnext,row\n").unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.rows[0][1], "line1\nline2");
        assert_eq!(d.rows[1], vec!["next", "row"]);
    }

    #[test]
    fn blank_rows_stay_aligned_after_multiline_cells() {
        let text = "meta,\"note line 1\nnote line 2\"\nProbe ID,v\n1,2\n\ntrailer,x\n";
        let d = RawDocument::parse(text).unwrap();
        assert_eq!(d.len(), 5);
        assert!(d.rows[3].is_empty());
        assert_eq!(locate(&d, SentinelMode::HeaderToken).unwrap(), 1..3);
    }

    #[test]
    fn trailing_blank_lines_become_empty_rows() {
        let d = RawDocument::parse("a,b\n\n\n").unwrap();
        assert_eq!(d.len(), 3);
        assert!(d.rows[2].is_empty());
    }

    #[test]
    fn header_token_first_match_wins() {
        let d = doc(&[
            "Report generated by PRVX-1100",
            "Operator,somebody",
            "Probe ID,Diameter (µm)",
            "notes mention Probe ID again",
        ]);
        assert_eq!(find_header(&d, SentinelMode::HeaderToken), Some(2));
    }

    #[test]
    fn header_match_is_case_insensitive_containment() {
        let d = doc(&["x", "  PROBE id ,y"]);
        assert_eq!(find_header(&d, SentinelMode::HeaderToken), Some(1));
    }

    #[test]
    fn banner_mode_selects_the_following_row() {
        let d = doc(&[
            "preamble",
            "=== Probe Output Table ===",
            "Probe ID,Diameter (µm)",
            "1,20.0",
        ]);
        assert_eq!(find_header(&d, SentinelMode::SectionBanner), Some(2));
    }

    #[test]
    fn banner_on_last_row_means_no_header() {
        let d = doc(&["preamble", "Probe Output Table"]);
        assert_eq!(find_header(&d, SentinelMode::SectionBanner), None);
        assert!(matches!(
            locate(&d, SentinelMode::SectionBanner),
            Err(AnalyzeError::HeaderNotFound)
        ));
    }

    #[test]
    fn window_extends_to_document_end_without_blank_row() {
        let d = doc(&["meta", "Probe ID,v", "1,2", "3,4"]);
        assert_eq!(locate(&d, SentinelMode::HeaderToken).unwrap(), 1..4);
    }

    #[test]
    fn window_ends_at_first_blank_row() {
        let d = doc(&["meta", "Probe ID,v", "1,2", "3,4", " , ", "trailer,x"]);
        // Row 4 is whitespace-only cells, which counts as blank.
        assert_eq!(locate(&d, SentinelMode::HeaderToken).unwrap(), 1..4);
    }

    #[test]
    fn missing_sentinel_is_a_hard_failure() {
        let d = doc(&["just,some", "noise"]);
        assert!(matches!(
            locate(&d, SentinelMode::HeaderToken),
            Err(AnalyzeError::HeaderNotFound)
        ));
    }
}
