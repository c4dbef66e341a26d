use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use super::AnalyzeError;

// ---------------------------------------------------------------------------
// Encoding detection
// ---------------------------------------------------------------------------

/// Best-guess encoding for an instrument export.
///
/// BOM wins if present; otherwise bytes that validate as UTF-8 are UTF-8,
/// and anything else falls back to windows-1252 (the usual 8-bit encoding
/// for the metrology machines we have seen).
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        UTF_8
    } else {
        WINDOWS_1252
    }
}

/// Decode raw upload bytes using the detected encoding.
///
/// Malformed sequences under the chosen encoding fail the whole file
/// (the caller skips it and continues with the rest of the batch).
pub fn decode(bytes: &[u8]) -> Result<String, AnalyzeError> {
    let encoding = detect(bytes);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(AnalyzeError::Decode {
            encoding: used.name(),
        });
    }
    Ok(text.into_owned())
}
