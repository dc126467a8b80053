//! Form input normalization.

/// Cleans a raw form field before validation and storage.
///
/// - Line endings are normalized to `\n` (browsers submit `\r\n`)
/// - Surrounding whitespace is trimmed
///
/// Inner whitespace and line breaks are preserved so email bodies keep
/// their layout.
pub fn clean_input(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}
