use crate::catalog::record::ToolRecord;
use crate::error::ToolsheetError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Pretty JSON with four-space indentation. Non-ASCII text is written as-is.
pub fn render_json(records: &[ToolRecord]) -> Result<Vec<u8>, ToolsheetError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Writes through a sibling temp file so a failed run never leaves a
/// truncated output behind.
pub fn write_json(path: &Path, records: &[ToolRecord]) -> Result<u64, ToolsheetError> {
    let bytes = render_json(records)?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.flush()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(bytes.len() as u64)
}
