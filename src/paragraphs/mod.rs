//! Paragraph extraction from source documents.

pub mod docx;
pub mod hwp;

use crate::error::ToolsheetError;
use crate::input::InputFormat;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

#[derive(Debug, Clone)]
pub struct ExtractedParagraphs {
    pub format: InputFormat,
    pub paragraphs: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn extract(bytes: &[u8], format: InputFormat) -> Result<ExtractedParagraphs, ToolsheetError> {
    let resolved = match format {
        InputFormat::Auto => detect_format(bytes)?,
        format => format,
    };
    let paragraphs = match resolved {
        InputFormat::Docx => docx::read_docx(bytes)?,
        InputFormat::Hwp => hwp::read_hwp(bytes)?,
        InputFormat::Hwpx => hwp::read_hwpx(bytes)?,
        InputFormat::Text | InputFormat::Auto => read_text(bytes)?,
    };

    let mut warnings = Vec::new();
    if format == InputFormat::Auto {
        warnings.push(format!("auto format: detected {}", resolved.as_str()));
    }
    if paragraphs.iter().all(|paragraph| paragraph.trim().is_empty()) {
        warnings.push("document has no text paragraphs".to_string());
    }

    Ok(ExtractedParagraphs {
        format: resolved,
        paragraphs,
        warnings,
    })
}

fn detect_format(bytes: &[u8]) -> Result<InputFormat, ToolsheetError> {
    if bytes.starts_with(ZIP_MAGIC) {
        return Ok(if docx::is_docx(bytes) {
            InputFormat::Docx
        } else {
            InputFormat::Hwpx
        });
    }
    if bytes.starts_with(CFB_MAGIC) {
        return Ok(InputFormat::Hwp);
    }
    if std::str::from_utf8(bytes).is_ok() {
        return Ok(InputFormat::Text);
    }
    Err(ToolsheetError::UnsupportedFormat(
        "auto format: input is not docx, hwp, hwpx, or UTF-8 text".to_string(),
    ))
}

fn read_text(bytes: &[u8]) -> Result<Vec<String>, ToolsheetError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| ToolsheetError::parse("text", format!("input is not UTF-8: {err}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    Ok(text.lines().map(str::to_string).collect())
}
