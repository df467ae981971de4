use crate::error::ToolsheetError;
use hwpers::{HwpDocument, HwpError, HwpReader, HwpxReader};

pub fn read_hwp(bytes: &[u8]) -> Result<Vec<String>, ToolsheetError> {
    HwpReader::from_bytes(bytes)
        .map(|document| collect_paragraphs(&document))
        .map_err(|error| map_hwp_error(error, "hwp"))
}

pub fn read_hwpx(bytes: &[u8]) -> Result<Vec<String>, ToolsheetError> {
    HwpxReader::from_bytes(bytes)
        .map(|document| collect_paragraphs(&document))
        .map_err(|error| map_hwp_error(error, "hwpx"))
}

fn collect_paragraphs(document: &HwpDocument) -> Vec<String> {
    document
        .sections()
        .flat_map(|section| section.paragraphs.iter())
        .map(|paragraph| {
            paragraph
                .text
                .as_ref()
                .map(|para_text| para_text.content.clone())
                .unwrap_or_default()
        })
        .collect()
}

fn map_hwp_error(error: HwpError, format: &'static str) -> ToolsheetError {
    match error {
        HwpError::InvalidInput(message) => ToolsheetError::invalid_input(message),
        HwpError::Io(err) => ToolsheetError::invalid_input(err.to_string()),
        HwpError::UnsupportedVersion(message)
        | HwpError::InvalidFormat(message)
        | HwpError::Cfb(message)
        | HwpError::CompressionError(message)
        | HwpError::ParseError(message)
        | HwpError::EncodingError(message)
        | HwpError::NotFound(message) => ToolsheetError::parse(format, message),
    }
}
