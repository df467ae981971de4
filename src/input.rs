use crate::error::ToolsheetError;
use crate::mcp::contracts::MAX_INPUT_BYTES;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Auto,
    Docx,
    Hwp,
    Hwpx,
    Text,
}

impl InputFormat {
    pub fn parse(value: Option<&Value>) -> Result<Self, ToolsheetError> {
        let Some(value) = value else {
            return Ok(InputFormat::Auto);
        };
        let Some(value) = value.as_str() else {
            return Err(ToolsheetError::invalid_input("format must be a string"));
        };
        match value {
            "auto" => Ok(InputFormat::Auto),
            "docx" => Ok(InputFormat::Docx),
            "hwp" => Ok(InputFormat::Hwp),
            "hwpx" => Ok(InputFormat::Hwpx),
            "text" => Ok(InputFormat::Text),
            _ => Err(ToolsheetError::UnsupportedFormat(
                "format must be auto, docx, hwp, hwpx, or text".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Auto => "auto",
            InputFormat::Docx => "docx",
            InputFormat::Hwp => "hwp",
            InputFormat::Hwpx => "hwpx",
            InputFormat::Text => "text",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputPayload {
    pub bytes: Vec<u8>,
    pub format: InputFormat,
    pub source: String,
}

pub fn load_input(args: &Value) -> Result<InputPayload, ToolsheetError> {
    let obj = args
        .as_object()
        .ok_or_else(|| ToolsheetError::invalid_input("arguments must be an object"))?;

    let format = InputFormat::parse(obj.get("format"))?;

    match (obj.get("path"), obj.get("base64")) {
        (None, None) => Err(ToolsheetError::invalid_input(
            "either path or base64 is required",
        )),
        (Some(_), Some(_)) => Err(ToolsheetError::invalid_input(
            "path and base64 cannot both be set",
        )),
        (Some(value), None) => {
            let path = value
                .as_str()
                .ok_or_else(|| ToolsheetError::invalid_input("path must be a string"))?;
            load_path(path, format)
        }
        (None, Some(value)) => {
            let encoded = value
                .as_str()
                .ok_or_else(|| ToolsheetError::invalid_input("base64 must be a string"))?;
            load_base64(encoded, format)
        }
    }
}

fn load_path(path: &str, format: InputFormat) -> Result<InputPayload, ToolsheetError> {
    let path_ref = Path::new(path);
    if !path_ref.exists() {
        return Err(ToolsheetError::NotFound(path.to_string()));
    }
    let metadata = fs::metadata(path_ref)
        .map_err(|err| ToolsheetError::invalid_input(format!("failed to stat {path}: {err}")))?;
    if !metadata.is_file() {
        return Err(ToolsheetError::invalid_input("path must be a file"));
    }
    let len = metadata.len();
    if len > MAX_INPUT_BYTES {
        return Err(ToolsheetError::TooLarge {
            len,
            max: MAX_INPUT_BYTES,
        });
    }
    let bytes = fs::read(path_ref)
        .map_err(|_| ToolsheetError::invalid_input("failed to read path contents"))?;
    Ok(InputPayload {
        bytes,
        format,
        source: format!("path:{path}"),
    })
}

fn load_base64(encoded: &str, format: InputFormat) -> Result<InputPayload, ToolsheetError> {
    let bytes = STANDARD
        .decode(encoded.as_bytes())
        .map_err(|_| ToolsheetError::invalid_input("base64 must be valid"))?;
    let len = bytes.len() as u64;
    if len > MAX_INPUT_BYTES {
        return Err(ToolsheetError::TooLarge {
            len,
            max: MAX_INPUT_BYTES,
        });
    }
    Ok(InputPayload {
        bytes,
        format,
        source: "base64".to_string(),
    })
}
