use crate::catalog::diagnostics::TracingDiagnostics;
use crate::catalog::options::ParseOptions;
use crate::catalog::{ParseOutcome, parse_paragraphs_with_report};
use crate::error::ToolsheetError;
use crate::input::load_input;
use crate::mcp::contracts::MAX_OUTPUT_BYTES;
use crate::output;
use crate::paragraphs;
use crate::tools::failure;
use serde_json::{Value, json};
use std::path::Path;
use tracing::info;

pub fn call(args: &Value) -> Value {
    let payload = match load_input(args) {
        Ok(payload) => payload,
        Err(err) => return failure(&err, None),
    };

    let options = match parse_options(args.get("options")) {
        Ok(options) => options,
        Err(err) => return failure(&err, None),
    };

    let output_path = match parse_output_path(args.get("output_path")) {
        Ok(path) => path,
        Err(err) => return failure(&err, None),
    };

    let extracted = match paragraphs::extract(&payload.bytes, payload.format) {
        Ok(extracted) => extracted,
        Err(err) => return failure(&err, Some(payload.source.as_str())),
    };

    let ParseOutcome { records, report } =
        parse_paragraphs_with_report(&extracted.paragraphs, &options, TracingDiagnostics);
    info!(
        source = %payload.source,
        format = extracted.format.as_str(),
        paragraphs = report.paragraphs,
        tools = report.records,
        dropped = report.dropped_lines,
        "document parsed"
    );

    let tool_count = records.len();
    match output_path {
        Some(path) => match output::write_json(Path::new(&path), &records) {
            Ok(bytes_len) => {
                let uri = format!("file://{path}");
                let name = Path::new(&path)
                    .file_name()
                    .and_then(|value| value.to_str())
                    .unwrap_or("tools_output.json");
                json!({
                    "content": [
                        {
                            "type": "text",
                            "text": format!("Successfully processed {tool_count} tools to {path}")
                        },
                        {
                            "type": "resource_link",
                            "uri": uri,
                            "name": name,
                            "mimeType": "application/json"
                        }
                    ],
                    "structuredContent": {
                        "path": path,
                        "uri": uri,
                        "bytes_len": bytes_len,
                        "tool_count": tool_count,
                        "report": report,
                        "warnings": extracted.warnings
                    },
                    "isError": false
                })
            }
            Err(err) => failure(&err, None),
        },
        None => {
            let rendered = match output::render_json(&records) {
                Ok(rendered) => rendered,
                Err(err) => return failure(&err, None),
            };
            let bytes_len = rendered.len() as u64;
            if bytes_len > MAX_OUTPUT_BYTES {
                return failure(
                    &ToolsheetError::TooLarge {
                        len: bytes_len,
                        max: MAX_OUTPUT_BYTES,
                    },
                    None,
                );
            }
            let names: Vec<&str> = records.iter().map(|tool| tool.tool_name.as_str()).collect();
            let summary = if names.is_empty() {
                "no tools found".to_string()
            } else {
                format!("{tool_count} tools: {}", names.join(", "))
            };
            json!({
                "content": [{"type": "text", "text": summary}],
                "structuredContent": {
                    "format": extracted.format.as_str(),
                    "tools": records,
                    "report": report,
                    "warnings": extracted.warnings
                },
                "isError": false
            })
        }
    }
}

fn parse_options(value: Option<&Value>) -> Result<ParseOptions, ToolsheetError> {
    let Some(value) = value else {
        return Ok(ParseOptions::default());
    };
    serde_json::from_value(value.clone())
        .map_err(|err| ToolsheetError::invalid_input(format!("options are invalid: {err}")))
}

fn parse_output_path(value: Option<&Value>) -> Result<Option<String>, ToolsheetError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let Some(path) = value.as_str() else {
        return Err(ToolsheetError::invalid_input("output_path must be a string"));
    };
    if path.trim().is_empty() {
        return Err(ToolsheetError::invalid_input("output_path must not be empty"));
    }
    Ok(Some(path.to_string()))
}
