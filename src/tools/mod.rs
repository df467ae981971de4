use crate::error::ToolsheetError;
use serde_json::json;

pub mod extract_paragraphs;
pub mod parse_document;

pub fn error_result(
    kind: &'static str,
    message: impl Into<String>,
    source: Option<&str>,
) -> serde_json::Value {
    let message = message.into();
    let mut error = json!({
        "kind": kind,
        "message": message,
    });

    if let Some(source) = source
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("source".to_string(), json!(source));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": error},
        "isError": true
    })
}

pub fn failure(err: &ToolsheetError, source: Option<&str>) -> serde_json::Value {
    tracing::debug!(kind = err.kind(), error = %err, "tool call failed");
    error_result(err.kind(), err.to_string(), source)
}
