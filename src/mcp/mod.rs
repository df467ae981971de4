use serde_json::json;

pub mod contracts;
pub mod errors;

pub fn tool_definitions() -> Vec<serde_json::Value> {
    vec![
        json!({
            "name": contracts::TOOL_PARSE_DOCUMENT,
            "description": "Parse a tool directory document (docx, hwp, hwpx, or text) into structured tool records.",
            "inputSchema": contracts::parse_document_schema()
        }),
        json!({
            "name": contracts::TOOL_EXTRACT_PARAGRAPHS,
            "description": "List the paragraphs read from a document, in order.",
            "inputSchema": contracts::extract_paragraphs_schema()
        }),
    ]
}
