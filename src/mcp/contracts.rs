use serde_json::json;

pub const TOOL_PARSE_DOCUMENT: &str = "toolsheet.parse_document";
pub const TOOL_EXTRACT_PARAGRAPHS: &str = "toolsheet.extract_paragraphs";

pub const MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;
pub const MAX_OUTPUT_BYTES: u64 = 20 * 1024 * 1024;

const FORMATS: [&str; 5] = ["auto", "docx", "hwp", "hwpx", "text"];

pub fn parse_document_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "path": { "type": "string" },
            "base64": { "type": "string" },
            "format": { "type": "string", "enum": FORMATS },
            "output_path": { "type": "string" },
            "options": {
                "type": "object",
                "properties": {
                    "default_product_type": { "type": "string" },
                    "fallback_category": { "type": "string" },
                    "category_rules": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "keyword": { "type": "string" },
                                "category": { "type": "string" }
                            },
                            "required": ["keyword", "category"]
                        }
                    }
                },
                "additionalProperties": false
            }
        },
        "oneOf": [
            { "required": ["path"] },
            { "required": ["base64"] }
        ],
        "additionalProperties": false
    })
}

pub fn extract_paragraphs_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "path": { "type": "string" },
            "base64": { "type": "string" },
            "format": { "type": "string", "enum": FORMATS }
        },
        "oneOf": [
            { "required": ["path"] },
            { "required": ["base64"] }
        ],
        "additionalProperties": false
    })
}
