use crate::input::load_input;
use crate::paragraphs;
use crate::tools::failure;
use serde_json::{Value, json};

pub fn call(args: &Value) -> Value {
    let payload = match load_input(args) {
        Ok(payload) => payload,
        Err(err) => return failure(&err, None),
    };

    let extracted = match paragraphs::extract(&payload.bytes, payload.format) {
        Ok(extracted) => extracted,
        Err(err) => return failure(&err, Some(payload.source.as_str())),
    };

    let text = extracted.paragraphs.join("\n");
    json!({
        "content": [{"type": "text", "text": text}],
        "structuredContent": {
            "format": extracted.format.as_str(),
            "paragraphs": extracted.paragraphs,
            "warnings": extracted.warnings
        },
        "isError": false
    })
}
