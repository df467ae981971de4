use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

const DOCUMENT: &str = "\
Tool Name:
Acme
Website Link: [site](https://acme.example)
Logo:
https://cdn.example/acme
.png
Short Description: Image upscaling
Tool Name:
Beta
Screenshots:
https://x.example/1.png
https://x.example/1.png
";

fn call(
    stdin: &mut impl Write,
    stdout: &mut impl BufRead,
    id: i64,
    name: &str,
    arguments: serde_json::Value,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let request = serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    });
    writeln!(stdin, "{}", serde_json::to_string(&request)?)?;
    stdin.flush()?;

    let mut line = String::new();
    stdout.read_line(&mut line)?;
    let response: serde_json::Value = serde_json::from_str(line.trim())?;
    assert_eq!(response.get("id").and_then(|v| v.as_i64()), Some(id));
    Ok(response.get("result").cloned().expect("result present"))
}

#[test]
fn parse_document_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_toolsheet"))
        .args(["serve", "--stdio"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    let encoded = STANDARD.encode(DOCUMENT);
    let result = call(
        &mut stdin,
        &mut stdout,
        3,
        "toolsheet.parse_document",
        serde_json::json!({"base64": encoded, "format": "text"}),
    )?;
    assert_eq!(result.get("isError").and_then(|v| v.as_bool()), Some(false));

    let structured = result.get("structuredContent").expect("structured");
    let tools = structured["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0]["Website Link"], "https://acme.example");
    assert_eq!(tools[0]["Logo"], "https://cdn.example/acme.png");
    assert_eq!(tools[0]["Category"], serde_json::json!(["AI Image Generation Tool"]));
    assert_eq!(tools[1]["Screenshots"], serde_json::json!(["https://x.example/1.png"]));
    assert_eq!(structured["report"]["records"], 2);

    let paragraphs = call(
        &mut stdin,
        &mut stdout,
        4,
        "toolsheet.extract_paragraphs",
        serde_json::json!({"base64": encoded}),
    )?;
    let lines = paragraphs["structuredContent"]["paragraphs"]
        .as_array()
        .expect("paragraphs array");
    assert_eq!(lines[0], "Tool Name:");
    assert_eq!(paragraphs["structuredContent"]["format"], "text");

    let missing = call(
        &mut stdin,
        &mut stdout,
        5,
        "toolsheet.parse_document",
        serde_json::json!({"path": "/nonexistent/toolsheet/input.docx"}),
    )?;
    assert_eq!(missing.get("isError").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(missing["structuredContent"]["error"]["kind"], "not_found");

    let unknown = call(
        &mut stdin,
        &mut stdout,
        6,
        "toolsheet.nope",
        serde_json::json!({}),
    )?;
    assert_eq!(unknown.get("isError").and_then(|v| v.as_bool()), Some(true));

    let _ = child.kill();
    Ok(())
}
