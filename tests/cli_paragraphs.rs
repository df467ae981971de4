use hwpers::HwpWriter;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_paragraphs_reads_hwp() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file_path = dir.path().join("sample.hwp");

    let mut writer = HwpWriter::new();
    writer.add_paragraph("Tool Name:")?;
    writer.add_paragraph("한글 도구")?;
    writer.save_to_file(&file_path)?;

    let output = Command::new(env!("CARGO_BIN_EXE_toolsheet"))
        .args([
            "paragraphs",
            "--path",
            file_path.to_string_lossy().as_ref(),
            "--json",
        ])
        .output()?;

    assert!(output.status.success());
    let structured: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(structured["format"], "hwp");
    let paragraphs: Vec<&str> = structured["paragraphs"]
        .as_array()
        .expect("paragraphs array")
        .iter()
        .filter_map(|value| value.as_str())
        .collect();
    assert!(paragraphs.iter().any(|p| p.contains("Tool Name:")));
    assert!(paragraphs.iter().any(|p| p.contains("한글 도구")));
    Ok(())
}

#[test]
fn cli_parse_reads_hwp_records() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file_path = dir.path().join("tools.hwp");

    let mut writer = HwpWriter::new();
    writer.add_paragraph("Tool Name:")?;
    writer.add_paragraph("Hangul Helper")?;
    writer.add_paragraph("Short Description: Image captions")?;
    writer.save_to_file(&file_path)?;

    let output = Command::new(env!("CARGO_BIN_EXE_toolsheet"))
        .args([
            "parse",
            "--path",
            file_path.to_string_lossy().as_ref(),
            "--format",
            "hwp",
            "--json",
        ])
        .output()?;

    assert!(output.status.success());
    let tools: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(tools[0]["Tool Name"], "Hangul Helper");
    assert_eq!(
        tools[0]["Category"],
        serde_json::json!(["AI Image Generation Tool"])
    );
    Ok(())
}
