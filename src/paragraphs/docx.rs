use crate::error::ToolsheetError;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use zip::ZipArchive;
use zip::result::ZipError;

const DOCUMENT_PART: &str = "word/document.xml";

/// True when the zip container carries a WordprocessingML main part.
pub fn is_docx(bytes: &[u8]) -> bool {
    ZipArchive::new(Cursor::new(bytes))
        .map(|mut archive| {
            let found = archive.by_name(DOCUMENT_PART).is_ok();
            found
        })
        .unwrap_or(false)
}

/// Body paragraphs of a .docx in document order. Paragraphs inside tables
/// are skipped; tabs and line breaks inside a paragraph become spaces.
pub fn read_docx(bytes: &[u8]) -> Result<Vec<String>, ToolsheetError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|err| ToolsheetError::parse("docx", err))?;
    let mut xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut xml)
                .map_err(|err| ToolsheetError::parse("docx", err))?;
        }
        Err(ZipError::FileNotFound) => {
            return Err(ToolsheetError::parse(
                "docx",
                format!("missing {DOCUMENT_PART}"),
            ));
        }
        Err(err) => return Err(ToolsheetError::parse("docx", err)),
    }
    paragraphs_from_xml(&xml)
}

fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, ToolsheetError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut table_depth: usize = 0;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"p" if table_depth == 0 => current = Some(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"p" if table_depth == 0 => paragraphs.push(String::new()),
                b"tab" | b"br" | b"cr" => {
                    if let Some(text) = current.as_mut() {
                        text.push(' ');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                if let Some(text) = current.as_mut() {
                    let unescaped = e.unescape().map_err(|err| ToolsheetError::parse("docx", err))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" if table_depth == 0 => {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(ToolsheetError::parse("docx", err)),
            _ => {}
        }
        buf.clear();
    }
    Ok(paragraphs)
}
