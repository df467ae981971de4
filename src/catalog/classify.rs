use std::sync::LazyLock;

use regex::Regex;

use super::normalize::normalize;
use super::record::{Field, Subsection};

static NEW_RECORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:###\s*)?tool name\s*:\s*$").unwrap());
static FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:#{2,3}\s*)?(.*?)\s*:\s*(.*)$").unwrap());
static SUBSECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:#{1,4}\s*)?(.*?)\s*:\s*(.*)$").unwrap());

/// What a single paragraph means to the record assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A bare `Tool Name:` marker. `Tool Name: X` is a field declaration.
    NewRecord,
    /// Known field label. `value` is the trimmed raw text after the colon,
    /// absent when it is empty or pure decoration.
    /// `fallback` marks the `logo:` / `screenshots:` prefix rule.
    Field {
        field: Field,
        value: Option<String>,
        fallback: bool,
    },
    Subsection {
        subsection: Subsection,
        value: String,
    },
    Continuation(String),
}

/// Classifies a trimmed, non-empty line. Subsection labels are only looked
/// for when `in_description` is set.
pub fn classify(line: &str, in_description: bool) -> LineKind {
    let cleaned = normalize(line);

    if NEW_RECORD_RE.is_match(&cleaned) {
        return LineKind::NewRecord;
    }

    if let Some((field, value)) = match_field(line) {
        return LineKind::Field {
            field,
            value,
            fallback: false,
        };
    }

    if let Some((field, value)) = match_prefixed_field(line, &cleaned) {
        return LineKind::Field {
            field,
            value,
            fallback: true,
        };
    }

    if in_description && let Some((subsection, value)) = match_subsection(line) {
        return LineKind::Subsection { subsection, value };
    }

    LineKind::Continuation(cleaned)
}

fn match_field(line: &str) -> Option<(Field, Option<String>)> {
    let captures = FIELD_RE.captures(line)?;
    let label = normalize(captures.get(1)?.as_str());
    let field = Field::from_label(&label)?;
    let value = captures
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|value| !normalize(value).is_empty())
        .map(str::to_string);
    Some((field, value))
}

// Labels wrapped in decoration the generic pattern does not cover.
fn match_prefixed_field(line: &str, cleaned: &str) -> Option<(Field, Option<String>)> {
    let lowered = line.to_lowercase();
    let field = if lowered.starts_with("logo:") {
        Field::Logo
    } else if lowered.starts_with("screenshots:") {
        Field::Screenshots
    } else {
        return None;
    };
    let value = cleaned
        .split_once(':')
        .map(|(_, rest)| rest.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    Some((field, value))
}

fn match_subsection(line: &str) -> Option<(Subsection, String)> {
    let captures = SUBSECTION_RE.captures(line)?;
    let label = normalize(captures.get(1)?.as_str());
    let subsection = Subsection::from_label_prefix(&label)?;
    let value = captures
        .get(2)
        .map(|m| normalize(m.as_str()))
        .unwrap_or_default();
    Some((subsection, value))
}
