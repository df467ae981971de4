use std::sync::LazyLock;

use regex::Regex;

static DECORATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_]+").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]\((.*?)\)").unwrap());
static BARE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s>"'\])]+"#).unwrap());
static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://").unwrap());

/// Strips emphasis decoration, collapses `[text](target)` links to their
/// target and trims. Underscores inside bare URLs are kept.
pub fn normalize(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut cursor = 0;
    for url in BARE_URL_RE.find_iter(text) {
        stripped.push_str(&DECORATION_RE.replace_all(&text[cursor..url.start()], ""));
        stripped.push_str(&url.as_str().replace('*', ""));
        cursor = url.end();
    }
    stripped.push_str(&DECORATION_RE.replace_all(&text[cursor..], ""));

    // Replacing a link can expose another one ("[a]([b](c))"), so run to a fixpoint.
    let mut output = stripped;
    while LINK_RE.is_match(&output) {
        output = LINK_RE.replace_all(&output, "$1").into_owned();
    }
    output.trim().to_string()
}

/// Target of the first markup link, else the first bare `http(s)://` URL.
pub fn extract_url(text: &str) -> Option<String> {
    if let Some(captures) = LINK_RE.captures(text) {
        let target = captures.get(1).map(|m| m.as_str()).unwrap_or("");
        if !target.is_empty() {
            return Some(target.to_string());
        }
    }
    BARE_URL_RE
        .find(text)
        .map(|url| url.as_str().to_string())
}

pub fn starts_with_url(text: &str) -> bool {
    SCHEME_RE.is_match(text)
}

/// Repeats extraction until it settles, so the result is itself stable
/// under `extract_url`. Returns the input unchanged when nothing extracts.
pub fn resolve_url(value: &str) -> String {
    let mut current = value.to_string();
    while let Some(next) = extract_url(&current) {
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// A fragment that continues the previous line's URL: no whitespace and a
/// leading path, query or host separator.
pub fn is_url_tail(text: &str) -> bool {
    text.len() >= 2
        && !text.chars().any(char::is_whitespace)
        && text.starts_with(['.', '/', '?', '#', '&', '=', '%'])
        && !starts_with_url(text)
}
