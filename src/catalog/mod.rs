//! Reconstruction of tool records from a loosely formatted paragraph stream.
//!
//! The pipeline is single pass: every paragraph is classified, fed to the
//! [`assemble::Assembler`] state machine, and the emitted records are
//! normalized by [`postprocess::finalize`].

pub mod assemble;
pub mod classify;
pub mod diagnostics;
pub mod normalize;
pub mod options;
pub mod postprocess;
pub mod record;

use assemble::Assembler;
use diagnostics::{Diagnostics, ParseReport, TracingDiagnostics};
use options::ParseOptions;
use record::ToolRecord;

#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<ToolRecord>,
    pub report: ParseReport,
}

pub fn parse_paragraphs<I, S>(paragraphs: I, options: &ParseOptions) -> Vec<ToolRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_paragraphs_with_report(paragraphs, options, TracingDiagnostics).records
}

pub fn parse_paragraphs_with_report<I, S, D>(
    paragraphs: I,
    options: &ParseOptions,
    sink: D,
) -> ParseOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    D: Diagnostics,
{
    let mut assembler = Assembler::new(sink);
    for paragraph in paragraphs {
        assembler.push_line(paragraph.as_ref());
    }
    let (mut records, report) = assembler.finish();
    postprocess::finalize_all(&mut records, options);
    ParseOutcome { records, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(lines: &[&str]) -> Vec<ToolRecord> {
        parse_paragraphs(lines.iter().copied(), &ParseOptions::default())
    }

    #[test]
    fn scenario_e_category_from_short_description() {
        let records = parse(&[
            "Tool Name:",
            "Quill",
            "Short Description: Writing assistant for long-form posts",
        ]);
        assert_eq!(records[0].category, ["AI Writing Assistant"]);
        assert_eq!(records[0].product_type, "AI Tool");
    }

    #[test]
    fn scenario_b_screenshots_are_deduplicated() {
        let records = parse(&[
            "### Tool Name:",
            "Widget",
            "Screenshots:",
            "https://x.example/1.png",
            "https://x.example/2.png",
            "https://x.example/1.png",
            "Short Description: A widget.",
        ]);
        let mut screenshots = records[0].screenshots.clone();
        screenshots.sort();
        assert_eq!(screenshots, ["https://x.example/1.png", "https://x.example/2.png"]);
        assert_eq!(records[0].short_description, "A widget.");
    }

    #[test]
    fn full_document_round_trip() {
        let records = parse(&[
            "# AI Tools",
            "### Tool Name:",
            "**Acme Writer**",
            "### Website Link: [Acme](https://acme.example)",
            "### Logo:",
            "https://cdn.example/acme_logo.png",
            "### Short Description: Drafts blog posts.",
            "### Full Description:",
            "#### Introduction:",
            "Acme helps you write.",
            "#### Key Features:",
            "Outlines, drafts, edits.",
            "#### Why Choose Acme?:",
            "It is simple.",
            "#### Conclusion: Write faster.",
            "### Slug: acme-writer",
            "### Meta Title: Acme Writer",
            "### Meta Description: Write faster with Acme.",
            "### Category: Writing, Productivity",
            "### Product Type: SaaS",
            "### Tags: writing, blog, writing",
        ]);
        assert_eq!(records.len(), 1);
        let tool = &records[0];
        assert_eq!(tool.tool_name, "Acme Writer");
        assert_eq!(tool.website_link, "https://acme.example");
        assert_eq!(tool.logo, "https://cdn.example/acme_logo.png");
        assert_eq!(tool.full_description.introduction, "Acme helps you write.");
        assert_eq!(tool.full_description.key_features, "Outlines, drafts, edits.");
        assert_eq!(tool.full_description.why_choose, "It is simple.");
        assert_eq!(tool.full_description.conclusion, "Write faster.");
        assert_eq!(tool.category, ["Writing", "Productivity"]);
        assert_eq!(tool.product_type, "SaaS");
        assert_eq!(tool.tags, ["writing", "blog"]);
    }

    #[test]
    fn rendered_lines_reparse_to_same_scalars() {
        let records = parse(&[
            "Tool Name:",
            "Acme",
            "Website Link: https://acme.example/a",
            "Short Description: Plans your week.",
            "Slug: acme",
            "Meta Title: Acme planner",
            "Product Type: App",
        ]);
        let lines = records[0].to_lines();
        let reparsed = parse_paragraphs(&lines, &ParseOptions::default());
        assert_eq!(reparsed, records);
    }

    fn word() -> impl Strategy<Value = String> {
        "[A-Za-z]{1,8}"
    }

    fn document_line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Tool Name:".to_string()),
            word(),
            word().prop_map(|w| format!("Tags: {w}, ,{w}")),
            word().prop_map(|w| format!("Category: {w}")),
            word().prop_map(|w| format!("Website Link: https://{w}.example")),
            word().prop_map(|w| format!("Screenshots: {w}")),
            word().prop_map(|w| format!("https://{w}.example/{w}.png")),
            word().prop_map(|w| format!(".{w}/path")),
            Just("Full Description:".to_string()),
            word().prop_map(|w| format!("#### Introduction: **{w}**")),
        ]
    }

    proptest! {
        #[test]
        fn emitted_records_satisfy_invariants(
            lines in proptest::collection::vec(document_line(), 0..40)
        ) {
            let options = ParseOptions::default();
            let records = parse_paragraphs(&lines, &options);
            for record in &records {
                prop_assert!(!record.tool_name.is_empty());
                prop_assert!(!record.product_type.is_empty());
                prop_assert!(!record.category.is_empty());
                for list in [&record.category, &record.tags, &record.screenshots] {
                    prop_assert!(list.iter().all(|entry| !entry.trim().is_empty()));
                }
            }

            let mut again = records.clone();
            postprocess::finalize_all(&mut again, &options);
            prop_assert_eq!(again, records);
        }

        #[test]
        fn normalize_is_idempotent(text in "[a-z*_\\[\\]() :/.]{0,30}") {
            let once = normalize::normalize(&text);
            prop_assert_eq!(normalize::normalize(&once), once);
        }
    }
}
