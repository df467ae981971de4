use std::mem;

use super::classify::{LineKind, classify};
use super::diagnostics::{Diagnostics, DropReason, ParseEvent, ParseReport};
use super::normalize::{extract_url, is_url_tail, normalize, starts_with_url};
use super::record::{Field, Slot, Subsection, ToolRecord};

/// Where the next line of the open record goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    /// The line after a bare `Tool Name:` marker is the name.
    ExpectingName,
    Unfocused,
    Field(Field),
    Screenshots,
    Description(Option<Subsection>),
    /// A URL split across paragraphs, waiting for the rest.
    PartialUrl {
        field: Field,
        fragment: String,
        in_screenshots: bool,
    },
    /// A URL was just stored; a following `.example/path` style line extends it.
    AfterUrl { field: Field, in_screenshots: bool },
}

impl Cursor {
    fn resume(field: Field, in_screenshots: bool) -> Self {
        if in_screenshots {
            Cursor::Screenshots
        } else {
            Cursor::Field(field)
        }
    }
}

struct Tracker<D> {
    report: ParseReport,
    sink: D,
}

impl<D: Diagnostics> Tracker<D> {
    fn emit(&mut self, event: ParseEvent<'_>) {
        self.report.observe(&event);
        self.sink.event(&event);
    }
}

struct OpenRecord {
    record: ToolRecord,
    cursor: Cursor,
}

/// Single-pass state machine turning a paragraph stream into raw records.
pub struct Assembler<D: Diagnostics> {
    open: Option<OpenRecord>,
    records: Vec<ToolRecord>,
    tracker: Tracker<D>,
}

impl<D: Diagnostics> Assembler<D> {
    pub fn new(sink: D) -> Self {
        Self {
            open: None,
            records: Vec::new(),
            tracker: Tracker {
                report: ParseReport::default(),
                sink,
            },
        }
    }

    pub fn push_line(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }
        self.tracker.report.paragraphs += 1;

        let in_description = matches!(
            self.open.as_ref().map(|open| &open.cursor),
            Some(Cursor::Description(_))
        );
        let kind = classify(line, in_description);

        if kind == LineKind::NewRecord {
            self.close_open();
            self.tracker.emit(ParseEvent::RecordOpened);
            self.open = Some(OpenRecord {
                record: ToolRecord::default(),
                cursor: Cursor::ExpectingName,
            });
            return;
        }

        let Some(open) = self.open.as_mut() else {
            self.tracker.emit(ParseEvent::LineDropped {
                line,
                reason: DropReason::NoOpenRecord,
            });
            return;
        };
        open.apply(line, kind, &mut self.tracker);
    }

    /// Closes the last record and returns everything emitted.
    pub fn finish(mut self) -> (Vec<ToolRecord>, ParseReport) {
        self.close_open();
        (self.records, self.tracker.report)
    }

    fn close_open(&mut self) {
        let Some(mut open) = self.open.take() else {
            return;
        };
        if open.record.tool_name.is_empty() {
            self.tracker.emit(ParseEvent::UnnamedRecordDiscarded);
            return;
        }
        if let Cursor::PartialUrl {
            field, fragment, ..
        } = mem::replace(&mut open.cursor, Cursor::Unfocused)
        {
            self.tracker.emit(ParseEvent::PartialUrlFinalized {
                field,
                fragment: &fragment,
            });
            open.record.commit_url(field, fragment);
        }
        self.tracker.emit(ParseEvent::RecordEmitted {
            name: &open.record.tool_name,
        });
        self.records.push(open.record);
    }
}

impl OpenRecord {
    fn apply<D: Diagnostics>(&mut self, line: &str, kind: LineKind, tracker: &mut Tracker<D>) {
        match mem::replace(&mut self.cursor, Cursor::Unfocused) {
            Cursor::ExpectingName => {
                self.record.tool_name = normalize(line);
            }
            Cursor::PartialUrl {
                field,
                fragment,
                in_screenshots,
            } => self.continue_partial_url(line, &kind, field, fragment, in_screenshots, tracker),
            Cursor::AfterUrl {
                field,
                in_screenshots,
            } => {
                if matches!(kind, LineKind::Continuation(_)) && is_url_tail(line) {
                    self.extend_url(field, line, tracker);
                    self.cursor = Cursor::AfterUrl {
                        field,
                        in_screenshots,
                    };
                } else {
                    self.cursor = Cursor::resume(field, in_screenshots);
                    self.dispatch(line, kind, tracker);
                }
            }
            cursor => {
                self.cursor = cursor;
                self.dispatch(line, kind, tracker);
            }
        }
    }

    fn dispatch<D: Diagnostics>(&mut self, line: &str, kind: LineKind, tracker: &mut Tracker<D>) {
        match kind {
            LineKind::NewRecord => {}
            LineKind::Field {
                field,
                value,
                fallback,
            } => self.declare(line, field, value, fallback, tracker),
            LineKind::Subsection { subsection, value } => {
                tracker.emit(ParseEvent::SubsectionDeclared { subsection });
                *self.record.full_description.get_mut(subsection) = value;
                self.cursor = Cursor::Description(Some(subsection));
            }
            LineKind::Continuation(text) => self.continue_line(line, text, tracker),
        }
    }

    fn declare<D: Diagnostics>(
        &mut self,
        line: &str,
        field: Field,
        value: Option<String>,
        fallback: bool,
        tracker: &mut Tracker<D>,
    ) {
        tracker.emit(ParseEvent::FieldDeclared { field });
        self.cursor = match field {
            Field::Screenshots => Cursor::Screenshots,
            Field::FullDescription => Cursor::Description(None),
            field => Cursor::Field(field),
        };
        let Some(value) = value else {
            return;
        };

        if field.is_url() {
            let in_screenshots = field == Field::Screenshots;
            match extract_url(&value) {
                Some(url) => {
                    // The generic declaration replaces the list; the prefix rule appends.
                    if in_screenshots && !fallback {
                        self.record.screenshots.clear();
                    }
                    tracker.emit(ParseEvent::UrlCompleted { field, url: &url });
                    self.record.commit_url(field, url);
                    self.cursor = Cursor::AfterUrl {
                        field,
                        in_screenshots,
                    };
                }
                None => {
                    let fragment = normalize(&value);
                    if !fragment.is_empty() {
                        self.cursor = Cursor::PartialUrl {
                            field,
                            fragment,
                            in_screenshots,
                        };
                    }
                }
            }
            return;
        }

        match self.record.slot_mut(field) {
            Slot::List(list) => *list = split_tokens(&value),
            Slot::Text(text) => *text = value,
            Slot::Description(_) => tracker.emit(ParseEvent::LineDropped {
                line,
                reason: DropReason::NoActiveSubsection,
            }),
        }
    }

    fn continue_line<D: Diagnostics>(&mut self, line: &str, text: String, tracker: &mut Tracker<D>) {
        match self.cursor {
            Cursor::Screenshots => {
                if let Some(url) = extract_url(&text) {
                    tracker.emit(ParseEvent::UrlCompleted {
                        field: Field::Screenshots,
                        url: &url,
                    });
                    self.record.screenshots.push(url);
                    self.cursor = Cursor::AfterUrl {
                        field: Field::Screenshots,
                        in_screenshots: true,
                    };
                } else if starts_with_url(&text) {
                    self.cursor = Cursor::PartialUrl {
                        field: Field::Screenshots,
                        fragment: text,
                        in_screenshots: true,
                    };
                } else {
                    // Leaves list mode; the line is retried as a plain continuation.
                    self.cursor = Cursor::Field(Field::Screenshots);
                    if self.record.screenshots.is_empty() {
                        self.continue_field(Field::Screenshots, line, text, tracker);
                    } else {
                        tracker.emit(ParseEvent::LineDropped {
                            line,
                            reason: DropReason::EndedScreenshots,
                        });
                    }
                }
            }
            Cursor::Description(Some(subsection)) => {
                append_text(self.record.full_description.get_mut(subsection), &text);
            }
            Cursor::Description(None) => tracker.emit(ParseEvent::LineDropped {
                line,
                reason: DropReason::NoActiveSubsection,
            }),
            Cursor::Field(field) => self.continue_field(field, line, text, tracker),
            _ => tracker.emit(ParseEvent::LineDropped {
                line,
                reason: DropReason::NoActiveField,
            }),
        }
    }

    fn continue_field<D: Diagnostics>(
        &mut self,
        field: Field,
        line: &str,
        text: String,
        tracker: &mut Tracker<D>,
    ) {
        if field.is_url() {
            if !self.record.is_empty(field) {
                tracker.emit(ParseEvent::LineDropped {
                    line,
                    reason: DropReason::UrlAlreadySet,
                });
                return;
            }
            match extract_url(&text) {
                Some(url) => {
                    tracker.emit(ParseEvent::UrlCompleted { field, url: &url });
                    self.record.commit_url(field, url);
                    self.cursor = Cursor::AfterUrl {
                        field,
                        in_screenshots: false,
                    };
                }
                None => {
                    self.cursor = Cursor::PartialUrl {
                        field,
                        fragment: text,
                        in_screenshots: false,
                    };
                }
            }
            return;
        }

        match self.record.slot_mut(field) {
            Slot::List(list) => list.extend(split_tokens(&text)),
            Slot::Text(target) => append_text(target, &text),
            Slot::Description(_) => {}
        }
    }

    fn continue_partial_url<D: Diagnostics>(
        &mut self,
        line: &str,
        kind: &LineKind,
        field: Field,
        fragment: String,
        in_screenshots: bool,
        tracker: &mut Tracker<D>,
    ) {
        if matches!(kind, LineKind::Field { .. } | LineKind::Subsection { .. }) {
            tracker.emit(ParseEvent::LineAbsorbedByUrl { line, field });
        }

        let cleaned = normalize(line);
        if starts_with_url(line) {
            tracker.emit(ParseEvent::UrlCompleted {
                field,
                url: &fragment,
            });
            self.record.commit_url(field, fragment);
            let next = extract_url(&cleaned).unwrap_or(cleaned);
            self.cursor = Cursor::PartialUrl {
                field,
                fragment: next,
                in_screenshots,
            };
            return;
        }

        let joined = if fragment.ends_with("://") || is_url_tail(line) {
            format!("{fragment}{cleaned}")
        } else {
            format!("{fragment} {cleaned}")
        };
        match extract_url(&joined) {
            Some(url) => {
                tracker.emit(ParseEvent::UrlCompleted { field, url: &url });
                self.record.commit_url(field, url);
                self.cursor = Cursor::AfterUrl {
                    field,
                    in_screenshots,
                };
            }
            None => {
                self.cursor = Cursor::PartialUrl {
                    field,
                    fragment: joined,
                    in_screenshots,
                };
            }
        }
    }

    fn extend_url<D: Diagnostics>(&mut self, field: Field, tail: &str, tracker: &mut Tracker<D>) {
        let target = match self.record.slot_mut(field) {
            Slot::Text(text) => text,
            Slot::List(list) => match list.last_mut() {
                Some(last) => last,
                None => return,
            },
            Slot::Description(_) => return,
        };
        let joined = format!("{target}{tail}");
        *target = extract_url(&joined).unwrap_or(joined);
        tracker.emit(ParseEvent::UrlCompleted {
            field,
            url: target.as_str(),
        });
    }
}

fn split_tokens(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn append_text(target: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Diagnostics for Recorder {
        fn event(&mut self, event: &ParseEvent<'_>) {
            self.0.push(format!("{event:?}"));
        }
    }

    fn assemble(lines: &[&str]) -> (Vec<ToolRecord>, ParseReport) {
        let mut assembler = Assembler::new(Recorder::default());
        for line in lines {
            assembler.push_line(line);
        }
        assembler.finish()
    }

    #[test]
    fn scenario_a_name_and_inline_url() {
        let (records, report) = assemble(&[
            "Tool Name:",
            "Acme",
            "Website Link: https://acme.example/a",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tool_name, "Acme");
        assert_eq!(records[0].website_link, "https://acme.example/a");
        assert_eq!(report.records, 1);
        assert_eq!(report.paragraphs, 3);
    }

    #[test]
    fn scenario_b_screenshot_list_then_field() {
        let (records, _) = assemble(&[
            "### Tool Name:",
            "Widget",
            "Screenshots:",
            "https://x.example/1.png",
            "https://x.example/2.png",
            "Short Description: A widget.",
        ]);
        let record = &records[0];
        assert_eq!(record.tool_name, "Widget");
        assert!(record.screenshots.contains(&"https://x.example/1.png".to_string()));
        assert!(record.screenshots.contains(&"https://x.example/2.png".to_string()));
        assert_eq!(record.screenshots.len(), 2);
        assert_eq!(record.short_description, "A widget.");
    }

    #[test]
    fn scenario_c_url_split_across_lines() {
        let (records, _) = assemble(&[
            "Tool Name:",
            "Acme",
            "Website Link: https://acme",
            ".example/path",
        ]);
        assert_eq!(records[0].website_link, "https://acme.example/path");
    }

    #[test]
    fn scenario_d_unnamed_record_is_dropped() {
        let (records, report) = assemble(&["Tool Name:", "Tool Name:", "Beta"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tool_name, "Beta");
        assert_eq!(report.unnamed_records, 1);

        let (records, _) = assemble(&["Tool Name:", "Alpha", "Tool Name:", "Beta"]);
        let names: Vec<&str> = records.iter().map(|r| r.tool_name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Beta"]);
    }

    #[test]
    fn text_before_first_marker_is_dropped() {
        let (records, report) = assemble(&["AI Tools Directory", "", "Tool Name:", "Acme"]);
        assert_eq!(records.len(), 1);
        assert_eq!(report.dropped_lines, 1);
        assert_eq!(report.paragraphs, 3);
    }

    #[test]
    fn inline_tool_name_renames_open_record() {
        let (records, _) = assemble(&[
            "Tool Name:",
            "Acme",
            "Slug: acme",
            "Tool Name: Renamed",
            "Tags: x",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tool_name, "Renamed");
        assert_eq!(records[0].slug, "acme");
        assert_eq!(records[0].tags, ["x"]);
    }

    #[test]
    fn inline_tool_name_without_open_record_is_dropped() {
        let (records, report) = assemble(&["Tool Name: Orphan", "Slug: x"]);
        assert!(records.is_empty());
        assert_eq!(report.dropped_lines, 2);
    }

    #[test]
    fn inline_values_are_assigned_verbatim() {
        let (records, _) = assemble(&[
            "Tool Name:",
            "Acme",
            "Slug: ai_writer_pro",
            "Tags: snake_case, c++",
            "Meta Title: **Best** AI",
        ]);
        assert_eq!(records[0].slug, "ai_writer_pro");
        assert_eq!(records[0].tags, ["snake_case", "c++"]);
        assert_eq!(records[0].meta_title, "**Best** AI");
    }

    #[test]
    fn scalar_values_wrap_across_paragraphs() {
        let (records, _) = assemble(&[
            "Tool Name:",
            "Acme",
            "Short Description:",
            "First part,",
            "**second** part.",
        ]);
        assert_eq!(records[0].short_description, "First part, second part.");
    }

    #[test]
    fn list_fields_split_and_accumulate() {
        let (records, _) = assemble(&[
            "Tool Name:",
            "Acme",
            "Tags: alpha, beta",
            "gamma, , delta",
            "Category: Writing",
            "Category: Productivity, Notes",
        ]);
        assert_eq!(records[0].tags, ["alpha", "beta", "gamma", "delta"]);
        assert_eq!(records[0].category, ["Productivity", "Notes"]);
    }

    #[test]
    fn full_description_subsections() {
        let (records, report) = assemble(&[
            "Tool Name:",
            "Acme",
            "Full Description:",
            "Orphan text before any heading",
            "#### Introduction: Hello",
            "world",
            "Key Features:",
            "- fast",
            "Introduction: again",
            "Slug: acme",
        ]);
        let description = &records[0].full_description;
        assert_eq!(description.introduction, "again");
        assert_eq!(description.key_features, "- fast");
        assert_eq!(records[0].slug, "acme");
        assert_eq!(report.dropped_lines, 1);
    }

    #[test]
    fn partial_url_joins_with_next_line() {
        let (records, _) = assemble(&[
            "Tool Name:",
            "Acme",
            "Logo: [Acme logo]",
            "(https://cdn.example/logo_v2.png)",
        ]);
        assert_eq!(records[0].logo, "https://cdn.example/logo_v2.png");
    }

    #[test]
    fn partial_url_is_finalized_at_end_of_input() {
        let (records, report) = assemble(&["Tool Name:", "Acme", "Website Link: acme.example"]);
        assert_eq!(records[0].website_link, "acme.example");
        assert_eq!(report.finalized_urls, 1);
    }

    #[test]
    fn scheme_line_commits_pending_fragment() {
        let (records, _) = assemble(&[
            "Tool Name:",
            "Acme",
            "Website Link: acme",
            "https://acme.example",
        ]);
        assert_eq!(records[0].website_link, "https://acme.example");
    }

    #[test]
    fn pending_url_absorbs_field_lines() {
        let mut recorder = Recorder::default();
        let mut assembler = Assembler::new(&mut recorder);
        for line in ["Tool Name:", "Acme", "Website Link: acme", "Slug: acme"] {
            assembler.push_line(line);
        }
        let (records, report) = assembler.finish();
        assert_eq!(records[0].website_link, "acme Slug: acme");
        assert!(records[0].slug.is_empty());
        assert_eq!(report.absorbed_lines, 1);
        assert!(recorder.0.iter().any(|event| event.starts_with("LineAbsorbedByUrl")));
    }

    #[test]
    fn non_url_line_ends_screenshot_list() {
        let (records, report) = assemble(&[
            "Tool Name:",
            "Acme",
            "Screenshots:",
            "[Home](https://x.example/home.png)",
            "That is all.",
            "https://x.example/late.png",
        ]);
        assert_eq!(records[0].screenshots, ["https://x.example/home.png"]);
        assert_eq!(report.dropped_lines, 2);
    }

    #[test]
    fn repeated_screenshot_declaration_replaces_list() {
        let (records, _) = assemble(&[
            "Tool Name:",
            "Acme",
            "Screenshots: https://x.example/1.png",
            "Screenshots: https://x.example/2.png",
        ]);
        assert_eq!(records[0].screenshots, ["https://x.example/2.png"]);
    }
}
