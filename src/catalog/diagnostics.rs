use serde::Serialize;
use tracing::{debug, warn};

use super::record::{Field, Subsection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Text before the first `Tool Name:` marker.
    NoOpenRecord,
    /// Continuation with no field declared yet.
    NoActiveField,
    /// Full Description text before any subsection label.
    NoActiveSubsection,
    /// Continuation for a URL field that already holds a value.
    UrlAlreadySet,
    /// Non-URL line that ended a screenshots list.
    EndedScreenshots,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::NoOpenRecord => "no open record",
            DropReason::NoActiveField => "no active field",
            DropReason::NoActiveSubsection => "no active subsection",
            DropReason::UrlAlreadySet => "url already set",
            DropReason::EndedScreenshots => "ended screenshots list",
        }
    }
}

/// Observable steps of the record assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent<'a> {
    RecordOpened,
    RecordEmitted { name: &'a str },
    UnnamedRecordDiscarded,
    FieldDeclared { field: Field },
    SubsectionDeclared { subsection: Subsection },
    LineDropped { line: &'a str, reason: DropReason },
    /// A line that classified as a field declaration was consumed while a
    /// split URL was being reconstructed.
    LineAbsorbedByUrl { line: &'a str, field: Field },
    UrlCompleted { field: Field, url: &'a str },
    PartialUrlFinalized { field: Field, fragment: &'a str },
}

/// Sink for assembler events.
pub trait Diagnostics {
    fn event(&mut self, event: &ParseEvent<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn event(&mut self, event: &ParseEvent<'_>) {
        match event {
            ParseEvent::RecordOpened => debug!("record opened"),
            ParseEvent::RecordEmitted { name } => debug!(tool = %name, "record emitted"),
            ParseEvent::UnnamedRecordDiscarded => debug!("unnamed record discarded"),
            ParseEvent::FieldDeclared { field } => debug!(field = field.label(), "field"),
            ParseEvent::SubsectionDeclared { subsection } => {
                debug!(subsection = subsection.label(), "subsection")
            }
            ParseEvent::LineDropped { line, reason } => {
                debug!(reason = reason.as_str(), line = %line, "line dropped")
            }
            ParseEvent::LineAbsorbedByUrl { line, field } => {
                warn!(field = field.label(), line = %line, "field line absorbed by split url")
            }
            ParseEvent::UrlCompleted { field, url } => {
                debug!(field = field.label(), url = %url, "url completed")
            }
            ParseEvent::PartialUrlFinalized { field, fragment } => {
                debug!(field = field.label(), fragment = %fragment, "partial url finalized")
            }
        }
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn event(&mut self, event: &ParseEvent<'_>) {
        (**self).event(event);
    }
}

/// Counters collected over one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub paragraphs: usize,
    pub records: usize,
    pub dropped_lines: usize,
    pub absorbed_lines: usize,
    pub unnamed_records: usize,
    pub finalized_urls: usize,
}

impl ParseReport {
    pub fn observe(&mut self, event: &ParseEvent<'_>) {
        match event {
            ParseEvent::RecordEmitted { .. } => self.records += 1,
            ParseEvent::UnnamedRecordDiscarded => self.unnamed_records += 1,
            ParseEvent::LineDropped { .. } => self.dropped_lines += 1,
            ParseEvent::LineAbsorbedByUrl { .. } => self.absorbed_lines += 1,
            ParseEvent::PartialUrlFinalized { .. } => self.finalized_urls += 1,
            _ => {}
        }
    }
}
