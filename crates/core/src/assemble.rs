//! Record assembler: folds the record stream into individuals and families.
//!
//! The cursor is an explicit state value. A level-0 `INDI` or `FAM` line
//! flushes whatever is open and opens a new draft; level-1 lines fill the
//! open draft; level-2 `DATE` / `PLAC` lines fill the current event.
//!
//! The current-event slot is deliberately sticky: it is only replaced by a
//! later `BIRT` / `DEAT` / `MARR` or cleared when the record is flushed, so a
//! stray level-2 date after some other level-1 tag still lands on the last
//! event that was opened.

use std::collections::HashSet;

use crate::ast::{tags, RawDocument, RawEvent, RawFamilyUnit, RawIndividual, Sex};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::lexer::{Record, Scanned};
use crate::options::Strictness;

/// Which event on the open draft level-2 details go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSlot {
    Birth,
    Death,
    Marriage,
}

/// The record currently being assembled.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cursor {
    #[default]
    NoOpenRecord,
    IndividualOpen(RawIndividual),
    FamilyOpen(RawFamilyUnit),
}

/// One-shot accumulator for a single document.
#[derive(Debug)]
pub struct Assembler {
    cursor: Cursor,
    current_event: Option<EventSlot>,
    document: RawDocument,
    seen_pointers: HashSet<String>,
    sink: DiagnosticSink,
}

impl Assembler {
    pub fn new(strictness: Strictness) -> Self {
        Assembler {
            cursor: Cursor::NoOpenRecord,
            current_event: None,
            document: RawDocument::default(),
            seen_pointers: HashSet::new(),
            sink: DiagnosticSink::new(strictness),
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn current_event(&self) -> Option<EventSlot> {
        self.current_event
    }

    /// Feed one scanner item; malformed lines only produce a diagnostic.
    pub fn feed_scanned(&mut self, scanned: Scanned<'_>) {
        match scanned {
            Scanned::Record(record) => self.feed(record),
            Scanned::Malformed { line, text } => self.sink.report(
                DiagnosticKind::MalformedLine,
                Some(line),
                format!("skipped malformed line '{}'", text),
            ),
        }
    }

    pub fn feed(&mut self, record: Record<'_>) {
        match record.level {
            0 => self.top_level(record),
            1 => self.record_field(record),
            2 => self.event_detail(record),
            _ => {}
        }
    }

    /// Flush the open draft and return everything assembled so far.
    pub fn finish(mut self) -> (RawDocument, DiagnosticSink) {
        self.flush();
        (self.document, self.sink)
    }

    fn flush(&mut self) {
        self.current_event = None;
        match std::mem::take(&mut self.cursor) {
            Cursor::NoOpenRecord => {}
            Cursor::IndividualOpen(individual) => self.document.individuals.push(individual),
            Cursor::FamilyOpen(family) => self.document.families.push(family),
        }
    }

    fn top_level(&mut self, record: Record<'_>) {
        self.flush();
        match record.tag {
            tags::INDI => {
                self.note_pointer(record);
                self.cursor = Cursor::IndividualOpen(RawIndividual::new(record.value, record.line));
            }
            tags::FAM => {
                self.note_pointer(record);
                self.cursor = Cursor::FamilyOpen(RawFamilyUnit::new(record.value, record.line));
            }
            tag if tags::ENVELOPE.contains(&tag) => {}
            tag => self.unknown_tag(record.line, tag),
        }
    }

    fn record_field(&mut self, record: Record<'_>) {
        let value = record.value;
        let recognized = match &mut self.cursor {
            Cursor::NoOpenRecord => true,
            Cursor::IndividualOpen(individual) => match record.tag {
                tags::NAME => {
                    individual.name = value.to_owned();
                    true
                }
                tags::SEX => {
                    individual.sex = Sex::from_code(value);
                    true
                }
                tags::BIRT => {
                    individual.birth = Some(RawEvent::default());
                    self.current_event = Some(EventSlot::Birth);
                    true
                }
                tags::DEAT => {
                    individual.death = Some(RawEvent::default());
                    self.current_event = Some(EventSlot::Death);
                    true
                }
                tag => tags::FAMILY_LINKS.contains(&tag),
            },
            Cursor::FamilyOpen(family) => match record.tag {
                tags::HUSB => {
                    family.husband = Some(value.to_owned());
                    true
                }
                tags::WIFE => {
                    family.wife = Some(value.to_owned());
                    true
                }
                tags::CHIL => {
                    family.children.push(value.to_owned());
                    true
                }
                tags::MARR => {
                    family.marriage = Some(RawEvent::default());
                    self.current_event = Some(EventSlot::Marriage);
                    true
                }
                _ => false,
            },
        };
        if !recognized {
            self.unknown_tag(record.line, record.tag);
        }
    }

    fn event_detail(&mut self, record: Record<'_>) {
        if matches!(self.cursor, Cursor::NoOpenRecord) {
            return;
        }
        if record.tag != tags::DATE && record.tag != tags::PLAC {
            self.unknown_tag(record.line, record.tag);
            return;
        }
        if let Some(event) = self.current_event_mut() {
            let value = Some(record.value.to_owned());
            if record.tag == tags::DATE {
                event.date = value;
            } else {
                event.place = value;
            }
            return;
        }
        self.sink.report(
            DiagnosticKind::OrphanEventDetail,
            Some(record.line),
            format!("{} line outside of a birth, death or marriage", record.tag),
        );
    }

    fn current_event_mut(&mut self) -> Option<&mut RawEvent> {
        match (&mut self.cursor, self.current_event?) {
            (Cursor::IndividualOpen(i), EventSlot::Birth) => i.birth.as_mut(),
            (Cursor::IndividualOpen(i), EventSlot::Death) => i.death.as_mut(),
            (Cursor::FamilyOpen(f), EventSlot::Marriage) => f.marriage.as_mut(),
            _ => None,
        }
    }

    fn note_pointer(&mut self, record: Record<'_>) {
        if !self.seen_pointers.insert(record.value.to_owned()) {
            self.sink.report(
                DiagnosticKind::DuplicatePointer,
                Some(record.line),
                format!("pointer '{}' is used by more than one record", record.value),
            );
        }
    }

    fn unknown_tag(&mut self, line: u32, tag: &str) {
        self.sink.report(
            DiagnosticKind::UnknownTag,
            Some(line),
            format!("ignored unrecognized tag '{}'", tag),
        );
    }
}

/// Fold a record sequence into a document, leniently.
pub fn assemble<'a>(records: impl IntoIterator<Item = Record<'a>>) -> RawDocument {
    let mut assembler = Assembler::new(Strictness::Lenient);
    for record in records {
        assembler.feed(record);
    }
    assembler.finish().0
}
