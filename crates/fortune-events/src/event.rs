//! Event Types
//!
//! Lucky and unlucky point-events. A fresh field of them is drawn every
//! iteration; nothing about an event survives past the iteration it was
//! drawn for.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Whether an event helps or hurts whoever it lands near
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Lucky,
    Unlucky,
}

impl EventKind {
    /// Returns all event kind variants.
    pub fn all() -> &'static [EventKind] {
        &[EventKind::Lucky, EventKind::Unlucky]
    }
}

/// A single point-event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FortuneEvent {
    pub kind: EventKind,
    pub position: Point,
}

/// All events active during one iteration.
///
/// Lucky and unlucky positions are kept apart because the resolver always
/// checks one set before the other.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventField {
    pub lucky: Vec<Point>,
    pub unlucky: Vec<Point>,
}

impl EventField {
    pub fn new(lucky: Vec<Point>, unlucky: Vec<Point>) -> Self {
        Self { lucky, unlucky }
    }

    /// A field with no events at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// A field holding a single event
    pub fn single(kind: EventKind, position: Point) -> Self {
        let mut field = Self::empty();
        field.push(FortuneEvent { kind, position });
        field
    }

    pub fn push(&mut self, event: FortuneEvent) {
        match event.kind {
            EventKind::Lucky => self.lucky.push(event.position),
            EventKind::Unlucky => self.unlucky.push(event.position),
        }
    }

    /// Positions of the events of one kind
    pub fn positions(&self, kind: EventKind) -> &[Point] {
        match kind {
            EventKind::Lucky => &self.lucky,
            EventKind::Unlucky => &self.unlucky,
        }
    }

    /// Iterates every event, lucky ones first.
    pub fn events(&self) -> impl Iterator<Item = FortuneEvent> + '_ {
        let lucky = self.lucky.iter().map(|&position| FortuneEvent {
            kind: EventKind::Lucky,
            position,
        });
        let unlucky = self.unlucky.iter().map(|&position| FortuneEvent {
            kind: EventKind::Unlucky,
            position,
        });
        lucky.chain(unlucky)
    }

    pub fn len(&self) -> usize {
        self.lucky.len() + self.unlucky.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lucky.is_empty() && self.unlucky.is_empty()
    }
}

/// One logged iteration of the event field, as written to JSONL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub run_id: String,
    pub iteration: u64,
    pub lucky: Vec<Point>,
    pub unlucky: Vec<Point>,
}

impl FieldRecord {
    pub fn new(run_id: impl Into<String>, iteration: u64, field: &EventField) -> Self {
        Self {
            run_id: run_id.into(),
            iteration,
            lucky: field.lucky.clone(),
            unlucky: field.unlucky.clone(),
        }
    }

    /// Serializes the record as a single JSON line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a record from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Rebuilds the field this record was taken from.
    pub fn into_field(self) -> EventField {
        EventField::new(self.lucky, self.unlucky)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_sorts_by_kind() {
        let mut field = EventField::empty();
        assert!(field.is_empty());

        field.push(FortuneEvent {
            kind: EventKind::Lucky,
            position: Point::new(0.1, 0.1),
        });
        field.push(FortuneEvent {
            kind: EventKind::Unlucky,
            position: Point::new(0.9, 0.9),
        });
        field.push(FortuneEvent {
            kind: EventKind::Unlucky,
            position: Point::new(0.5, 0.5),
        });

        assert_eq!(field.len(), 3);
        assert_eq!(field.positions(EventKind::Lucky).len(), 1);
        assert_eq!(field.positions(EventKind::Unlucky).len(), 2);
    }

    #[test]
    fn test_events_lucky_first() {
        let mut field = EventField::single(EventKind::Unlucky, Point::new(0.2, 0.2));
        field.push(FortuneEvent {
            kind: EventKind::Lucky,
            position: Point::new(0.3, 0.3),
        });

        let kinds: Vec<_> = field.events().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Lucky, EventKind::Unlucky]);
    }

    #[test]
    fn test_event_kind_serialization() {
        let json = serde_json::to_string(&EventKind::Unlucky).unwrap();
        assert_eq!(json, "\"unlucky\"");
    }

    #[test]
    fn test_field_record_jsonl() {
        let field = EventField::single(EventKind::Lucky, Point::new(0.25, 0.75));
        let record = FieldRecord::new("run_0001", 7, &field);

        let line = record.to_jsonl().unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"iteration\":7"));

        let parsed = FieldRecord::from_jsonl(&line).unwrap();
        assert_eq!(parsed.run_id, "run_0001");
        assert_eq!(parsed.into_field(), field);
    }
}
