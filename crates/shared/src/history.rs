use std::collections::VecDeque;

use crate::models::ClickRecord;

/// Bounded click log, newest first. Pushing past capacity drops the oldest.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickHistory {
    capacity: usize,
    records: VecDeque<ClickRecord>,
}

impl ClickHistory {
    pub fn new(capacity: usize) -> Self {
        ClickHistory {
            capacity,
            records: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn push(&mut self, record: ClickRecord) {
        self.records.push_front(record);
        while self.records.len() > self.capacity {
            self.records.pop_back();
        }
    }

    pub fn get(&self, index: usize) -> Option<&ClickRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClickRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Table snippet for a new 100×100 px location centered on the click.
///
/// Fresh clicks and recalled entries share this one format, so a logged
/// snippet always centers the new rect on the recorded point.
pub fn authoring_snippet(record: &ClickRecord) -> String {
    let (x, y) = (record.x, record.y);
    format!(
        "coords: [{}, {}, {}, {}],\ncenter: [{}, {}]",
        x - 50,
        y - 50,
        x + 50,
        y + 50,
        x,
        y
    )
}
