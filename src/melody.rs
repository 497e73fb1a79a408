//! Note events and melodies.
//!
//! A [`Melody`] is built once by a generator and never edited afterwards;
//! regenerating produces a new one. Event order is temporal order is
//! playback order.

use serde::Serialize;

use crate::pitch::Pitch;
use crate::rhythm::Duration;

/// One sounding note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    pub pitch: Pitch,
    pub duration: Duration,
}

impl NoteEvent {
    pub const fn new(pitch: Pitch, duration: Duration) -> Self {
        Self { pitch, duration }
    }

    pub fn beats(&self) -> f64 {
        self.duration.beats()
    }
}

/// An ordered, immutable sequence of note events
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Melody {
    events: Vec<NoteEvent>,
}

impl Melody {
    pub fn new(events: Vec<NoteEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NoteEvent> {
        self.events.iter()
    }

    pub fn total_beats(&self) -> f64 {
        self.events.iter().map(NoteEvent::beats).sum()
    }
}

impl FromIterator<NoteEvent> for Melody {
    fn from_iter<I: IntoIterator<Item = NoteEvent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Melody {
    type Item = &'a NoteEvent;
    type IntoIter = std::slice::Iter<'a, NoteEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
