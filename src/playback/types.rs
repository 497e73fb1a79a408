//! Playback type definitions

use serde::Serialize;

use crate::pitch::Pitch;
use crate::rhythm::Duration;

/// A note with its place on the playback timeline
///
/// # Fields
/// - `start`: offset from the beginning of playback, in seconds
/// - `length`: how long the note sounds, in seconds
/// - `release`: `start + length`
/// - `note_index`: position in the melody (0, 1, 2, ...)
/// - `measure_number`: measure the note is drawn in (1-indexed)
/// - `beat_in_measure`: beat position within that measure
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledNote {
    pub pitch: Pitch,
    pub midi_note: i16,
    pub duration: Duration,
    pub start: f64,
    pub length: f64,
    pub release: f64,
    pub note_index: usize,
    pub measure_number: usize,
    pub beat_in_measure: f64,
}

/// Schedule for a whole melody
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackData {
    pub tempo: u16,
    pub notes: Vec<ScheduledNote>,
    pub total_seconds: f64,
}

/// The audio collaborator.
///
/// `schedule_note` is fire-and-forget: the player is responsible for honoring
/// the offset with its own clock. `attack`/`release` drive immediate single
/// notes from the on-screen keyboard.
pub trait Player {
    fn schedule_note(&mut self, pitch: &Pitch, duration: f64, at: f64);

    fn attack(&mut self, pitch: &Pitch);

    fn release(&mut self, pitch: &Pitch);
}
