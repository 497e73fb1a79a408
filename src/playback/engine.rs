//! Playback schedule generation
//!
//! Converts a melody into timed notes for both audio playback and visual
//! key highlighting.

use tracing::debug;

use super::types::{PlaybackData, Player, ScheduledNote};
use crate::layout::partition;
use crate::melody::Melody;
use crate::rhythm::Tempo;

/// Compute start offsets and lengths for every note of `melody`.
///
/// Measure numbers follow the same greedy packing the score uses, so a
/// highlighted key always matches the measure drawn on screen.
pub fn schedule(melody: &Melody, tempo: Tempo) -> PlaybackData {
    let mut notes = Vec::with_capacity(melody.len());
    let mut current_time = 0.0;
    let mut note_index = 0;

    for (measure_idx, events) in partition(melody).iter().enumerate() {
        let mut beat_in_measure = 0.0;
        for event in events {
            let length = event.duration.seconds(tempo);
            notes.push(ScheduledNote {
                pitch: event.pitch,
                midi_note: event.pitch.midi(),
                duration: event.duration,
                start: current_time,
                length,
                release: current_time + length,
                note_index,
                measure_number: measure_idx + 1,
                beat_in_measure,
            });
            current_time += length;
            beat_in_measure += event.beats();
            note_index += 1;
        }
    }

    PlaybackData {
        tempo: tempo.bpm,
        notes,
        total_seconds: current_time,
    }
}

/// Hand every note of `melody` to `player` and return the schedule.
///
/// Returns immediately; the player honors the offsets on its own clock.
pub fn play(melody: &Melody, tempo: Tempo, player: &mut dyn Player) -> PlaybackData {
    let data = schedule(melody, tempo);
    for note in &data.notes {
        player.schedule_note(&note.pitch, note.length, note.start);
    }
    debug!(
        notes = data.notes.len(),
        seconds = data.total_seconds,
        "scheduled playback"
    );
    data
}
