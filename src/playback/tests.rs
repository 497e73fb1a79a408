use super::*;
use crate::melody::{Melody, NoteEvent};
use crate::pitch::Pitch;
use crate::rhythm::{Duration, Tempo};

fn melody(notes: &[(&str, Duration)]) -> Melody {
    notes
        .iter()
        .map(|(p, d)| NoteEvent::new(p.parse::<Pitch>().unwrap(), *d))
        .collect()
}

#[derive(Default)]
struct RecordingPlayer {
    scheduled: Vec<(String, f64, f64)>,
}

impl Player for RecordingPlayer {
    fn schedule_note(&mut self, pitch: &Pitch, duration: f64, at: f64) {
        self.scheduled.push((pitch.to_string(), duration, at));
    }

    fn attack(&mut self, _pitch: &Pitch) {}

    fn release(&mut self, _pitch: &Pitch) {}
}

#[test]
fn test_playback_basic_timing() {
    let m = melody(&[
        ("C4", Duration::Quarter),
        ("D4", Duration::Quarter),
        ("E4", Duration::Half),
        ("F4", Duration::Eighth),
    ]);
    let data = schedule(&m, Tempo::default());

    assert_eq!(data.tempo, 120);
    assert_eq!(data.notes.len(), 4);
    assert_eq!(data.notes[0].start, 0.0);
    assert_eq!(data.notes[0].length, 0.5);
    assert_eq!(data.notes[1].start, 0.5);
    assert_eq!(data.notes[2].start, 1.0);
    assert_eq!(data.notes[2].length, 1.0);
    assert_eq!(data.notes[3].start, 2.0);
    assert_eq!(data.total_seconds, 2.25);
}

#[test]
fn test_playback_slower_tempo() {
    let m = melody(&[("C4", Duration::Quarter), ("C4", Duration::Whole)]);
    let data = schedule(&m, Tempo { bpm: 60 });
    assert_eq!(data.notes[1].start, 1.0);
    assert_eq!(data.notes[1].length, 4.0);
    assert_eq!(data.total_seconds, 5.0);
}

#[test]
fn test_playback_midi_notes() {
    let m = melody(&[
        ("C4", Duration::Quarter),
        ("F#4", Duration::Quarter),
        ("Bb3", Duration::Quarter),
        ("C5", Duration::Quarter),
    ]);
    let data = schedule(&m, Tempo::default());
    let midi: Vec<i16> = data.notes.iter().map(|n| n.midi_note).collect();
    assert_eq!(midi, vec![60, 66, 58, 72]);
}

#[test]
fn test_starts_monotone_and_releases_after_start() {
    let m = melody(&[
        ("C4", Duration::Sixteenth),
        ("D4", Duration::Whole),
        ("E4", Duration::Eighth),
        ("G4", Duration::Half),
        ("A4", Duration::Quarter),
    ]);
    let data = schedule(&m, Tempo::default());
    for pair in data.notes.windows(2) {
        assert!(pair[0].start <= pair[1].start);
        assert_eq!(pair[1].start, pair[0].release);
    }
    assert!(data.notes.iter().all(|n| n.release > n.start));
}

#[test]
fn test_measure_numbers_match_score_packing() {
    let m = melody(&[
        ("C4", Duration::Half),
        ("D4", Duration::Quarter),
        ("E4", Duration::Half),
        ("F4", Duration::Half),
        ("G4", Duration::Whole),
    ]);
    let data = schedule(&m, Tempo::default());
    let measures: Vec<usize> = data.notes.iter().map(|n| n.measure_number).collect();
    assert_eq!(measures, vec![1, 1, 2, 2, 3]);
    assert_eq!(data.notes[1].beat_in_measure, 2.0);
    assert_eq!(data.notes[3].beat_in_measure, 2.0);
    assert_eq!(data.notes[4].beat_in_measure, 0.0);
}

#[test]
fn test_play_hands_every_note_to_player() {
    let m = melody(&[("C4", Duration::Quarter), ("E4", Duration::Half)]);
    let mut player = RecordingPlayer::default();
    let data = play(&m, Tempo::default(), &mut player);

    assert_eq!(
        player.scheduled,
        vec![("C4".to_string(), 0.5, 0.0), ("E4".to_string(), 1.0, 0.5)]
    );
    assert_eq!(data.total_seconds, 1.5);
}

#[test]
fn test_empty_melody_schedules_nothing() {
    let mut player = RecordingPlayer::default();
    let data = play(&Melody::default(), Tempo::default(), &mut player);
    assert!(data.notes.is_empty());
    assert!(player.scheduled.is_empty());
    assert_eq!(data.total_seconds, 0.0);
}
