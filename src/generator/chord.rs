//! Melodies that outline a chord progression
//!
//! ## Chord slots
//! A progression of `n` roots divides the rhythm's total length into `n`
//! equal slots. An event belongs to the slot in which it starts, and its
//! pitch is drawn from that slot's triad. With the built-in four-measure
//! rhythms and four-chord progressions every chord lasts one measure.
//!
//! ## Triads
//! Triads are stacked in thirds on the key's major scale (root, two degrees
//! up, four degrees up), so every chord tone stays inside the key.

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::{debug, warn};

use super::{Composition, MelodyStrategy, StrategyKind};
use crate::library::ProgressionLibrary;
use crate::melody::{Melody, NoteEvent};
use crate::pitch::{Pitch, PitchClass};
use crate::rhythm::{total_beats, Duration, RhythmPattern};
use crate::transpose::{major_scale, transpose_progression};

/// Composes over a progression transposed into `key`
#[derive(Debug, Clone, Copy)]
pub struct ChordStrategy<'a> {
    progressions: &'a ProgressionLibrary,
    rhythms: &'a [RhythmPattern],
    key: PitchClass,
}

impl<'a> ChordStrategy<'a> {
    pub fn new(progressions: &'a ProgressionLibrary, rhythms: &'a [RhythmPattern], key: PitchClass) -> Self {
        Self {
            progressions,
            rhythms,
            key,
        }
    }
}

impl MelodyStrategy for ChordStrategy<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Chords
    }

    fn compose(&self, rng: &mut dyn RngCore) -> Composition {
        generate_chord_melody(self.progressions, self.rhythms, self.key, rng)
    }
}

/// Pick a progression and a rhythm, move the progression from the library's
/// home key into `key`, and draw each pitch from the active chord's triad.
pub fn generate_chord_melody(
    progressions: &ProgressionLibrary,
    rhythms: &[RhythmPattern],
    key: PitchClass,
    rng: &mut dyn RngCore,
) -> Composition {
    let Some(progression) = progressions.progressions.choose(rng) else {
        warn!("no chord progressions to compose over");
        return Composition {
            kind: StrategyKind::Chords,
            label: String::new(),
            melody: Melody::default(),
        };
    };
    let rhythm = rhythms.choose(rng).map(Vec::as_slice).unwrap_or_default();

    let roots = transpose_progression(&progression.roots, progressions.home_key, key);
    let key_scale = major_scale(key, 4);
    debug!(
        progression = %progression.name,
        key = %key,
        notes = rhythm.len(),
        "composing chord melody"
    );

    Composition {
        kind: StrategyKind::Chords,
        label: format!("{} in {}", progression.name, key),
        melody: compose_over_progression(&roots, &key_scale, rhythm, rng),
    }
}

/// Index of the chord sounding at `elapsed` beats
pub(crate) fn chord_slot(elapsed: f64, slot_beats: f64, chords: usize) -> usize {
    if slot_beats <= 0.0 || chords == 0 {
        return 0;
    }
    let slot = ((elapsed + 1e-9) / slot_beats).floor() as usize;
    slot.min(chords - 1)
}

/// One event per rhythm slot, each pitch drawn from the triad of the chord
/// active when the event starts.
pub fn compose_over_progression(
    roots: &[Pitch],
    key_scale: &[Pitch],
    rhythm: &[Duration],
    rng: &mut dyn RngCore,
) -> Melody {
    if roots.is_empty() {
        return Melody::default();
    }
    let slot_beats = total_beats(rhythm) / roots.len() as f64;

    let mut elapsed = 0.0;
    let mut events = Vec::with_capacity(rhythm.len());
    for &duration in rhythm {
        let root = &roots[chord_slot(elapsed, slot_beats, roots.len())];
        let chord = triad(root, key_scale);
        if let Some(&pitch) = chord.choose(rng) {
            events.push(NoteEvent::new(pitch, duration));
        }
        elapsed += duration.beats();
    }
    Melody::new(events)
}

/// Root, third and fifth of the chord on `root`, stacked on `key_scale`.
///
/// The third and fifth sit above the root, carrying into the next octave
/// when the stack passes the top of the scale. A root whose pitch class is
/// not in the scale yields just the root.
///
/// ```
/// use piano_drill::{triad, transpose::major_scale, Pitch, PitchClass};
///
/// let c_major = major_scale("C".parse::<PitchClass>().unwrap(), 4);
/// let g: Pitch = "G4".parse().unwrap();
/// let names: Vec<String> = triad(&g, &c_major).iter().map(|p| p.to_string()).collect();
/// assert_eq!(names, vec!["G4", "B4", "D5"]);
/// ```
pub fn triad(root: &Pitch, key_scale: &[Pitch]) -> Vec<Pitch> {
    // Seven distinct degrees; the upper tonic repeats the first
    let degrees: Vec<&Pitch> = key_scale
        .iter()
        .enumerate()
        .filter(|(i, p)| *i == 0 || p.chroma() != key_scale[0].chroma())
        .map(|(_, p)| p)
        .collect();
    let Some(degree) = degrees.iter().position(|p| p.chroma() == root.chroma()) else {
        warn!(root = %root, "chord root is outside the key, using the root alone");
        return vec![*root];
    };

    let count = degrees.len();
    let tonic = degrees[0].midi();
    let offset = |index: usize| -> i16 {
        (degrees[index % count].midi() - tonic).rem_euclid(12) + 12 * (index / count) as i16
    };

    [0, 2, 4]
        .iter()
        .map(|step| {
            let index = degree + step;
            let midi = root.midi() + offset(index) - offset(degree);
            Pitch::from_midi_spelled(midi, degrees[index % count].class)
        })
        .collect()
}
