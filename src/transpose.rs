use crate::error::DrillError;
use crate::pitch::{Accidental, NoteName, Pitch, PitchClass, SpellingPolicy};

/// Key roots a drill can be set in, with the sharp/flat preference each one
/// uses when spelling transposed notes. Sharp side of the circle of fifths
/// first, then the flat side.
pub const KEY_ROOTS: [(&str, SpellingPolicy); 15] = [
    ("C", SpellingPolicy::Sharps),
    ("G", SpellingPolicy::Sharps),
    ("D", SpellingPolicy::Sharps),
    ("A", SpellingPolicy::Sharps),
    ("E", SpellingPolicy::Sharps),
    ("B", SpellingPolicy::Sharps),
    ("F#", SpellingPolicy::Sharps),
    ("C#", SpellingPolicy::Sharps),
    ("F", SpellingPolicy::Flats),
    ("Bb", SpellingPolicy::Flats),
    ("Eb", SpellingPolicy::Flats),
    ("Ab", SpellingPolicy::Flats),
    ("Db", SpellingPolicy::Flats),
    ("Gb", SpellingPolicy::Flats),
    ("Cb", SpellingPolicy::Flats),
];

/// Semitones above the tonic for each degree of a major scale, upper tonic included
const MAJOR_STEPS: [i16; 8] = [0, 2, 4, 5, 7, 9, 11, 12];

/// Parse a key root, accepting only names from [`KEY_ROOTS`].
pub fn parse_key(s: &str) -> Result<PitchClass, DrillError> {
    let trimmed = s.trim();
    if KEY_ROOTS.iter().any(|(name, _)| *name == trimmed) {
        trimmed.parse()
    } else {
        Err(DrillError::UnknownKey(s.to_string()))
    }
}

/// Sharp/flat preference of a key: F and every flat-spelled root prefer
/// flats, the rest prefer sharps.
pub fn spelling_for_key(root: PitchClass) -> SpellingPolicy {
    match (root.name, root.accidental) {
        (_, Accidental::Flat) | (NoteName::F, Accidental::Natural) => SpellingPolicy::Flats,
        _ => SpellingPolicy::Sharps,
    }
}

/// Upward distance in semitones from one key root to another, in 0..12
pub fn key_interval(from: PitchClass, to: PitchClass) -> u8 {
    (to.chroma() + 12 - from.chroma()) % 12
}

/// Move a pitch from key `from` into key `to`, always upward, re-spelled with
/// the target key's preference. The octave rises when the chroma wraps past B.
pub fn transpose_pitch(pitch: &Pitch, from: PitchClass, to: PitchClass) -> Pitch {
    let semitones = key_interval(from, to) as i16;
    if semitones == 0 {
        return *pitch;
    }
    pitch.transposed(semitones, spelling_for_key(to))
}

/// Transpose every chord root of a progression written in `from` into `to`
pub fn transpose_progression(roots: &[Pitch], from: PitchClass, to: PitchClass) -> Vec<Pitch> {
    roots.iter().map(|root| transpose_pitch(root, from, to)).collect()
}

/// The eight pitches of the major scale on `tonic`, one letter per degree
/// (so Gb major contains Cb, F# major contains E#).
pub fn major_scale(tonic: PitchClass, octave: i8) -> Vec<Pitch> {
    let tonic_midi = Pitch::new(tonic, octave).midi();
    let fallback = spelling_for_key(tonic);

    MAJOR_STEPS
        .iter()
        .enumerate()
        .map(|(degree, step)| {
            let target = tonic_midi + step;
            let name = NoteName::from_index(tonic.name.index() + degree);
            let diff = (target.rem_euclid(12) - name.semitone() as i16 + 18).rem_euclid(12) - 6;
            let accidental = match diff {
                0 => Some(Accidental::Natural),
                1 => Some(Accidental::Sharp),
                -1 => Some(Accidental::Flat),
                _ => None,
            };
            match accidental {
                Some(accidental) => {
                    Pitch::from_midi_spelled(target, PitchClass::new(name, accidental))
                }
                None => Pitch::from_midi(target, fallback),
            }
        })
        .collect()
}
