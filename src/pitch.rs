//! # Pitch Types
//!
//! Spelled pitches in scientific notation (`C4` is middle C, MIDI 60).
//!
//! ## Type Hierarchy
//! ```text
//! Pitch
//!   ├── class: PitchClass
//!   │     ├── name: NoteName (C-B)
//!   │     └── accidental: Accidental (natural, #, b)
//!   └── octave: i8 (belongs to the letter, so Cb5 sounds as B4)
//! ```
//!
//! ## Spelling
//! The twelve chromas can be spelled several ways. Whenever a pitch is
//! produced from a bare number (transposition, chord stacking fallbacks) the
//! caller picks a [`SpellingPolicy`], and a chroma always maps to exactly one
//! spelling under a given policy.
//!
//! ## Text Forms
//! - Display / parse: `C#4`, `Bb4`, `Cb5`
//! - Renderer form: `c#4`, `bb4` (see [`Pitch::notation_name`])

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrillError;

/// Note letters C through B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteName {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    pub const ALL: [NoteName; 7] = [
        NoteName::C,
        NoteName::D,
        NoteName::E,
        NoteName::F,
        NoteName::G,
        NoteName::A,
        NoteName::B,
    ];

    /// Semitones above C for the natural letter
    pub fn semitone(self) -> i8 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    /// Position in the letter cycle, C = 0
    pub fn index(self) -> usize {
        match self {
            NoteName::C => 0,
            NoteName::D => 1,
            NoteName::E => 2,
            NoteName::F => 3,
            NoteName::G => 4,
            NoteName::A => 5,
            NoteName::B => 6,
        }
    }

    /// Letter at `index` in the cycle, wrapping past B
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 7]
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }
}

/// Accidentals: natural, sharp (#) or flat (b)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn offset(self) -> i8 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Accidental::Flat => 0,
            Accidental::Natural => 1,
            Accidental::Sharp => 2,
        }
    }
}

/// Whether black keys are written as sharps or flats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpellingPolicy {
    #[default]
    Sharps,
    Flats,
}

/// A spelled chroma without octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PitchClass {
    pub name: NoteName,
    pub accidental: Accidental,
}

impl PitchClass {
    pub const fn new(name: NoteName, accidental: Accidental) -> Self {
        Self { name, accidental }
    }

    pub const fn natural(name: NoteName) -> Self {
        Self {
            name,
            accidental: Accidental::Natural,
        }
    }

    /// Chroma in 0..12, C = 0
    pub fn chroma(self) -> u8 {
        (self.name.semitone() + self.accidental.offset()).rem_euclid(12) as u8
    }

    /// Spell a chroma under `policy`.
    ///
    /// ```
    /// use piano_drill::{NoteName, Accidental, PitchClass, SpellingPolicy};
    ///
    /// let sharp = PitchClass::from_chroma(10, SpellingPolicy::Sharps);
    /// let flat = PitchClass::from_chroma(10, SpellingPolicy::Flats);
    /// assert_eq!(sharp, PitchClass::new(NoteName::A, Accidental::Sharp));
    /// assert_eq!(flat, PitchClass::new(NoteName::B, Accidental::Flat));
    /// ```
    pub fn from_chroma(chroma: u8, policy: SpellingPolicy) -> Self {
        let prefer_flat = policy == SpellingPolicy::Flats;
        let black = |sharp_of: NoteName, flat_of: NoteName| {
            if prefer_flat {
                PitchClass::new(flat_of, Accidental::Flat)
            } else {
                PitchClass::new(sharp_of, Accidental::Sharp)
            }
        };

        // 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
        match chroma % 12 {
            0 => PitchClass::natural(NoteName::C),
            1 => black(NoteName::C, NoteName::D),
            2 => PitchClass::natural(NoteName::D),
            3 => black(NoteName::D, NoteName::E),
            4 => PitchClass::natural(NoteName::E),
            5 => PitchClass::natural(NoteName::F),
            6 => black(NoteName::F, NoteName::G),
            7 => PitchClass::natural(NoteName::G),
            8 => black(NoteName::G, NoteName::A),
            9 => PitchClass::natural(NoteName::A),
            10 => black(NoteName::A, NoteName::B),
            _ => PitchClass::natural(NoteName::B),
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name.letter(), self.accidental.symbol())
    }
}

/// Parses the letter and optional accidental at the start of `s`, returning
/// the rest of the string.
fn split_class(s: &str) -> Option<(PitchClass, &str)> {
    let mut chars = s.chars();
    let name = NoteName::from_char(chars.next()?)?;
    let rest = chars.as_str();
    let (accidental, rest) = if let Some(r) = rest.strip_prefix('#') {
        (Accidental::Sharp, r)
    } else if let Some(r) = rest.strip_prefix('b') {
        (Accidental::Flat, r)
    } else {
        (Accidental::Natural, rest)
    };
    Some((PitchClass::new(name, accidental), rest))
}

impl FromStr for PitchClass {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_class(s.trim()) {
            Some((class, "")) => Ok(class),
            _ => Err(DrillError::UnknownKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for PitchClass {
    type Error = DrillError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PitchClass> for String {
    fn from(class: PitchClass) -> Self {
        class.to_string()
    }
}

/// Octave range accepted when parsing, C-1 to B9. Pitches built from MIDI
/// numbers are clamped to it.
pub const MIN_OCTAVE: i8 = -1;
pub const MAX_OCTAVE: i8 = 9;

/// A spelled pitch with octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: i8,
}

impl Pitch {
    pub const fn new(class: PitchClass, octave: i8) -> Self {
        Self { class, octave }
    }

    pub fn chroma(&self) -> u8 {
        self.class.chroma()
    }

    /// MIDI note number (C4 = 60). Not clamped, so pitches outside the
    /// keyboard still compare correctly.
    pub fn midi(&self) -> i16 {
        (self.octave as i16 + 1) * 12
            + self.class.name.semitone() as i16
            + self.class.accidental.offset() as i16
    }

    pub fn from_midi(midi: i16, policy: SpellingPolicy) -> Self {
        let class = PitchClass::from_chroma(midi.rem_euclid(12) as u8, policy);
        Self::from_midi_spelled(midi, class)
    }

    /// Pitch sounding at `midi` written with `class`. The octave number is
    /// derived from the letter, so `(71, Cb)` gives `Cb5`.
    pub fn from_midi_spelled(midi: i16, class: PitchClass) -> Self {
        let natural = midi - class.name.semitone() as i16 - class.accidental.offset() as i16;
        let octave = (natural.div_euclid(12) - 1).clamp(MIN_OCTAVE as i16, MAX_OCTAVE as i16);
        Self {
            class,
            octave: octave as i8,
        }
    }

    pub fn transposed(&self, semitones: i16, policy: SpellingPolicy) -> Self {
        Self::from_midi(self.midi() + semitones, policy)
    }

    /// Name in the form the notation renderer expects: lower-case letter,
    /// `#`/`b`, octave digit (`bb4`).
    pub fn notation_name(&self) -> String {
        format!(
            "{}{}{}",
            self.class.name.letter().to_ascii_lowercase(),
            self.class.accidental.symbol(),
            self.octave
        )
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.midi()
            .cmp(&other.midi())
            .then(self.octave.cmp(&other.octave))
            .then(self.class.name.index().cmp(&other.class.name.index()))
            .then(self.class.accidental.rank().cmp(&other.class.accidental.rank()))
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DrillError::InvalidPitch(s.to_string());
        let (class, rest) = split_class(s.trim()).ok_or_else(invalid)?;
        let octave = rest.parse::<i8>().map_err(|_| invalid())?;
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            return Err(invalid());
        }
        Ok(Pitch::new(class, octave))
    }
}

impl TryFrom<String> for Pitch {
    type Error = DrillError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.to_string()
    }
}

/// Parse a list of pitch names, failing on the first bad one.
pub fn parse_pitches(names: &[&str]) -> Result<Vec<Pitch>, DrillError> {
    names.iter().map(|n| n.parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(p("C4").to_string(), "C4");
        assert_eq!(p("F#5").to_string(), "F#5");
        assert_eq!(p("Bb4").to_string(), "Bb4");
        assert_eq!(p("c#4").to_string(), "C#4");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("H4".parse::<Pitch>().is_err());
        assert!("C".parse::<Pitch>().is_err());
        assert!("C#x".parse::<Pitch>().is_err());
        assert!("".parse::<Pitch>().is_err());
    }

    #[test]
    fn test_midi_numbers() {
        assert_eq!(p("C4").midi(), 60);
        assert_eq!(p("A4").midi(), 69);
        assert_eq!(p("C#4").midi(), 61);
        assert_eq!(p("Db4").midi(), 61);
        assert_eq!(p("C2").midi(), 36);
        // The octave belongs to the letter
        assert_eq!(p("Cb5").midi(), 71);
    }

    #[test]
    fn test_from_midi_spelled_keeps_letter_octave() {
        let cb = PitchClass::new(NoteName::C, Accidental::Flat);
        assert_eq!(Pitch::from_midi_spelled(71, cb), p("Cb5"));
        assert_eq!(Pitch::from_midi(71, SpellingPolicy::Flats), p("B4"));
        assert_eq!(Pitch::from_midi(70, SpellingPolicy::Flats), p("Bb4"));
        assert_eq!(Pitch::from_midi(70, SpellingPolicy::Sharps), p("A#4"));
    }

    #[test]
    fn test_one_spelling_per_chroma() {
        for policy in [SpellingPolicy::Sharps, SpellingPolicy::Flats] {
            for chroma in 0..12u8 {
                let class = PitchClass::from_chroma(chroma, policy);
                assert_eq!(class.chroma(), chroma);
                assert_eq!(PitchClass::from_chroma(chroma, policy), class);
            }
        }
    }

    #[test]
    fn test_ordering_by_height() {
        let mut pitches = vec![p("C5"), p("B4"), p("C4"), p("G4"), p("F#4")];
        pitches.sort();
        let names: Vec<String> = pitches.iter().map(|x| x.to_string()).collect();
        assert_eq!(names, vec!["C4", "F#4", "G4", "B4", "C5"]);
        assert!(p("B3") < p("C4"));
    }

    #[test]
    fn test_octave_range() {
        assert_eq!(p("C-1").midi(), 0);
        assert_eq!(p("B9").octave, 9);
        assert!("C10".parse::<Pitch>().is_err());
        assert!(matches!("B127".parse::<Pitch>(), Err(DrillError::InvalidPitch(_))));
        assert!("C-2".parse::<Pitch>().is_err());
    }

    #[test]
    fn test_from_midi_never_wraps_octave() {
        let high = Pitch::from_midi(2000, SpellingPolicy::Sharps);
        assert_eq!(high.octave, MAX_OCTAVE);
        let low = Pitch::from_midi(-2000, SpellingPolicy::Flats);
        assert_eq!(low.octave, MIN_OCTAVE);
        // Transposing the top pitch upward stays at the top octave
        assert_eq!(p("B9").transposed(11, SpellingPolicy::Sharps).octave, MAX_OCTAVE);
    }

    #[test]
    fn test_notation_name() {
        assert_eq!(p("C#4").notation_name(), "c#4");
        assert_eq!(p("Bb5").notation_name(), "bb5");
        assert_eq!(p("G4").notation_name(), "g4");
    }

    #[test]
    fn test_transposed() {
        assert_eq!(p("C4").transposed(7, SpellingPolicy::Sharps), p("G4"));
        assert_eq!(p("B4").transposed(2, SpellingPolicy::Sharps), p("C#5"));
        assert_eq!(p("C4").transposed(-1, SpellingPolicy::Flats), p("B3"));
    }

    #[test]
    fn test_pitch_class_parse() {
        assert_eq!("Bb".parse::<PitchClass>().unwrap().chroma(), 10);
        assert_eq!("F#".parse::<PitchClass>().unwrap().to_string(), "F#");
        assert!(matches!("X".parse::<PitchClass>(), Err(DrillError::UnknownKey(_))));
        assert!("C4".parse::<PitchClass>().is_err());
    }
}
