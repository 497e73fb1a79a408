//! Fixed-do solfège captions shown under the score.
//!
//! Captions ignore octave and accidental: F and F# are both "Fa".

use std::fmt;

use serde::Serialize;

use crate::melody::Melody;
use crate::pitch::NoteName;
use crate::rhythm::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Syllable {
    Do,
    Re,
    Mi,
    Fa,
    Sol,
    La,
    Si,
}

impl Syllable {
    pub fn for_name(name: NoteName) -> Self {
        match name {
            NoteName::C => Syllable::Do,
            NoteName::D => Syllable::Re,
            NoteName::E => Syllable::Mi,
            NoteName::F => Syllable::Fa,
            NoteName::G => Syllable::Sol,
            NoteName::A => Syllable::La,
            NoteName::B => Syllable::Si,
        }
    }

    /// Syllable for a written note name such as `"F#5"` or `"Bb"`. Octave
    /// digits and one accidental are stripped; anything else gives `None`.
    pub fn for_note_name(note: &str) -> Option<Self> {
        let stripped = note.trim().trim_end_matches(|c: char| c.is_ascii_digit() || c == '-');
        let mut chars = stripped.chars();
        let name = NoteName::from_char(chars.next()?)?;
        match chars.as_str() {
            "" | "#" | "b" => Some(Self::for_name(name)),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Syllable::Do => "Do",
            Syllable::Re => "Re",
            Syllable::Mi => "Mi",
            Syllable::Fa => "Fa",
            Syllable::Sol => "Sol",
            Syllable::La => "La",
            Syllable::Si => "Si",
        }
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width class of a caption cell, following note length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionWidth {
    Wide,
    Medium,
    Narrow,
    Compact,
}

impl CaptionWidth {
    pub fn for_duration(duration: Duration) -> Self {
        match duration {
            Duration::Half => CaptionWidth::Wide,
            Duration::Quarter => CaptionWidth::Medium,
            Duration::Eighth => CaptionWidth::Narrow,
            _ => CaptionWidth::Compact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolfegeCaption {
    pub syllable: Syllable,
    pub duration: Duration,
    pub width: CaptionWidth,
}

/// One caption per event, same order as the melody
pub fn solfege_captions(melody: &Melody) -> Vec<SolfegeCaption> {
    melody
        .iter()
        .map(|event| SolfegeCaption {
            syllable: Syllable::for_name(event.pitch.class.name),
            duration: event.duration,
            width: CaptionWidth::for_duration(event.duration),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::melody::NoteEvent;
    use crate::pitch::Pitch;

    #[test]
    fn test_captions_follow_melody() {
        let melody: Melody = [("C4", Duration::Quarter), ("G4", Duration::Half), ("B5", Duration::Eighth)]
            .iter()
            .map(|(p, d)| NoteEvent::new(p.parse::<Pitch>().unwrap(), *d))
            .collect();
        let captions = solfege_captions(&melody);
        let text: Vec<String> = captions.iter().map(|c| c.syllable.to_string()).collect();
        assert_eq!(text, vec!["Do", "Sol", "Si"]);
        assert_eq!(captions[1].duration, Duration::Half);
        assert_eq!(captions[1].width, CaptionWidth::Wide);
        assert_eq!(captions[2].width, CaptionWidth::Narrow);
    }

    #[test]
    fn test_accidentals_collapse_to_letter() {
        assert_eq!(Syllable::for_note_name("F#4"), Some(Syllable::Fa));
        assert_eq!(Syllable::for_note_name("F4"), Some(Syllable::Fa));
        assert_eq!(Syllable::for_note_name("Bb5"), Some(Syllable::Si));
        assert_eq!(Syllable::for_note_name("e"), Some(Syllable::Mi));
    }

    #[test]
    fn test_unknown_names_have_no_caption() {
        assert_eq!(Syllable::for_note_name("H4"), None);
        assert_eq!(Syllable::for_note_name(""), None);
        assert_eq!(Syllable::for_note_name("C##4"), None);
    }

    #[test]
    fn test_empty_melody() {
        assert!(solfege_captions(&Melody::default()).is_empty());
    }
}
