//! The on-screen keyboard: 49 keys from C2 to C6.
//!
//! Pressing a key sounds it immediately through the [`Player`]; holding it
//! down again does not retrigger. Enharmonic spellings address the same key,
//! so `Bb3` and `A#3` are one key.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::pitch::{Pitch, SpellingPolicy};
use crate::playback::{PlaybackData, Player};

pub const LOWEST_KEY: i16 = 36; // C2
pub const HIGHEST_KEY: i16 = 84; // C6

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyColor {
    White,
    Black,
}

impl KeyColor {
    pub fn for_midi(midi: i16) -> Self {
        if matches!(midi.rem_euclid(12), 1 | 3 | 6 | 8 | 10) {
            KeyColor::Black
        } else {
            KeyColor::White
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PianoKey {
    pub pitch: Pitch,
    pub color: KeyColor,
}

/// Every key, lowest first. Black keys are spelled with sharps.
pub fn piano_keys() -> Vec<PianoKey> {
    (LOWEST_KEY..=HIGHEST_KEY)
        .map(|midi| PianoKey {
            pitch: Pitch::from_midi(midi, SpellingPolicy::Sharps),
            color: KeyColor::for_midi(midi),
        })
        .collect()
}

/// Held keys, by MIDI number
#[derive(Debug, Default)]
pub struct Keyboard {
    held: BTreeMap<i16, Pitch>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press `pitch`. Returns false (and plays nothing) if it is off the
    /// keyboard or already held.
    pub fn press(&mut self, pitch: &Pitch, player: &mut dyn Player) -> bool {
        let midi = pitch.midi();
        if !(LOWEST_KEY..=HIGHEST_KEY).contains(&midi) || self.held.contains_key(&midi) {
            return false;
        }
        self.held.insert(midi, *pitch);
        player.attack(pitch);
        debug!(key = %pitch, "key down");
        true
    }

    /// Release `pitch` if held. The player gets the spelling used on press.
    pub fn release(&mut self, pitch: &Pitch, player: &mut dyn Player) -> bool {
        match self.held.remove(&pitch.midi()) {
            Some(pressed) => {
                player.release(&pressed);
                debug!(key = %pressed, "key up");
                true
            }
            None => false,
        }
    }

    /// Release everything, e.g. when the pointer leaves the keyboard
    pub fn release_all(&mut self, player: &mut dyn Player) {
        for pitch in std::mem::take(&mut self.held).into_values() {
            player.release(&pitch);
        }
    }

    pub fn is_held(&self, pitch: &Pitch) -> bool {
        self.held.contains_key(&pitch.midi())
    }

    pub fn held(&self) -> impl Iterator<Item = &Pitch> {
        self.held.values()
    }
}

/// The key lit up `at` seconds into playback, if any note is sounding
pub fn highlighted_key(data: &PlaybackData, at: f64) -> Option<Pitch> {
    data.notes
        .iter()
        .find(|note| note.start <= at && at < note.release)
        .map(|note| note.pitch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::melody::{Melody, NoteEvent};
    use crate::playback::schedule;
    use crate::rhythm::{Duration, Tempo};

    #[derive(Default)]
    struct Events(Vec<String>);

    impl Player for Events {
        fn schedule_note(&mut self, pitch: &Pitch, _duration: f64, at: f64) {
            self.0.push(format!("play {} at {}", pitch, at));
        }

        fn attack(&mut self, pitch: &Pitch) {
            self.0.push(format!("attack {}", pitch));
        }

        fn release(&mut self, pitch: &Pitch) {
            self.0.push(format!("release {}", pitch));
        }
    }

    fn pitch(name: &str) -> Pitch {
        name.parse().unwrap()
    }

    #[test]
    fn test_forty_nine_keys() {
        let keys = piano_keys();
        assert_eq!(keys.len(), 49);
        assert_eq!(keys[0].pitch.to_string(), "C2");
        assert_eq!(keys[1].pitch.to_string(), "C#2");
        assert_eq!(keys[48].pitch.to_string(), "C6");
        assert_eq!(keys.iter().filter(|k| k.color == KeyColor::Black).count(), 20);
        assert!(keys.windows(2).all(|w| w[0].pitch < w[1].pitch));
    }

    #[test]
    fn test_key_colors() {
        let keys = piano_keys();
        let color = |name: &str| keys.iter().find(|k| k.pitch == pitch(name)).unwrap().color;
        assert_eq!(color("C4"), KeyColor::White);
        assert_eq!(color("F#4"), KeyColor::Black);
        assert_eq!(color("A#3"), KeyColor::Black);
        assert_eq!(color("E5"), KeyColor::White);
    }

    #[test]
    fn test_press_does_not_retrigger() {
        let mut keyboard = Keyboard::new();
        let mut player = Events::default();
        assert!(keyboard.press(&pitch("C4"), &mut player));
        assert!(!keyboard.press(&pitch("C4"), &mut player));
        assert!(keyboard.release(&pitch("C4"), &mut player));
        assert!(!keyboard.release(&pitch("C4"), &mut player));
        assert_eq!(player.0, vec!["attack C4", "release C4"]);
    }

    #[test]
    fn test_enharmonics_share_a_key() {
        let mut keyboard = Keyboard::new();
        let mut player = Events::default();
        keyboard.press(&pitch("A#3"), &mut player);
        assert!(keyboard.is_held(&pitch("Bb3")));
        assert!(!keyboard.press(&pitch("Bb3"), &mut player));
        keyboard.release(&pitch("Bb3"), &mut player);
        assert_eq!(player.0, vec!["attack A#3", "release A#3"]);
    }

    #[test]
    fn test_keys_off_the_keyboard_are_ignored() {
        let mut keyboard = Keyboard::new();
        let mut player = Events::default();
        assert!(!keyboard.press(&pitch("B1"), &mut player));
        assert!(!keyboard.press(&pitch("C#6"), &mut player));
        assert!(player.0.is_empty());
    }

    #[test]
    fn test_release_all() {
        let mut keyboard = Keyboard::new();
        let mut player = Events::default();
        keyboard.press(&pitch("E4"), &mut player);
        keyboard.press(&pitch("C4"), &mut player);
        keyboard.release_all(&mut player);
        assert_eq!(keyboard.held().count(), 0);
        assert_eq!(player.0, vec!["attack E4", "attack C4", "release C4", "release E4"]);
    }

    #[test]
    fn test_highlight_follows_playback() {
        let melody = Melody::new(vec![
            NoteEvent::new(pitch("C4"), Duration::Quarter),
            NoteEvent::new(pitch("G4"), Duration::Half),
        ]);
        let data = schedule(&melody, Tempo::default());
        assert_eq!(highlighted_key(&data, 0.0), Some(pitch("C4")));
        assert_eq!(highlighted_key(&data, 0.49), Some(pitch("C4")));
        assert_eq!(highlighted_key(&data, 0.5), Some(pitch("G4")));
        assert_eq!(highlighted_key(&data, 1.5), None);
    }
}
