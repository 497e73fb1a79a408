//! Randomized melody drills for piano practice.
//!
//! A drill is a short melody (two or four measures of 4/4) drawn either
//! freely from a scale or from the triads of a chord progression. The crate
//! composes it, lays it out as per-measure notation tokens, captions it with
//! fixed-do solfège and schedules it for playback. Sound and drawing are left
//! to the caller through the [`Player`] and [`ScoreRenderer`] traits.

pub mod config;
pub mod error;
pub mod generator;
pub mod keyboard;
pub mod layout;
pub mod library;
pub mod melody;
pub mod musicxml;
pub mod pitch;
pub mod playback;
pub mod rhythm;
pub mod session;
pub mod solfege;
pub mod transpose;

pub use config::PracticeConfig;
pub use error::*;
pub use generator::{
    triad, ChordStrategy, Composition, MelodyStrategy, ScaleStrategy, StrategyKind,
};
pub use keyboard::{piano_keys, Keyboard, PianoKey};
pub use layout::{layout, layout_with, LayoutOptions, RestFill, ScoreLayout, ScoreRenderer};
pub use library::{Library, Mode};
pub use melody::{Melody, NoteEvent};
pub use musicxml::to_musicxml;
pub use pitch::{Accidental, NoteName, Pitch, PitchClass, SpellingPolicy};
pub use playback::{PlaybackData, Player};
pub use rhythm::{Duration, MeasureCount, Tempo};
pub use session::{PracticeSession, Round};
pub use solfege::{solfege_captions, SolfegeCaption, Syllable};
