//! # Playback Module
//!
//! Schedule a melody for the audio collaborator.
//!
//! ## Purpose
//! The core never produces sound. It computes, for each note, when to start
//! and how long to hold it, then hands those offsets to a [`Player`]
//! (fire-and-forget). The player owns the clock; once notes are handed over
//! there is no cancelling them.
//!
//! ## Sub-modules
//! - `types` - ScheduledNote, PlaybackData and the Player trait
//! - `engine` - offset computation and dispatch
//!
//! ## Timing
//! - Start offsets are the running sum of earlier durations, converted to
//!   seconds at the tempo (120 bpm: quarter = 0.5 s)
//! - Starts never decrease, and every release is strictly after its start
//! - `PlaybackData::total_seconds` is when the last note releases; callers
//!   keep their busy flag set until then
//!
//! ## Example
//! ```rust
//! use piano_drill::playback::schedule;
//! use piano_drill::{Duration, Melody, NoteEvent, Pitch, Tempo};
//!
//! let c4: Pitch = "C4".parse().unwrap();
//! let melody = Melody::new(vec![
//!     NoteEvent::new(c4, Duration::Half),
//!     NoteEvent::new(c4, Duration::Quarter),
//! ]);
//! let data = schedule(&melody, Tempo::default());
//!
//! assert_eq!(data.notes[1].start, 1.0);
//! assert_eq!(data.total_seconds, 1.5);
//! ```

mod engine;
mod types;

#[cfg(test)]
mod tests;

pub use engine::{play, schedule};
pub use types::{PlaybackData, Player, ScheduledNote};
