//! # Rhythm Types
//!
//! Durations, the measure-count toggle and tempo. Everything here assumes
//! 4/4: a measure holds [`BEATS_PER_MEASURE`] quarter-note beats.
//!
//! Durations are written in configuration files with the tone codes the
//! playback side understands (`2n` = half note, `4n` = quarter, ...), and in
//! notation tokens with the renderer's codes (`h`, `q`, `8`, `16`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrillError;

/// Beats in one 4/4 measure
pub const BEATS_PER_MEASURE: f64 = 4.0;

/// Note duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Duration {
    Whole,
    Half,
    #[default]
    Quarter,
    Eighth,
    Sixteenth,
}

impl Duration {
    /// Duration in quarter-note beats
    pub fn beats(self) -> f64 {
        match self {
            Duration::Whole => 4.0,
            Duration::Half => 2.0,
            Duration::Quarter => 1.0,
            Duration::Eighth => 0.5,
            Duration::Sixteenth => 0.25,
        }
    }

    /// Duration code used in notation tokens
    pub fn notation_code(self) -> &'static str {
        match self {
            Duration::Whole => "w",
            Duration::Half => "h",
            Duration::Quarter => "q",
            Duration::Eighth => "8",
            Duration::Sixteenth => "16",
        }
    }

    /// Duration code used by the playback side and in configuration files
    pub fn tone_code(self) -> &'static str {
        match self {
            Duration::Whole => "1n",
            Duration::Half => "2n",
            Duration::Quarter => "4n",
            Duration::Eighth => "8n",
            Duration::Sixteenth => "16n",
        }
    }

    /// Length in seconds at `tempo`
    pub fn seconds(self, tempo: Tempo) -> f64 {
        self.beats() * tempo.seconds_per_beat()
    }

    /// MusicXML type name
    pub fn musicxml_type(self) -> &'static str {
        match self {
            Duration::Whole => "whole",
            Duration::Half => "half",
            Duration::Quarter => "quarter",
            Duration::Eighth => "eighth",
            Duration::Sixteenth => "16th",
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tone_code())
    }
}

impl FromStr for Duration {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1n" | "w" => Ok(Duration::Whole),
            "2n" | "h" => Ok(Duration::Half),
            "4n" | "q" => Ok(Duration::Quarter),
            "8n" | "8" => Ok(Duration::Eighth),
            "16n" | "16" => Ok(Duration::Sixteenth),
            other => Err(DrillError::InvalidDuration(other.to_string())),
        }
    }
}

impl TryFrom<String> for Duration {
    type Error = DrillError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Duration> for String {
    fn from(duration: Duration) -> Self {
        duration.tone_code().to_string()
    }
}

/// A sequence of durations drawn as a whole when composing.
pub type RhythmPattern = Vec<Duration>;

/// Sum of beats in a rhythm
pub fn total_beats(rhythm: &[Duration]) -> f64 {
    rhythm.iter().map(|d| d.beats()).sum()
}

/// Drill length: two or four measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MeasureCount {
    Two,
    #[default]
    Four,
}

impl MeasureCount {
    pub fn count(self) -> usize {
        match self {
            MeasureCount::Two => 2,
            MeasureCount::Four => 4,
        }
    }

    /// Total beat budget for the drill
    pub fn beats(self) -> f64 {
        self.count() as f64 * BEATS_PER_MEASURE
    }

    pub fn toggled(self) -> Self {
        match self {
            MeasureCount::Two => MeasureCount::Four,
            MeasureCount::Four => MeasureCount::Two,
        }
    }
}

impl TryFrom<u8> for MeasureCount {
    type Error = DrillError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(MeasureCount::Two),
            4 => Ok(MeasureCount::Four),
            other => Err(DrillError::InvalidMeasureCount(other.to_string())),
        }
    }
}

impl From<MeasureCount> for u8 {
    fn from(count: MeasureCount) -> Self {
        count.count() as u8
    }
}

impl FromStr for MeasureCount {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DrillError::InvalidMeasureCount(s.to_string());
        let n = s.trim().parse::<u8>().map_err(|_| invalid())?;
        MeasureCount::try_from(n).map_err(|_| invalid())
    }
}

/// Playback tempo in quarter-note beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tempo {
    pub bpm: u16,
}

impl Default for Tempo {
    fn default() -> Self {
        Self { bpm: 120 }
    }
}

impl Tempo {
    pub fn seconds_per_beat(self) -> f64 {
        60.0 / self.bpm.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_values() {
        assert_eq!(Duration::Whole.beats(), 4.0);
        assert_eq!(Duration::Half.beats(), 2.0);
        assert_eq!(Duration::Quarter.beats(), 1.0);
        assert_eq!(Duration::Eighth.beats(), 0.5);
        assert_eq!(Duration::Sixteenth.beats(), 0.25);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Duration::Half.notation_code(), "h");
        assert_eq!(Duration::Quarter.notation_code(), "q");
        assert_eq!(Duration::Eighth.notation_code(), "8");
        assert_eq!(Duration::Sixteenth.notation_code(), "16");
        assert_eq!("2n".parse::<Duration>().unwrap(), Duration::Half);
        assert_eq!("16n".parse::<Duration>().unwrap(), Duration::Sixteenth);
        assert!(matches!("3n".parse::<Duration>(), Err(DrillError::InvalidDuration(_))));
    }

    #[test]
    fn test_seconds_at_default_tempo() {
        // 120 bpm: the timings the practice widget has always used
        let tempo = Tempo::default();
        assert_eq!(Duration::Half.seconds(tempo), 1.0);
        assert_eq!(Duration::Quarter.seconds(tempo), 0.5);
        assert_eq!(Duration::Eighth.seconds(tempo), 0.25);
        assert_eq!(Duration::Sixteenth.seconds(tempo), 0.125);
    }

    #[test]
    fn test_measure_count() {
        assert_eq!(MeasureCount::Two.beats(), 8.0);
        assert_eq!(MeasureCount::Four.beats(), 16.0);
        assert_eq!(MeasureCount::Two.toggled(), MeasureCount::Four);
        assert_eq!("2".parse::<MeasureCount>().unwrap(), MeasureCount::Two);
        assert!("3".parse::<MeasureCount>().is_err());
        assert!("four".parse::<MeasureCount>().is_err());
    }

    #[test]
    fn test_total_beats() {
        use Duration::*;
        assert_eq!(total_beats(&[Half, Quarter, Quarter, Eighth, Eighth]), 5.0);
        assert_eq!(total_beats(&[]), 0.0);
    }
}
