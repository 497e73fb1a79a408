//! # Drill Library
//!
//! The tonal material and rhythm tables melodies are drawn from.
//!
//! ## Contents
//! - Scales: twelve major and twelve minor scales, each eight pitches from
//!   tonic to upper tonic, written around octave 4
//! - Scale rhythms: patterns per measure count, each summing to exactly
//!   `measures * 4` beats
//! - Progressions: chord-root sequences in a home key (C), one root per
//!   measure
//! - Chord rhythms: four-measure patterns used under a progression
//!
//! ## Validation
//! Generators trust the tables. A pattern with the wrong beat sum is a
//! configuration defect, so [`Library::validate`] is run when a custom library
//! is loaded, never while composing.
//!
//! ## YAML
//! ```yaml
//! home-key: C
//! progressions:
//!   - name: I-IV-V-I
//!     roots: [C4, F4, G4, C4]
//! chord-rhythms:
//!   - [2n, 2n, 2n, 2n, 2n, 2n, 2n, 2n]
//! ```
//! Sections left out keep their built-in contents.

use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::pitch::{NoteName, Pitch, PitchClass};
use crate::rhythm::{total_beats, Duration, MeasureCount, RhythmPattern, BEATS_PER_MEASURE};

/// Scale family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Major, Mode::Minor];
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Major => f.write_str("major"),
            Mode::Minor => f.write_str("minor"),
        }
    }
}

/// A scale with its display name ("G major")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScale {
    pub name: String,
    pub pitches: Vec<Pitch>,
}

impl NamedScale {
    pub fn contains(&self, pitch: &Pitch) -> bool {
        self.pitches.contains(pitch)
    }
}

/// Scales grouped by mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleLibrary {
    pub major: Vec<NamedScale>,
    pub minor: Vec<NamedScale>,
}

impl ScaleLibrary {
    pub fn scales(&self, mode: Mode) -> &[NamedScale] {
        match mode {
            Mode::Major => &self.major,
            Mode::Minor => &self.minor,
        }
    }
}

/// Scale-melody rhythms keyed by measure count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleRhythms {
    pub two: Vec<RhythmPattern>,
    pub four: Vec<RhythmPattern>,
}

impl ScaleRhythms {
    pub fn for_measures(&self, count: MeasureCount) -> &[RhythmPattern] {
        match count {
            MeasureCount::Two => &self.two,
            MeasureCount::Four => &self.four,
        }
    }
}

/// A named sequence of chord roots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub name: String,
    pub roots: Vec<Pitch>,
}

/// Progressions written in a single home key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProgressionLibrary {
    pub home_key: PitchClass,
    pub progressions: Vec<Progression>,
}

/// Everything the generators draw from
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    pub scales: ScaleLibrary,
    pub scale_rhythms: ScaleRhythms,
    pub progressions: ProgressionLibrary,
    pub chord_rhythms: Vec<RhythmPattern>,
}

/// Library sections as they appear in YAML; every section is optional
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawLibrary {
    pub scales: Option<ScaleLibrary>,
    pub scale_rhythms: Option<ScaleRhythms>,
    pub home_key: Option<PitchClass>,
    pub progressions: Option<Vec<Progression>>,
    pub chord_rhythms: Option<Vec<RhythmPattern>>,
}

const MAJOR_SCALES: [(&str, [&str; 8]); 12] = [
    ("C major", ["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5"]),
    ("G major", ["G4", "A4", "B4", "C5", "D5", "E5", "F#5", "G5"]),
    ("D major", ["D4", "E4", "F#4", "G4", "A4", "B4", "C#5", "D5"]),
    ("A major", ["A4", "B4", "C#5", "D5", "E5", "F#5", "G#5", "A5"]),
    ("E major", ["E4", "F#4", "G#4", "A4", "B4", "C#5", "D#5", "E5"]),
    ("B major", ["B4", "C#5", "D#5", "E5", "F#5", "G#5", "A#5", "B5"]),
    ("F major", ["F4", "G4", "A4", "Bb4", "C5", "D5", "E5", "F5"]),
    ("Bb major", ["Bb4", "C5", "D5", "Eb5", "F5", "G5", "A5", "Bb5"]),
    ("Eb major", ["Eb4", "F4", "G4", "Ab4", "Bb4", "C5", "D5", "Eb5"]),
    ("Ab major", ["Ab4", "Bb4", "C5", "Db5", "Eb5", "F5", "G5", "Ab5"]),
    ("Db major", ["Db4", "Eb4", "F4", "Gb4", "Ab4", "Bb4", "C5", "Db5"]),
    ("Gb major", ["Gb4", "Ab4", "Bb4", "Cb5", "Db5", "Eb5", "F5", "Gb5"]),
];

const MINOR_SCALES: [(&str, [&str; 8]); 12] = [
    ("A minor", ["A4", "B4", "C5", "D5", "E5", "F5", "G5", "A5"]),
    ("E minor", ["E4", "F#4", "G4", "A4", "B4", "C5", "D5", "E5"]),
    ("B minor", ["B4", "C#5", "D5", "E5", "F#5", "G5", "A5", "B5"]),
    ("F# minor", ["F#4", "G#4", "A4", "B4", "C#5", "D5", "E5", "F#5"]),
    ("C# minor", ["C#4", "D#4", "E4", "F#4", "G#4", "A4", "B4", "C#5"]),
    ("G# minor", ["G#4", "A#4", "B4", "C#5", "D#5", "E5", "F#5", "G#5"]),
    ("D minor", ["D4", "E4", "F4", "G4", "A4", "Bb4", "C5", "D5"]),
    ("G minor", ["G4", "A4", "Bb4", "C5", "D5", "Eb5", "F5", "G5"]),
    ("C minor", ["C4", "D4", "Eb4", "F4", "G4", "Ab4", "Bb4", "C5"]),
    ("F minor", ["F4", "G4", "Ab4", "Bb4", "C5", "Db5", "Eb5", "F5"]),
    ("Bb minor", ["Bb4", "C5", "Db5", "Eb5", "F5", "Gb5", "Ab5", "Bb5"]),
    ("Eb minor", ["Eb4", "F4", "Gb4", "Ab4", "Bb4", "Cb5", "Db5", "Eb5"]),
];

const PROGRESSIONS: [(&str, [&str; 4]); 5] = [
    ("I-IV-V-I", ["C4", "F4", "G4", "C4"]),
    ("I-vi-IV-V", ["C4", "A4", "F4", "G4"]),
    ("I-V-vi-IV", ["C4", "G4", "A4", "F4"]),
    ("ii-V-I-I", ["D4", "G4", "C4", "C4"]),
    ("vi-IV-I-V", ["A4", "F4", "C4", "G4"]),
];

fn pitches(names: &[&str]) -> Vec<Pitch> {
    names.iter().filter_map(|name| name.parse().ok()).collect()
}

fn named_scales(table: &[(&str, [&str; 8])]) -> Vec<NamedScale> {
    table
        .iter()
        .map(|(name, notes)| NamedScale {
            name: name.to_string(),
            pitches: pitches(notes),
        })
        .collect()
}

fn two_measure_rhythms() -> Vec<RhythmPattern> {
    use Duration::*;
    vec![
        vec![Quarter; 8],
        vec![Half; 4],
        vec![Half, Quarter, Quarter, Half, Quarter, Quarter],
        vec![Quarter, Quarter, Half, Quarter, Quarter, Half],
        vec![
            Eighth, Eighth, Quarter, Quarter, Quarter, Eighth, Eighth, Quarter, Quarter, Quarter,
        ],
        vec![
            Quarter, Eighth, Eighth, Quarter, Quarter, Quarter, Eighth, Eighth, Quarter, Quarter,
        ],
    ]
}

fn four_measure_rhythms() -> Vec<RhythmPattern> {
    use Duration::*;
    let eighth_bar = [Eighth, Eighth, Quarter, Quarter, Quarter];
    vec![
        vec![Quarter; 16],
        vec![Half; 8],
        vec![Half, Quarter, Quarter, Half, Half, Quarter, Quarter, Half, Half, Half],
        eighth_bar.repeat(4),
    ]
}

impl Default for Library {
    fn default() -> Self {
        Self {
            scales: ScaleLibrary {
                major: named_scales(&MAJOR_SCALES),
                minor: named_scales(&MINOR_SCALES),
            },
            scale_rhythms: ScaleRhythms {
                two: two_measure_rhythms(),
                four: four_measure_rhythms(),
            },
            progressions: ProgressionLibrary {
                home_key: PitchClass::natural(NoteName::C),
                progressions: PROGRESSIONS
                    .iter()
                    .map(|(name, roots)| Progression {
                        name: name.to_string(),
                        roots: pitches(roots),
                    })
                    .collect(),
            },
            chord_rhythms: four_measure_rhythms(),
        }
    }
}

impl Library {
    /// Built-in library with any sections present in `raw` swapped in
    pub fn from_raw(raw: RawLibrary) -> Self {
        let mut library = Library::default();
        if let Some(scales) = raw.scales {
            library.scales = scales;
        }
        if let Some(rhythms) = raw.scale_rhythms {
            library.scale_rhythms = rhythms;
        }
        if let Some(home_key) = raw.home_key {
            library.progressions.home_key = home_key;
        }
        if let Some(progressions) = raw.progressions {
            library.progressions.progressions = progressions;
        }
        if let Some(rhythms) = raw.chord_rhythms {
            library.chord_rhythms = rhythms;
        }
        library
    }

    /// Parse and validate a library from YAML
    pub fn from_yaml(source: &str) -> Result<Self, DrillError> {
        let raw: RawLibrary = serde_yaml::from_str(source)?;
        let library = Self::from_raw(raw);
        library.validate()?;
        Ok(library)
    }

    /// Check the table invariants the generators rely on:
    /// 1. Every rhythm pattern sums to its beat budget
    /// 2. Every mode has at least one non-empty scale
    /// 3. There is at least one progression and none is empty
    /// 4. Each chord rhythm gives every root of every progression one measure
    pub fn validate(&self) -> Result<(), DrillError> {
        for count in [MeasureCount::Two, MeasureCount::Four] {
            let label = match count {
                MeasureCount::Two => "two measures",
                MeasureCount::Four => "four measures",
            };
            validate_rhythms(self.scale_rhythms.for_measures(count), count.beats(), label)?;
        }
        validate_rhythms(
            &self.chord_rhythms,
            MeasureCount::Four.beats(),
            "chord rhythms",
        )?;

        for mode in Mode::ALL {
            let scales = self.scales.scales(mode);
            if scales.is_empty() {
                return Err(DrillError::Config(format!("no {} scales", mode)));
            }
            if let Some(scale) = scales.iter().find(|s| s.pitches.is_empty()) {
                return Err(DrillError::Config(format!("scale '{}' has no pitches", scale.name)));
            }
        }

        if self.progressions.progressions.is_empty() {
            return Err(DrillError::Config("no chord progressions".to_string()));
        }
        if let Some(p) = self.progressions.progressions.iter().find(|p| p.roots.is_empty()) {
            return Err(DrillError::Config(format!("progression '{}' has no roots", p.name)));
        }

        // One chord per measure: every chord rhythm must span exactly as many
        // measures as each progression has roots
        for p in &self.progressions.progressions {
            let expected = p.roots.len() as f64 * BEATS_PER_MEASURE;
            for (i, rhythm) in self.chord_rhythms.iter().enumerate() {
                let beats = total_beats(rhythm);
                if (beats - expected).abs() > 0.001 {
                    return Err(DrillError::Config(format!(
                        "progression '{}' has {} roots but chord rhythm {} has {} beats, expected {}",
                        p.name,
                        p.roots.len(),
                        i + 1,
                        beats,
                        expected
                    )));
                }
            }
        }

        Ok(())
    }
}

fn validate_rhythms(patterns: &[RhythmPattern], expected: f64, label: &str) -> Result<(), DrillError> {
    if patterns.is_empty() {
        return Err(DrillError::Config(format!("no rhythm patterns for {}", label)));
    }
    for (i, pattern) in patterns.iter().enumerate() {
        let beats = total_beats(pattern);
        // Allow some floating point tolerance
        if (beats - expected).abs() > 0.001 {
            return Err(DrillError::Config(format!(
                "rhythm {} of {} has {} beats, expected {}",
                i + 1,
                label,
                beats,
                expected
            )));
        }
    }
    Ok(())
}
