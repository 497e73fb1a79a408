//! # Notation Layout
//!
//! Turns a melody into per-measure token strings for the notation renderer.
//!
//! ## Pipeline
//! 1. **Partition** - walk the melody, closing the current measure whenever
//!    the next event would push it past 4 beats. Events are never split, so a
//!    measure can close short.
//! 2. **Pad** - top up each short measure with rests, largest first
//!    (half, quarter, eighth, then sixteenth unless [`RestFill::EighthFloor`]).
//! 3. **Fit** - emit exactly the requested number of measures: missing or
//!    empty measures become a whole-measure rest, surplus measures are dropped.
//!
//! ## Token Format
//! - Note: `c#4/q` (renderer pitch name, `/`, duration code)
//! - Rest: `b4/h/r` (fixed placeholder pitch, duration code, rest marker)
//! - A measure is its tokens joined with `", "`
//!
//! ## Example
//! ```rust
//! use piano_drill::{layout, Duration, MeasureCount, Melody, NoteEvent, Pitch};
//!
//! let c4: Pitch = "C4".parse().unwrap();
//! let melody: Melody = (0..5).map(|_| NoteEvent::new(c4, Duration::Quarter)).collect();
//! let score = layout(&melody, MeasureCount::Four);
//!
//! assert_eq!(score.measure_strings(), vec![
//!     "c4/q, c4/q, c4/q, c4/q",
//!     "c4/q, b4/h/r, b4/q/r",
//!     "b4/w/r",
//!     "b4/w/r",
//! ]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::melody::{Melody, NoteEvent};
use crate::rhythm::{Duration, MeasureCount, BEATS_PER_MEASURE};

/// Pitch written for rests; the renderer positions rests by it
pub const REST_PLACEHOLDER: &str = "b4";

const EPSILON: f64 = 1e-9;

/// How far short measures are topped up with rests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestFill {
    /// Fill down to sixteenth rests so every measure totals 4 beats
    #[default]
    Complete,
    /// Stop at eighth rests, leaving any smaller remainder unfilled
    EighthFloor,
}

impl RestFill {
    fn units(self) -> &'static [Duration] {
        match self {
            RestFill::Complete => &[
                Duration::Half,
                Duration::Quarter,
                Duration::Eighth,
                Duration::Sixteenth,
            ],
            RestFill::EighthFloor => &[Duration::Half, Duration::Quarter, Duration::Eighth],
        }
    }
}

/// Layout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    pub rest_fill: RestFill,
}

/// One entry on the staff
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotationToken {
    Note(NoteEvent),
    Rest(Duration),
}

impl NotationToken {
    pub fn duration(&self) -> Duration {
        match self {
            NotationToken::Note(event) => event.duration,
            NotationToken::Rest(duration) => *duration,
        }
    }

    pub fn beats(&self) -> f64 {
        self.duration().beats()
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, NotationToken::Rest(_))
    }
}

impl fmt::Display for NotationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationToken::Note(event) => write!(
                f,
                "{}/{}",
                event.pitch.notation_name(),
                event.duration.notation_code()
            ),
            NotationToken::Rest(duration) => {
                write!(f, "{}/{}/r", REST_PLACEHOLDER, duration.notation_code())
            }
        }
    }
}

/// A laid-out measure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "String")]
pub struct MeasureLayout {
    pub tokens: Vec<NotationToken>,
}

impl MeasureLayout {
    fn whole_rest() -> Self {
        Self {
            tokens: vec![NotationToken::Rest(Duration::Whole)],
        }
    }

    /// Beats taken by notes, before padding
    pub fn note_beats(&self) -> f64 {
        self.tokens.iter().filter(|t| !t.is_rest()).map(NotationToken::beats).sum()
    }

    /// Beats including rests
    pub fn beats(&self) -> f64 {
        self.tokens.iter().map(NotationToken::beats).sum()
    }

    pub fn notes(&self) -> impl Iterator<Item = &NoteEvent> {
        self.tokens.iter().filter_map(|t| match t {
            NotationToken::Note(event) => Some(event),
            NotationToken::Rest(_) => None,
        })
    }
}

impl fmt::Display for MeasureLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl From<MeasureLayout> for String {
    fn from(measure: MeasureLayout) -> Self {
        measure.to_string()
    }
}

/// Canvas size hint for the renderer, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn for_measures(count: MeasureCount) -> Self {
        match count {
            MeasureCount::Two => Self {
                width: 800,
                height: 250,
            },
            MeasureCount::Four => Self {
                width: 1200,
                height: 500,
            },
        }
    }
}

/// Everything the renderer needs: canvas size and one token string per measure.
/// The first measure carries the treble clef and 4/4 time signature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreLayout {
    pub measure_count: MeasureCount,
    pub canvas: CanvasSize,
    pub measures: Vec<MeasureLayout>,
}

impl ScoreLayout {
    pub fn measure_strings(&self) -> Vec<String> {
        self.measures.iter().map(|m| m.to_string()).collect()
    }
}

/// The notation-rendering collaborator
pub trait ScoreRenderer {
    fn render(&mut self, score: &ScoreLayout);
}

/// Greedy, non-splitting packing of events into 4-beat measures.
///
/// A measure closes as soon as the next event does not fit, even when it
/// is short of 4 beats; that event opens the next measure.
pub fn partition(melody: &Melody) -> Vec<Vec<NoteEvent>> {
    let mut measures = Vec::new();
    let mut current: Vec<NoteEvent> = Vec::new();
    let mut current_beats = 0.0;

    for event in melody {
        let beats = event.beats();
        if !current.is_empty() && current_beats + beats > BEATS_PER_MEASURE + EPSILON {
            measures.push(std::mem::take(&mut current));
            current_beats = 0.0;
        }
        current.push(*event);
        current_beats += beats;
    }

    if !current.is_empty() {
        measures.push(current);
    }
    measures
}

/// Rests that top up a measure holding `filled` beats, largest first.
/// A full measure gets none.
pub fn padding_rests(filled: f64, fill: RestFill) -> Vec<Duration> {
    let mut remaining = BEATS_PER_MEASURE - filled;
    let mut rests = Vec::new();

    for &unit in fill.units() {
        while remaining + EPSILON >= unit.beats() {
            rests.push(unit);
            remaining -= unit.beats();
        }
    }

    if remaining > EPSILON {
        warn!(remaining, "measure left short of 4 beats");
    }
    rests
}

fn layout_measure(events: &[NoteEvent], fill: RestFill) -> MeasureLayout {
    if events.is_empty() {
        return MeasureLayout::whole_rest();
    }
    let filled: f64 = events.iter().map(NoteEvent::beats).sum();
    let mut tokens: Vec<NotationToken> = events.iter().copied().map(NotationToken::Note).collect();
    tokens.extend(padding_rests(filled, fill).into_iter().map(NotationToken::Rest));
    MeasureLayout { tokens }
}

/// Lay out `melody` as exactly `count` measures with the default options
pub fn layout(melody: &Melody, count: MeasureCount) -> ScoreLayout {
    layout_with(melody, count, LayoutOptions::default())
}

pub fn layout_with(melody: &Melody, count: MeasureCount, options: LayoutOptions) -> ScoreLayout {
    let mut groups = partition(melody);
    if groups.len() > count.count() {
        warn!(
            measures = groups.len(),
            expected = count.count(),
            "melody overflows the score, dropping trailing measures"
        );
        groups.truncate(count.count());
    }

    let measures: Vec<MeasureLayout> = (0..count.count())
        .map(|i| match groups.get(i) {
            Some(events) => layout_measure(events, options.rest_fill),
            None => MeasureLayout::whole_rest(),
        })
        .collect();
    debug!(events = melody.len(), measures = measures.len(), "laid out score");

    ScoreLayout {
        measure_count: count,
        canvas: CanvasSize::for_measures(count),
        measures,
    }
}
