//! # Melody Generation
//!
//! Random melodies that exactly fill a two- or four-measure budget.
//!
//! ## Strategies
//! Both ways of composing implement [`MelodyStrategy`], so callers pick one
//! at runtime and treat them the same afterwards:
//! - [`ScaleStrategy`] - picks a mode, a scale and a rhythm, then draws every
//!   pitch freely from the scale
//! - [`ChordStrategy`] - picks a chord progression (transposed into the
//!   current key) and a rhythm, then draws every pitch from the triad of the
//!   chord sounding at that point
//!
//! ## Randomness
//! Every draw goes through the `&mut dyn RngCore` handed to `compose`, so a
//! seeded generator reproduces a drill exactly.
//!
//! ## Example
//! ```rust
//! use piano_drill::{Library, MeasureCount, MelodyStrategy, ScaleStrategy};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let library = Library::default();
//! let strategy = ScaleStrategy::new(&library.scales, &library.scale_rhythms, MeasureCount::Two);
//! let composition = strategy.compose(&mut StdRng::seed_from_u64(1));
//!
//! assert_eq!(composition.melody.total_beats(), 8.0);
//! ```

mod chord;
mod scale;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::melody::Melody;

pub use chord::{compose_over_progression, generate_chord_melody, triad, ChordStrategy};
pub use scale::{compose_over_scale, generate_scale_melody, ScaleStrategy};

/// Which strategy produced a composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Scale,
    Chords,
}

/// A generated melody plus the tonal context it was drawn from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub kind: StrategyKind,
    /// Display label for the context, e.g. "G major" or "I-IV-V-I in D"
    pub label: String,
    pub melody: Melody,
}

/// A way of composing a melody
pub trait MelodyStrategy {
    fn kind(&self) -> StrategyKind;

    fn compose(&self, rng: &mut dyn RngCore) -> Composition;
}

