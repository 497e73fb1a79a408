//! # Practice Configuration
//!
//! Settings for a drill session, read from YAML with kebab-case keys.
//! Every key is optional:
//!
//! ```yaml
//! tempo: 120          # quarter notes per minute
//! measures: 4         # 2 or 4
//! key: G              # key root for chord drills
//! mode: chords        # scale | chords
//! seed: 7             # fixed seed for reproducible drills
//! rest-fill: complete # complete | eighth-floor
//! show-score: true
//! show-solfege: false
//! library:            # custom tables; omitted sections use built-ins
//!   progressions:
//!     - name: I-IV-V-I
//!       roots: [C4, F4, G4, C4]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::DrillError;
use crate::generator::StrategyKind;
use crate::layout::RestFill;
use crate::library::{Library, RawLibrary};
use crate::pitch::PitchClass;
use crate::rhythm::{MeasureCount, Tempo};
use crate::transpose::parse_key;

/// Raw configuration as it appears in YAML
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    tempo: Option<Tempo>,
    measures: Option<MeasureCount>,
    key: Option<String>,
    mode: Option<StrategyKind>,
    seed: Option<u64>,
    rest_fill: Option<RestFill>,
    show_score: Option<bool>,
    show_solfege: Option<bool>,
    library: Option<RawLibrary>,
}

/// Resolved session settings
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeConfig {
    pub tempo: Tempo,
    pub measures: MeasureCount,
    pub key: PitchClass,
    pub mode: StrategyKind,
    pub seed: Option<u64>,
    pub rest_fill: RestFill,
    pub show_score: bool,
    pub show_solfege: bool,
    pub library: Library,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            tempo: Tempo::default(),
            measures: MeasureCount::default(),
            key: PitchClass::default(),
            mode: StrategyKind::default(),
            seed: None,
            rest_fill: RestFill::default(),
            show_score: false,
            show_solfege: false,
            library: Library::default(),
        }
    }
}

impl PracticeConfig {
    pub fn from_yaml(source: &str) -> Result<Self, DrillError> {
        let raw: RawConfig = serde_yaml::from_str(source)?;

        let key = match &raw.key {
            Some(key) => parse_key(key)?,
            None => PitchClass::default(),
        };

        let tempo = raw.tempo.unwrap_or_default();
        if tempo.bpm == 0 {
            return Err(DrillError::Config("tempo must be above 0".to_string()));
        }

        let library = match raw.library {
            Some(raw_library) => {
                let library = Library::from_raw(raw_library);
                library.validate()?;
                library
            }
            None => Library::default(),
        };

        Ok(Self {
            tempo,
            measures: raw.measures.unwrap_or_default(),
            key,
            mode: raw.mode.unwrap_or_default(),
            seed: raw.seed,
            rest_fill: raw.rest_fill.unwrap_or_default(),
            show_score: raw.show_score.unwrap_or(false),
            show_solfege: raw.show_solfege.unwrap_or(false),
            library,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DrillError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading practice config");
        Self::from_yaml(&source)
    }
}
