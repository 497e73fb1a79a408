//! # Practice Session
//!
//! Caller-side state around the stateless core: which drill to generate,
//! what to show, whether playback is still in flight, and the last melody
//! for replay.
//!
//! ## Busy flag
//! A new round (or a replay) is refused while the previous playback is
//! still sounding. The session cannot see the player's clock, so the caller
//! calls [`PracticeSession::finish_playback`] once `total_seconds` of the
//! round have elapsed.
//!
//! ## Missing collaborators
//! Without a player nothing is generated. Without a renderer the round is
//! still composed and played; the score is simply not drawn.

use rand::RngCore;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::PracticeConfig;
use crate::generator::{ChordStrategy, Composition, MelodyStrategy, ScaleStrategy, StrategyKind};
use crate::layout::{layout_with, LayoutOptions, RestFill, ScoreLayout, ScoreRenderer};
use crate::library::Library;
use crate::pitch::PitchClass;
use crate::playback::{play, PlaybackData, Player};
use crate::rhythm::{MeasureCount, Tempo};
use crate::solfege::{solfege_captions, SolfegeCaption};

/// Everything produced by one regeneration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub composition: Composition,
    pub layout: ScoreLayout,
    pub captions: Vec<SolfegeCaption>,
    pub schedule: PlaybackData,
    pub total_seconds: f64,
}

#[derive(Debug, Clone)]
pub struct PracticeSession {
    pub measures: MeasureCount,
    pub key: PitchClass,
    pub mode: StrategyKind,
    pub tempo: Tempo,
    pub rest_fill: RestFill,
    pub show_score: bool,
    pub show_solfege: bool,
    library: Library,
    busy: bool,
    last: Option<Composition>,
}

impl Default for PracticeSession {
    fn default() -> Self {
        Self::new(PracticeConfig::default())
    }
}

impl PracticeSession {
    pub fn new(config: PracticeConfig) -> Self {
        Self {
            measures: config.measures,
            key: config.key,
            mode: config.mode,
            tempo: config.tempo,
            rest_fill: config.rest_fill,
            show_score: config.show_score,
            show_solfege: config.show_solfege,
            library: config.library,
            busy: false,
            last: None,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_composition(&self) -> Option<&Composition> {
        self.last.as_ref()
    }

    pub fn can_replay(&self) -> bool {
        !self.busy && self.last.as_ref().is_some_and(|c| !c.melody.is_empty())
    }

    /// Measures on the staff. Chord drills always span four measures, one
    /// chord each.
    pub fn score_measures(&self) -> MeasureCount {
        self.measures_for(self.mode)
    }

    fn measures_for(&self, kind: StrategyKind) -> MeasureCount {
        match kind {
            StrategyKind::Scale => self.measures,
            StrategyKind::Chords => MeasureCount::Four,
        }
    }

    fn strategy(&self) -> Box<dyn MelodyStrategy + '_> {
        match self.mode {
            StrategyKind::Scale => Box::new(ScaleStrategy::new(
                &self.library.scales,
                &self.library.scale_rhythms,
                self.measures,
            )),
            StrategyKind::Chords => Box::new(ChordStrategy::new(
                &self.library.progressions,
                &self.library.chord_rhythms,
                self.key,
            )),
        }
    }

    /// Compose a new melody, draw it, and start playing it.
    ///
    /// Returns `None` without touching any state when a round is still
    /// playing or no player is available.
    pub fn regenerate(
        &mut self,
        rng: &mut dyn RngCore,
        player: Option<&mut dyn Player>,
        renderer: Option<&mut dyn ScoreRenderer>,
    ) -> Option<Round> {
        if self.busy {
            debug!("playback in progress, ignoring regenerate");
            return None;
        }
        let Some(player) = player else {
            debug!("no player available, ignoring regenerate");
            return None;
        };

        let strategy = self.strategy();
        let kind = strategy.kind();
        debug!(kind = ?kind, "composing");
        let composition = strategy.compose(rng);
        drop(strategy);

        let options = LayoutOptions {
            rest_fill: self.rest_fill,
        };
        let layout = layout_with(&composition.melody, self.measures_for(kind), options);
        if let Some(renderer) = renderer {
            renderer.render(&layout);
        }
        let captions = solfege_captions(&composition.melody);
        let schedule = play(&composition.melody, self.tempo, player);

        info!(
            label = %composition.label,
            notes = composition.melody.len(),
            seconds = schedule.total_seconds,
            "new drill"
        );
        self.busy = !schedule.notes.is_empty();
        self.last = Some(composition.clone());

        Some(Round {
            composition,
            layout,
            captions,
            total_seconds: schedule.total_seconds,
            schedule,
        })
    }

    /// Play the last melody again, if idle and there is one
    pub fn replay(&mut self, player: Option<&mut dyn Player>) -> Option<PlaybackData> {
        if !self.can_replay() {
            return None;
        }
        let player = player?;
        let composition = self.last.as_ref()?;
        let schedule = play(&composition.melody, self.tempo, player);
        self.busy = true;
        Some(schedule)
    }

    pub fn finish_playback(&mut self) {
        self.busy = false;
    }

    pub fn toggle_measure_count(&mut self) -> MeasureCount {
        self.measures = self.measures.toggled();
        self.measures
    }

    pub fn toggle_score(&mut self) -> bool {
        self.show_score = !self.show_score;
        self.show_score
    }

    pub fn toggle_solfege(&mut self) -> bool {
        self.show_solfege = !self.show_solfege;
        self.show_solfege
    }
}
