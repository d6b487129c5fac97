//! Outbound sound cues.
//!
//! The core announces discrete events to a [`CueSink`]. How a cue is
//! rendered is up to the sink; failed deliveries are logged and dropped.

use serde::Serialize;

use crate::error::AudioResult;

/// A discrete event that should trigger a short sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cue {
    /// The wheel started turning.
    SpinStarted,
    /// The wheel settled on a good moment.
    ResultGood,
    /// The wheel settled on a bad moment.
    ResultBad,
    /// The die was thrown.
    DiceRolled,
    /// A counter went up.
    ScoreUp,
    /// A counter went down.
    ScoreDown,
}

impl Cue {
    /// Kebab-case tag of the cue.
    pub fn tag(self) -> &'static str {
        match self {
            Self::SpinStarted => "spin-started",
            Self::ResultGood => "result-good",
            Self::ResultBad => "result-bad",
            Self::DiceRolled => "dice-rolled",
            Self::ScoreUp => "score-up",
            Self::ScoreDown => "score-down",
        }
    }

    /// Result cue for a section classification.
    pub fn for_result(is_good: bool) -> Self {
        if is_good { Self::ResultGood } else { Self::ResultBad }
    }
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Receives cues from the session.
pub trait CueSink {
    /// Play `cue` at `volume` (0.0 to 1.0).
    fn play(&mut self, cue: Cue, volume: f32) -> AudioResult<()>;
}

/// A sink that discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl CueSink for SilentSink {
    fn play(&mut self, _cue: Cue, _volume: f32) -> AudioResult<()> {
        Ok(())
    }
}

/// A sink that remembers every cue it was given, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    cues: std::rc::Rc<std::cell::RefCell<Vec<(Cue, f32)>>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues received so far. Clones share the same log.
    pub fn cues(&self) -> Vec<Cue> {
        self.cues.borrow().iter().map(|(cue, _)| *cue).collect()
    }

    /// Volume the most recent cue was played at.
    pub fn last_volume(&self) -> Option<f32> {
        self.cues.borrow().last().map(|(_, volume)| *volume)
    }

    /// Forget all recorded cues.
    pub fn clear(&self) {
        self.cues.borrow_mut().clear();
    }
}

impl CueSink for RecordingSink {
    fn play(&mut self, cue: Cue, volume: f32) -> AudioResult<()> {
        self.cues.borrow_mut().push((cue, volume));
        Ok(())
    }
}
