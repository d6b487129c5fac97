//! Game core for Momentos.
//!
//! Provides the roulette of moments (twelve good and bad sections resolved
//! from an ever-growing wheel rotation), a heart die with an
//! animate-then-reveal roll, per-player score counters, background music
//! transport state, and the [`Session`] that owns all of it. Spins and
//! rolls commit after a fixed settle window driven by the host's clock.

pub mod config;
pub mod cue;
pub mod dice;
pub mod error;
pub mod playback;
pub mod rng;
pub mod roulette;
pub mod score;
pub mod session;
pub mod settle;
pub mod tab;

pub use config::SessionConfig;
pub use cue::{Cue, CueSink, RecordingSink, SilentSink};
pub use dice::{DiceState, DiceTransform, Pip, RollPlan};
pub use error::{AudioError, AudioResult};
pub use playback::{MusicPlayer, NullPlayer, Playback, PlaybackState, PrevAction, Track, VolumeLevel};
pub use rng::{RandomSource, ScriptedSource, StdRandom};
pub use roulette::{Resolution, RouletteSection, RouletteState, SECTIONS, SpinPlan};
pub use score::{CounterKind, Delta, Player, ScorePair, Scoreboard};
pub use session::{Commit, Session, Snapshot};
pub use tab::TabId;
