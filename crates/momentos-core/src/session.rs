//! Game session: the single owner of all mutable game state.
//!
//! `Session` funnels every mutation through a handful of methods: spin,
//! roll, score adjustment, playback controls and tab selection. Spins and
//! rolls open a settle window; the host calls [`Session::advance`] with the
//! current time to commit results whose window has closed.

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::config::SessionConfig;
use crate::cue::{Cue, CueSink, SilentSink};
use crate::dice::{DiceState, RollPlan, plan_roll};
use crate::playback::{MusicPlayer, NullPlayer, Playback, PlaybackState, PrevAction, tracks};
use crate::rng::{RandomSource, StdRandom};
use crate::roulette::{Resolution, RouletteState, SpinPlan, plan_spin};
use crate::score::{CounterKind, Delta, Player, Scoreboard};
use crate::settle::{Scheduler, SettleTask, SettleToken};
use crate::tab::TabId;

/// A result committed when a settle window closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The wheel stopped.
    Spin(Resolution),
    /// The die settled on a face.
    Roll(u32),
}

/// Read-only copy of the whole session state for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Active tab.
    pub tab: TabId,
    /// Roulette state.
    pub roulette: RouletteState,
    /// Die state.
    pub dice: DiceState,
    /// Scores.
    pub scores: Scoreboard,
    /// Music transport.
    pub playback: PlaybackState,
}

/// An in-memory game session.
pub struct Session {
    tab: TabId,
    roulette: RouletteState,
    dice: DiceState,
    scores: Scoreboard,
    playback: Playback,
    scheduler: Scheduler,
    spin_token: Option<SettleToken>,
    roll_token: Option<SettleToken>,
    rng: Box<dyn RandomSource>,
    cues: Box<dyn CueSink>,
    player: Box<dyn MusicPlayer>,
}

impl Session {
    /// Create a session from a configuration, with silent collaborators.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            tab: config.start_tab,
            roulette: RouletteState::default(),
            dice: DiceState::default(),
            scores: Scoreboard::default(),
            playback: Playback::new(tracks(), config.volume, config.muted),
            scheduler: Scheduler::new(),
            spin_token: None,
            roll_token: None,
            rng: Box::new(StdRandom::from_seed_opt(config.seed)),
            cues: Box::new(SilentSink),
            player: Box::new(NullPlayer),
        }
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Replace the cue sink.
    pub fn with_cue_sink(mut self, sink: impl CueSink + 'static) -> Self {
        self.cues = Box::new(sink);
        self
    }

    /// Replace the music player.
    pub fn with_player(mut self, player: impl MusicPlayer + 'static) -> Self {
        self.player = Box::new(player);
        self
    }

    // ------------------------------------------------------------------
    // Roulette, dice, scores
    // ------------------------------------------------------------------

    /// Spin the wheel. Ignored (returns `None`) while a spin is settling.
    pub fn spin(&mut self, now: Instant) -> Option<SpinPlan> {
        if self.roulette.is_spinning {
            debug!("spin ignored: wheel still turning");
            return None;
        }
        let plan = plan_spin(self.roulette.cumulative_degrees, self.rng.as_mut());
        self.roulette.begin(&plan);
        self.spin_token = Some(self.scheduler.schedule(SettleTask::CommitSpin, now, plan.settle));
        debug!(
            target = plan.target_degrees,
            extra = plan.extra_degrees,
            "spin started"
        );
        self.emit(Cue::SpinStarted);
        Some(plan)
    }

    /// Roll the die. Ignored (returns `None`) while a roll is settling.
    pub fn roll(&mut self, now: Instant) -> Option<RollPlan> {
        if self.dice.is_rolling {
            debug!("roll ignored: die still tumbling");
            return None;
        }
        let plan = plan_roll(self.rng.as_mut());
        self.dice.begin(&plan);
        let task = SettleTask::CommitRoll { face: plan.face };
        self.roll_token = Some(self.scheduler.schedule(task, now, plan.settle));
        debug!(face = plan.face, spins = plan.extra_spins, "roll started");
        self.emit(Cue::DiceRolled);
        Some(plan)
    }

    /// Step a score counter by one. Returns the new value.
    ///
    /// A decrement clamped at zero changes nothing and emits no cue.
    pub fn adjust_score(&mut self, player: Player, kind: CounterKind, delta: Delta) -> u32 {
        let adj = self.scores.adjust(player, kind, delta);
        if adj.changed {
            debug!(?player, ?kind, value = adj.value, "score changed");
            self.emit(match delta {
                Delta::Up => Cue::ScoreUp,
                Delta::Down => Cue::ScoreDown,
            });
        }
        adj.value
    }

    /// Commit every result whose settle window has closed by `now`.
    pub fn advance(&mut self, now: Instant) -> Vec<Commit> {
        let mut commits = Vec::new();
        for (token, task) in self.scheduler.take_due(now) {
            match task {
                SettleTask::CommitSpin if self.spin_token == Some(token) => {
                    self.spin_token = None;
                    let res = self.roulette.commit();
                    debug!(index = res.index, text = res.section.text, "spin settled");
                    self.emit(Cue::for_result(res.section.is_good));
                    commits.push(Commit::Spin(res));
                }
                SettleTask::CommitRoll { face } if self.roll_token == Some(token) => {
                    self.roll_token = None;
                    self.dice.commit(face);
                    debug!(face, "roll settled");
                    commits.push(Commit::Roll(face));
                }
                _ => debug!(?token, "stale settle task dropped"),
            }
        }
        commits
    }

    /// When the next settle window closes, if any is open.
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Abandon every open settle window without committing anything.
    pub fn teardown(&mut self) {
        self.scheduler.clear();
        self.spin_token = None;
        self.roll_token = None;
        self.roulette.is_spinning = false;
        self.dice.is_rolling = false;
        if self.playback.state().is_playing {
            self.playback.toggle_play(self.player.as_mut());
        }
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Play or pause the music.
    pub fn toggle_play(&mut self) {
        self.playback.toggle_play(self.player.as_mut());
    }

    /// Skip to the next track.
    pub fn next_track(&mut self) {
        self.playback.next_track(self.player.as_mut());
    }

    /// Rewind or go back one track.
    pub fn prev_track(&mut self) -> PrevAction {
        self.playback.prev_track(self.player.as_mut())
    }

    /// Set the volume (clamped to 0.0-1.0).
    pub fn set_volume(&mut self, volume: f32) {
        self.playback.set_volume(volume, self.player.as_mut());
    }

    /// Change the volume by `step`.
    pub fn nudge_volume(&mut self, step: f32) {
        let volume = self.playback.state().volume + step;
        self.set_volume(volume);
    }

    /// Mute or unmute.
    pub fn toggle_mute(&mut self) {
        self.playback.toggle_mute(self.player.as_mut());
    }

    /// Move on if the current track has finished. Returns true if it had.
    pub fn poll_music(&mut self) -> bool {
        self.playback.poll_ended(self.player.as_mut())
    }

    // ------------------------------------------------------------------
    // Tabs and accessors
    // ------------------------------------------------------------------

    /// Show a tab. Open settle windows keep running.
    pub fn select_tab(&mut self, tab: TabId) {
        self.tab = tab;
    }

    /// Show the next tab.
    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    /// Show the previous tab.
    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    /// Active tab.
    pub fn tab(&self) -> TabId {
        self.tab
    }

    /// Roulette state.
    pub fn roulette(&self) -> &RouletteState {
        &self.roulette
    }

    /// Die state.
    pub fn dice(&self) -> &DiceState {
        &self.dice
    }

    /// Scores.
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Music transport.
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Copy of the full state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tab: self.tab,
            roulette: self.roulette.clone(),
            dice: self.dice.clone(),
            scores: self.scores,
            playback: self.playback.state().clone(),
        }
    }

    fn emit(&mut self, cue: Cue) {
        let volume = self.playback.state().effective_volume();
        if let Err(e) = self.cues.play(cue, volume) {
            debug!(cue = %cue, error = %e, "cue dropped");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
