//! Top-level application state: the game session plus per-tab view state.

use std::time::{Duration, Instant};

use momentos_core::{Commit, Session, TabId};

use crate::audio::TerminalCues;
use crate::tabs::Tab;
use crate::tabs::dice::DiceTab;
use crate::tabs::roulette::RouletteTab;
use crate::tabs::score::ScoreTab;

/// How long a cue caption stays in the status bar.
pub const CUE_FLASH: Duration = Duration::from_millis(1500);

/// Main application state for the TUI.
pub struct TuiApp {
    /// The game session.
    pub session: Session,
    /// Whether to show the help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Roulette tab.
    pub roulette: RouletteTab,
    /// Dice tab.
    pub dice: DiceTab,
    /// Score tab.
    pub score: ScoreTab,
    /// Cue sink shared with the session, read for the status bar.
    pub cues: TerminalCues,
}

impl TuiApp {
    /// Create an app around a session whose cue sink is `cues`.
    pub fn new(session: Session, cues: TerminalCues) -> Self {
        Self {
            session,
            show_help: false,
            should_quit: false,
            roulette: RouletteTab::new(),
            dice: DiceTab::new(),
            score: ScoreTab::new(),
            cues,
        }
    }

    /// Get a reference to the active tab.
    pub fn active_tab_ref(&self) -> &dyn Tab {
        match self.session.tab() {
            TabId::Roulette => &self.roulette,
            TabId::Dice => &self.dice,
            TabId::Score => &self.score,
        }
    }

    /// Forward a key to the active tab.
    pub fn forward_key(&mut self, key: crossterm::event::KeyEvent, now: Instant) {
        match self.session.tab() {
            TabId::Roulette => self.roulette.handle_key(key, &mut self.session, now),
            TabId::Dice => self.dice.handle_key(key, &mut self.session, now),
            TabId::Score => self.score.handle_key(key, &mut self.session, now),
        }
    }

    /// Commit settled results and follow the music player.
    pub fn tick(&mut self, now: Instant) -> Vec<Commit> {
        let commits = self.session.advance(now);
        for commit in &commits {
            match commit {
                Commit::Spin(res) => {
                    tracing::info!(index = res.index, text = res.section.text, "roulette result");
                }
                Commit::Roll(face) => tracing::info!(face, "dice result"),
            }
        }
        self.session.poll_music();
        commits
    }

    /// Caption of a cue that arrived within the flash window.
    pub fn cue_caption(&self, now: Instant) -> Option<&'static str> {
        let (cue, at) = self.cues.last()?;
        (now.saturating_duration_since(at) < CUE_FLASH).then(|| crate::audio::cue_caption(cue))
    }

    /// How long the event loop may block before something needs redrawing.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let animating = self.session.roulette().is_spinning || self.session.dice().is_rolling;
        if animating {
            return Duration::from_millis(33);
        }
        let idle = Duration::from_millis(250);
        self.session
            .next_due()
            .map_or(idle, |due| due.saturating_duration_since(now).min(idle))
    }

    /// Tear down the session and leave.
    pub fn quit(&mut self) {
        self.session.teardown();
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};
    use momentos_core::ScriptedSource;

    fn app(values: impl IntoIterator<Item = u32>) -> TuiApp {
        let cues = TerminalCues::new(false);
        let session = Session::default()
            .with_rng(ScriptedSource::new(values))
            .with_cue_sink(cues.clone());
        TuiApp::new(session, cues)
    }

    #[test]
    fn forward_key_reaches_active_tab() {
        let mut app = app([6, 3]);
        let now = Instant::now();
        app.session.select_tab(TabId::Dice);
        app.forward_key(KeyEvent::from(KeyCode::Enter), now);
        assert!(app.session.dice().is_rolling);
        assert!(!app.session.roulette().is_spinning);
    }

    #[test]
    fn tick_commits_results() {
        let mut app = app([0]);
        let now = Instant::now();
        app.forward_key(KeyEvent::from(KeyCode::Enter), now);
        assert!(app.tick(now).is_empty());
        let commits = app.tick(now + Duration::from_secs(4));
        assert!(matches!(commits.as_slice(), [Commit::Spin(_)]));
    }

    #[test]
    fn cue_caption_expires() {
        let mut app = app([0]);
        let now = Instant::now();
        assert_eq!(app.cue_caption(now), None);
        app.forward_key(KeyEvent::from(KeyCode::Enter), now);
        let later = Instant::now();
        assert!(app.cue_caption(later).is_some());
        assert_eq!(app.cue_caption(later + CUE_FLASH), None);
    }

    #[test]
    fn poll_timeout_speeds_up_while_animating() {
        let mut app = app([0]);
        let now = Instant::now();
        assert_eq!(app.poll_timeout(now), Duration::from_millis(250));
        app.forward_key(KeyEvent::from(KeyCode::Enter), now);
        assert_eq!(app.poll_timeout(now), Duration::from_millis(33));
    }

    #[test]
    fn quit_discards_pending_spin() {
        let mut app = app([0]);
        let now = Instant::now();
        app.forward_key(KeyEvent::from(KeyCode::Enter), now);
        app.quit();
        assert!(app.should_quit);
        assert!(app.tick(now + Duration::from_secs(10)).is_empty());
    }
}
