//! Terminal-side audio collaborators: an external music player process
//! and a cue sink that flashes the status bar and rings the bell.

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::rc::Rc;
use std::time::{Duration, Instant};

use momentos_core::{AudioError, AudioResult, Cue, CueSink, MusicPlayer, Track};

/// Plays tracks by spawning an external program with the track's path.
///
/// Pausing stops the process; resuming starts the track from the top.
pub struct CommandPlayer {
    program: Option<String>,
    music_dir: PathBuf,
    child: Option<Child>,
    current: Option<PathBuf>,
    started: Option<Instant>,
    paused_position: Duration,
}

impl CommandPlayer {
    /// Create a player. With no program, every play attempt fails.
    pub fn new(program: Option<String>, music_dir: impl Into<PathBuf>) -> Self {
        Self {
            program,
            music_dir: music_dir.into(),
            child: None,
            current: None,
            started: None,
            paused_position: Duration::ZERO,
        }
    }

    fn spawn(&mut self, path: PathBuf) -> AudioResult<()> {
        self.stop();
        let program = self.program.as_deref().ok_or(AudioError::NoPlayer)?;
        let child = Command::new(program)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::debug!(program, path = %path.display(), "player started");
        self.child = Some(child);
        self.current = Some(path);
        self.started = Some(Instant::now());
        self.paused_position = Duration::ZERO;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl MusicPlayer for CommandPlayer {
    fn play(&mut self, track: &Track, _volume: f32) -> AudioResult<()> {
        let path = self.music_dir.join(&track.file);
        self.spawn(path)
    }

    fn pause(&mut self) {
        self.paused_position = self.position();
        self.started = None;
        self.stop();
    }

    fn position(&self) -> Duration {
        match self.started {
            Some(started) if self.child.is_some() => started.elapsed(),
            _ => self.paused_position,
        }
    }

    fn restart(&mut self) -> AudioResult<()> {
        if self.child.is_none() {
            self.paused_position = Duration::ZERO;
            return Ok(());
        }
        match self.current.clone() {
            Some(path) => self.spawn(path),
            None => Ok(()),
        }
    }

    fn poll_end(&mut self) -> AudioResult<bool> {
        let Some(child) = self.child.as_mut() else {
            return Ok(false);
        };
        let Some(status) = child.try_wait()? else {
            return Ok(false);
        };
        tracing::debug!(%status, "player exited");
        self.child = None;
        self.started = None;
        self.paused_position = Duration::ZERO;
        if status.success() {
            Ok(true)
        } else {
            Err(AudioError::Exited(status.to_string()))
        }
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The most recent cue and when it arrived.
pub type CueFlash = Option<(Cue, Instant)>;

/// Cue sink for the terminal: remembers the last cue for the status bar
/// and optionally rings the terminal bell.
#[derive(Clone, Default)]
pub struct TerminalCues {
    last: Rc<RefCell<CueFlash>>,
    bell: bool,
}

impl TerminalCues {
    /// Create a sink. `bell` enables the audible terminal bell.
    pub fn new(bell: bool) -> Self {
        Self {
            last: Rc::default(),
            bell,
        }
    }

    /// The most recent cue. Clones share the same slot.
    pub fn last(&self) -> CueFlash {
        *self.last.borrow()
    }
}

impl CueSink for TerminalCues {
    fn play(&mut self, cue: Cue, volume: f32) -> AudioResult<()> {
        *self.last.borrow_mut() = Some((cue, Instant::now()));
        if self.bell && volume > 0.0 {
            let mut out = std::io::stdout();
            out.write_all(b"\x07")
                .and_then(|()| out.flush())
                .map_err(|e| AudioError::Cue(e.to_string()))?;
        }
        Ok(())
    }
}

/// Short caption shown in the status bar for a cue.
pub fn cue_caption(cue: Cue) -> &'static str {
    match cue {
        Cue::SpinStarted => "\u{266a} girando",
        Cue::ResultGood => "\u{266a} momento mágico",
        Cue::ResultBad => "\u{266a} que chatice",
        Cue::DiceRolled => "\u{266a} dado lançado",
        Cue::ScoreUp => "\u{266a} +1",
        Cue::ScoreDown => "\u{266a} -1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use momentos_core::Session;

    fn track() -> Track {
        Track {
            id: 1,
            title: "Música 1".into(),
            file: "1.mp3".into(),
        }
    }

    #[test]
    fn no_program_fails_to_play() {
        let mut player = CommandPlayer::new(None, ".");
        assert!(matches!(player.play(&track(), 0.7), Err(AudioError::NoPlayer)));
        assert!(!player.poll_end().unwrap());
        assert_eq!(player.position(), Duration::ZERO);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut player = CommandPlayer::new(Some("momentos-no-such-player".into()), "/music");
        assert!(matches!(player.play(&track(), 0.7), Err(AudioError::Spawn(_))));
    }

    /// Poll until the player process exits.
    fn wait_for_exit(player: &mut CommandPlayer) -> AudioResult<bool> {
        for _ in 0..200 {
            match player.poll_end() {
                Ok(false) => std::thread::sleep(Duration::from_millis(10)),
                done => return done,
            }
        }
        panic!("player never exited");
    }

    #[cfg(unix)]
    #[test]
    fn clean_exit_is_end_of_track() {
        let mut player = CommandPlayer::new(Some("true".into()), "/music");
        player.play(&track(), 0.7).unwrap();
        assert!(wait_for_exit(&mut player).unwrap());
        assert!(!player.poll_end().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn failed_exit_is_an_error() {
        let mut player = CommandPlayer::new(Some("false".into()), "/nonexistent");
        player.play(&track(), 0.7).unwrap();
        assert!(matches!(wait_for_exit(&mut player), Err(AudioError::Exited(_))));
    }

    #[cfg(unix)]
    #[test]
    fn failing_player_stops_music_without_skipping() {
        let mut session =
            Session::default().with_player(CommandPlayer::new(Some("false".into()), "/nonexistent"));
        session.toggle_play();
        assert!(session.playback().state().is_playing);

        for _ in 0..200 {
            if !session.playback().state().is_playing {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
            assert!(!session.poll_music());
        }
        assert!(!session.playback().state().is_playing);
        assert_eq!(session.playback().state().track_index, 0);
    }

    #[test]
    fn restart_while_paused_rewinds() {
        let mut player = CommandPlayer::new(None, ".");
        player.paused_position = Duration::from_secs(10);
        player.restart().unwrap();
        assert_eq!(player.position(), Duration::ZERO);
    }

    #[test]
    fn cues_are_shared_between_clones() {
        let cues = TerminalCues::new(false);
        let mut sink = cues.clone();
        assert!(cues.last().is_none());
        sink.play(Cue::ResultGood, 0.7).unwrap();
        assert_eq!(cues.last().map(|(cue, _)| cue), Some(Cue::ResultGood));
    }

    #[test]
    fn captions() {
        assert_eq!(cue_caption(Cue::ScoreUp), "\u{266a} +1");
    }
}
