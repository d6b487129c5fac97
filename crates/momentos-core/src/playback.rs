//! Background music: track list, transport state and the player seam.
//!
//! Playback is best effort. A failed attempt to play leaves the session in
//! the paused state and is logged; it never reaches the caller as an error.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AudioError, AudioResult};

/// Number of compiled-in music tracks.
pub const TRACK_COUNT: usize = 15;

/// Initial music and effects volume.
pub const DEFAULT_VOLUME: f32 = 0.7;

/// "Previous" restarts the current track once it has played this long.
pub const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// A music track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// 1-based track number.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// File name relative to the music directory.
    pub file: String,
}

/// The compiled-in track list: `1.mp3` through `15.mp3`.
pub fn tracks() -> Vec<Track> {
    (1..=TRACK_COUNT as u32)
        .map(|id| Track {
            id,
            title: format!("Música {id}"),
            file: format!("{id}.mp3"),
        })
        .collect()
}

/// Plays music tracks. Implemented by the front end.
pub trait MusicPlayer {
    /// Start playing `track` from the beginning at `volume`.
    fn play(&mut self, track: &Track, volume: f32) -> AudioResult<()>;

    /// Stop playback, keeping the current position.
    fn pause(&mut self);

    /// How long the current track has been playing.
    fn position(&self) -> Duration;

    /// Rewind the current track to the start.
    fn restart(&mut self) -> AudioResult<()>;

    /// Check on the current track: `Ok(true)` once it has played to its
    /// end, `Ok(false)` while it is still going, and an error if playback
    /// broke off.
    fn poll_end(&mut self) -> AudioResult<bool>;

    /// Apply a new output volume. Players that cannot change volume while
    /// playing ignore it.
    fn set_volume(&mut self, _volume: f32) {}
}

/// A player that cannot play anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPlayer;

impl MusicPlayer for NullPlayer {
    fn play(&mut self, _track: &Track, _volume: f32) -> AudioResult<()> {
        Err(AudioError::NoPlayer)
    }

    fn pause(&mut self) {}

    fn position(&self) -> Duration {
        Duration::ZERO
    }

    fn restart(&mut self) -> AudioResult<()> {
        Ok(())
    }

    fn poll_end(&mut self) -> AudioResult<bool> {
        Ok(false)
    }
}

/// Coarse volume indicator for the header icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VolumeLevel {
    /// Muted or at zero.
    Muted,
    /// Up to half volume.
    Low,
    /// Above half volume.
    High,
}

/// What "previous" did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrevAction {
    /// The current track was rewound.
    Restarted,
    /// The previous track was selected.
    Moved,
}

/// Music transport state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Index into the track list.
    pub track_index: usize,
    /// Whether music is playing.
    pub is_playing: bool,
    /// Volume in `0.0..=1.0`.
    pub volume: f32,
    /// Whether output is muted.
    pub is_muted: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            track_index: 0,
            is_playing: false,
            volume: DEFAULT_VOLUME,
            is_muted: false,
        }
    }
}

impl PlaybackState {
    /// Volume actually applied to output: zero when muted.
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted { 0.0 } else { self.volume }
    }

    /// Coarse level for display.
    pub fn volume_level(&self) -> VolumeLevel {
        if self.is_muted || self.volume <= 0.0 {
            VolumeLevel::Muted
        } else if self.volume > 0.5 {
            VolumeLevel::High
        } else {
            VolumeLevel::Low
        }
    }
}

/// Track list plus transport state, driving a [`MusicPlayer`].
#[derive(Debug, Clone)]
pub struct Playback {
    state: PlaybackState,
    tracks: Vec<Track>,
}

impl Playback {
    /// Create a transport over `tracks`.
    ///
    /// An empty list is replaced with the compiled-in tracks.
    pub fn new(tracks: Vec<Track>, volume: f32, muted: bool) -> Self {
        let tracks = if tracks.is_empty() { self::tracks() } else { tracks };
        Self {
            state: PlaybackState {
                volume: volume.clamp(0.0, 1.0),
                is_muted: muted,
                ..PlaybackState::default()
            },
            tracks,
        }
    }

    /// Transport state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// All tracks.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The selected track.
    pub fn current_track(&self) -> &Track {
        &self.tracks[self.state.track_index]
    }

    /// Pause if playing, otherwise try to start the current track.
    pub fn toggle_play(&mut self, player: &mut dyn MusicPlayer) {
        if self.state.is_playing {
            player.pause();
            self.state.is_playing = false;
            debug!(track = self.current_track().id, "paused");
        } else {
            self.start(player);
        }
    }

    /// Select the next track, wrapping around.
    pub fn next_track(&mut self, player: &mut dyn MusicPlayer) {
        self.state.track_index = (self.state.track_index + 1) % self.tracks.len();
        self.track_changed(player);
    }

    /// Rewind the current track if it has played past the restart
    /// threshold, otherwise select the previous track.
    pub fn prev_track(&mut self, player: &mut dyn MusicPlayer) -> PrevAction {
        if player.position() > RESTART_THRESHOLD {
            if let Err(e) = player.restart() {
                warn!(error = %e, "failed to rewind track");
            }
            return PrevAction::Restarted;
        }
        let count = self.tracks.len();
        self.state.track_index = (self.state.track_index + count - 1) % count;
        self.track_changed(player);
        PrevAction::Moved
    }

    /// Advance when the player reports the current track has ended.
    /// Returns true if a track ended.
    ///
    /// A player that broke off mid-track stops the transport instead.
    pub fn poll_ended(&mut self, player: &mut dyn MusicPlayer) -> bool {
        if !self.state.is_playing {
            return false;
        }
        match player.poll_end() {
            Ok(true) => {
                debug!(track = self.current_track().id, "track ended");
                self.next_track(player);
                true
            }
            Ok(false) => false,
            Err(e) => {
                self.state.is_playing = false;
                warn!(track = self.current_track().id, error = %e, "playback failed");
                false
            }
        }
    }

    /// Set the volume, clamped to `0.0..=1.0`.
    pub fn set_volume(&mut self, volume: f32, player: &mut dyn MusicPlayer) {
        self.state.volume = volume.clamp(0.0, 1.0);
        player.set_volume(self.state.effective_volume());
    }

    /// Toggle mute.
    pub fn toggle_mute(&mut self, player: &mut dyn MusicPlayer) {
        self.state.is_muted = !self.state.is_muted;
        player.set_volume(self.state.effective_volume());
    }

    fn track_changed(&mut self, player: &mut dyn MusicPlayer) {
        debug!(track = self.current_track().id, "track selected");
        if self.state.is_playing {
            self.start(player);
        }
    }

    fn start(&mut self, player: &mut dyn MusicPlayer) {
        let volume = self.state.effective_volume();
        match player.play(self.current_track(), volume) {
            Ok(()) => {
                self.state.is_playing = true;
                debug!(track = self.current_track().id, "playing");
            }
            Err(e) => {
                self.state.is_playing = false;
                warn!(track = self.current_track().id, error = %e, "playback failed");
            }
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(tracks(), DEFAULT_VOLUME, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Player double with a settable position and failure switch.
    #[derive(Default)]
    struct FakePlayer {
        fail: bool,
        playing: Option<u32>,
        position: Duration,
        finished: bool,
        broke_off: bool,
        restarts: u32,
        volume: Option<f32>,
    }

    impl MusicPlayer for FakePlayer {
        fn play(&mut self, track: &Track, volume: f32) -> AudioResult<()> {
            if self.fail {
                return Err(AudioError::NoPlayer);
            }
            self.playing = Some(track.id);
            self.volume = Some(volume);
            self.position = Duration::ZERO;
            self.finished = false;
            Ok(())
        }

        fn pause(&mut self) {
            self.playing = None;
        }

        fn position(&self) -> Duration {
            self.position
        }

        fn restart(&mut self) -> AudioResult<()> {
            self.restarts += 1;
            self.position = Duration::ZERO;
            Ok(())
        }

        fn poll_end(&mut self) -> AudioResult<bool> {
            if self.broke_off {
                return Err(AudioError::Exited("exit status: 1".into()));
            }
            Ok(self.finished)
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = Some(volume);
        }
    }

    #[test]
    fn track_list() {
        let list = tracks();
        assert_eq!(list.len(), 15);
        assert_eq!(list[0].file, "1.mp3");
        assert_eq!(list[14].title, "Música 15");
    }

    #[test]
    fn defaults() {
        let pb = Playback::default();
        assert_eq!(pb.state().track_index, 0);
        assert!(!pb.state().is_playing);
        assert!((pb.state().volume - 0.7).abs() < f32::EPSILON);
        assert!(!pb.state().is_muted);
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut pb = Playback::default();
        let mut player = FakePlayer::default();
        pb.prev_track(&mut player);
        assert_eq!(pb.state().track_index, 14);
        pb.next_track(&mut player);
        assert_eq!(pb.state().track_index, 0);
    }

    #[test]
    fn prev_restarts_after_threshold() {
        let mut pb = Playback::default();
        let mut player = FakePlayer::default();
        pb.next_track(&mut player);
        player.position = Duration::from_secs(4);
        assert_eq!(pb.prev_track(&mut player), PrevAction::Restarted);
        assert_eq!(pb.state().track_index, 1);
        assert_eq!(player.restarts, 1);

        player.position = Duration::from_secs(3);
        assert_eq!(pb.prev_track(&mut player), PrevAction::Moved);
        assert_eq!(pb.state().track_index, 0);
    }

    #[test]
    fn toggle_play_and_pause() {
        let mut pb = Playback::default();
        let mut player = FakePlayer::default();
        pb.toggle_play(&mut player);
        assert!(pb.state().is_playing);
        assert_eq!(player.playing, Some(1));
        pb.toggle_play(&mut player);
        assert!(!pb.state().is_playing);
        assert_eq!(player.playing, None);
    }

    #[test]
    fn failed_playback_stays_paused() {
        let mut pb = Playback::default();
        pb.toggle_play(&mut NullPlayer);
        assert!(!pb.state().is_playing);
    }

    #[test]
    fn switching_track_while_playing_plays_it() {
        let mut pb = Playback::default();
        let mut player = FakePlayer::default();
        pb.toggle_play(&mut player);
        pb.next_track(&mut player);
        assert_eq!(player.playing, Some(2));

        player.fail = true;
        pb.next_track(&mut player);
        assert!(!pb.state().is_playing);
        assert_eq!(pb.state().track_index, 2);
    }

    #[test]
    fn ended_track_advances() {
        let mut pb = Playback::default();
        let mut player = FakePlayer::default();
        assert!(!pb.poll_ended(&mut player));
        pb.toggle_play(&mut player);
        player.finished = true;
        assert!(pb.poll_ended(&mut player));
        assert_eq!(pb.state().track_index, 1);
        assert_eq!(player.playing, Some(2));
    }

    #[test]
    fn broken_off_track_stops_instead_of_advancing() {
        let mut pb = Playback::default();
        let mut player = FakePlayer::default();
        pb.toggle_play(&mut player);
        player.broke_off = true;
        assert!(!pb.poll_ended(&mut player));
        assert!(!pb.state().is_playing);
        assert_eq!(pb.state().track_index, 0);

        // Stopped, so further polls leave the transport alone.
        assert!(!pb.poll_ended(&mut player));
        assert_eq!(pb.state().track_index, 0);
    }

    #[test]
    fn volume_and_mute() {
        let mut pb = Playback::default();
        let mut player = FakePlayer::default();
        pb.set_volume(1.5, &mut player);
        assert!((pb.state().volume - 1.0).abs() < f32::EPSILON);
        assert_eq!(pb.state().volume_level(), VolumeLevel::High);

        pb.set_volume(0.3, &mut player);
        assert_eq!(pb.state().volume_level(), VolumeLevel::Low);

        pb.toggle_mute(&mut player);
        assert_eq!(pb.state().effective_volume(), 0.0);
        assert_eq!(player.volume, Some(0.0));
        assert_eq!(pb.state().volume_level(), VolumeLevel::Muted);

        pb.toggle_mute(&mut player);
        pb.set_volume(0.0, &mut player);
        assert_eq!(pb.state().volume_level(), VolumeLevel::Muted);
    }
}
