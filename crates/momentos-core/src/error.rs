//! Error types for collaborators of the game core.
//!
//! The core operations themselves are total. These errors only describe
//! failures of the audio collaborators, which the session absorbs.

/// Errors reported by audio collaborators (music player, cue sink).
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// No music player program is configured.
    #[error("no music player configured")]
    NoPlayer,

    /// The player process could not be started.
    #[error("failed to start player: {0}")]
    Spawn(#[from] std::io::Error),

    /// The player process quit before the track finished.
    #[error("player exited early: {0}")]
    Exited(String),

    /// A sound cue could not be delivered.
    #[error("cue delivery failed: {0}")]
    Cue(String),
}

/// Convenience result type for audio collaborators.
pub type AudioResult<T> = Result<T, AudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(AudioError::NoPlayer.to_string(), "no music player configured");
        assert_eq!(
            AudioError::Cue("bell".into()).to_string(),
            "cue delivery failed: bell"
        );
        assert_eq!(
            AudioError::Exited("exit status: 1".into()).to_string(),
            "player exited early: exit status: 1"
        );
    }

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "mpv");
        let err: AudioError = io.into();
        assert!(matches!(err, AudioError::Spawn(_)));
        assert_eq!(err.to_string(), "failed to start player: mpv");
    }
}
