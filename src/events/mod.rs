use crate::player::{PlaybackRate, PlayerState};

/// UI-facing notifications emitted by an active playback session on its
/// broadcast channel. Everything a shell needs to render controls without
/// polling the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged(PlayerState),
    PositionChanged(f64),
    DurationKnown(f64),
    VolumeChanged { level: f64, muted: bool },
    RateChanged(PlaybackRate),
    ControlsVisibility(bool),
    FullscreenChanged(bool),
    /// The session re-seeded itself onto a different episode (manual
    /// navigation or auto-advance).
    EpisodeChanged { ordinal: u32, position_secs: f64 },
    /// A progress record was flushed for the current episode.
    ProgressSaved { ordinal: u32, position_secs: f64 },
    /// Continuously buffering past the stall timeout. The session stays in
    /// Buffering; recovery is left to the user.
    Stalled,
    /// The session tore down; no further events follow.
    Closed,
}
