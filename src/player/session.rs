use super::{PlaybackRate, PlayerState};
use crate::models::TitleId;

/// In-memory playback state for one mounted player. Created per
/// (title, ordinal); an episode change replaces it with a fresh session
/// re-seeded from the progress store.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub title_id: TitleId,
    pub current_ordinal: u32,
    pub state: PlayerState,
    pub position_secs: f64,
    pub duration_secs: Option<f64>,
    pub volume_level: f64,
    pub is_muted: bool,
    pub rate: PlaybackRate,
    pub controls_visible: bool,
    pub is_fullscreen: bool,
}

impl PlaybackSession {
    pub fn new(title_id: TitleId, ordinal: u32) -> Self {
        Self {
            title_id,
            current_ordinal: ordinal,
            state: PlayerState::Idle,
            position_secs: 0.0,
            duration_secs: None,
            volume_level: 1.0,
            is_muted: false,
            rate: PlaybackRate::Normal,
            controls_visible: true,
            is_fullscreen: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub fn is_buffering(&self) -> bool {
        self.state == PlayerState::Buffering
    }

    /// Clamp a target position into the valid seek range. Before duration is
    /// known only the lower bound applies.
    pub fn clamp_position(&self, secs: f64) -> f64 {
        let low = secs.max(0.0);
        match self.duration_secs {
            Some(duration) => low.min(duration),
            None => low,
        }
    }
}
