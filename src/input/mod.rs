mod gestures;
mod keyboard;
mod pointer;
mod touch;

pub use gestures::{Gesture, GestureBindings, GestureConfig, GestureRecognizer, SwipeDirection};
pub use keyboard::{Key, KeyMap};
pub use pointer::ClickArbiter;
pub use touch::TapTracker;

use crate::player::PlaybackRate;

/// The normalized player action vocabulary. Raw keyboard, mouse and touch
/// input is interpreted into these; the playback controller never sees
/// device events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerIntent {
    PlayPause,
    /// Relative seek in seconds; negative rewinds. Clamped downstream.
    SeekBy(f64),
    /// Absolute seek in seconds. Clamped downstream.
    SeekTo(f64),
    /// Relative volume change; clamped to [0, 1] downstream.
    VolumeBy(f64),
    SetVolume(f64),
    ToggleMute,
    ToggleFullscreen,
    ShowControls,
    HideControls,
    ToggleControls,
    NextEpisode,
    PrevEpisode,
    SetRate(PlaybackRate),
    CycleRate,
}
