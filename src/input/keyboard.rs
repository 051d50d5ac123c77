use super::PlayerIntent;

/// The keys the player reacts to, already decoded by the host from its
/// platform key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    KeyF,
    KeyM,
}

/// Keyboard shortcut map. Step sizes come from config so the host can tune
/// them without touching the mapping.
#[derive(Debug, Clone, Copy)]
pub struct KeyMap {
    pub seek_step_secs: f64,
    pub volume_step: f64,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            seek_step_secs: crate::constants::DEFAULT_SEEK_STEP_SECS,
            volume_step: crate::constants::DEFAULT_VOLUME_STEP,
        }
    }
}

impl KeyMap {
    /// Map a key press to an intent. A `Some` return means the host must
    /// suppress the default action for the key (page scroll on space, etc.).
    pub fn intent_for(&self, key: Key) -> Option<PlayerIntent> {
        match key {
            Key::Space => Some(PlayerIntent::PlayPause),
            Key::ArrowLeft => Some(PlayerIntent::SeekBy(-self.seek_step_secs)),
            Key::ArrowRight => Some(PlayerIntent::SeekBy(self.seek_step_secs)),
            Key::ArrowUp => Some(PlayerIntent::VolumeBy(self.volume_step)),
            Key::ArrowDown => Some(PlayerIntent::VolumeBy(-self.volume_step)),
            Key::KeyF => Some(PlayerIntent::ToggleFullscreen),
            Key::KeyM => Some(PlayerIntent::ToggleMute),
        }
    }
}
