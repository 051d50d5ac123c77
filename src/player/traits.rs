use super::PlaybackRate;

/// Lifecycle events the media element reports back. Commands on
/// [`MediaSurface`] return immediately; the resulting state is confirmed by
/// one of these arriving on the session's event stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Periodic position report while media is loaded.
    TimeUpdated(f64),
    /// Metadata loaded; duration in seconds now known.
    DurationKnown(f64),
    /// The element stalled waiting for data.
    Waiting,
    /// Enough data buffered to resume.
    CanPlay,
    /// Playback actually started (whatever requested it).
    PlayStarted,
    /// Playback actually paused (whatever requested it).
    Paused,
    /// Natural completion of the current media.
    Ended,
}

/// The native media-element seam. Implementations bind to whatever platform
/// media API the embedding UI uses; property writes take effect immediately,
/// play/pause are requests confirmed asynchronously via [`MediaEvent`]s.
pub trait MediaSurface: Send + Sync {
    /// Point the element at a new media reference, resetting its position.
    fn load(&self, media: &str);
    fn request_play(&self);
    fn request_pause(&self);

    fn position(&self) -> f64;
    fn set_position(&self, secs: f64);
    /// `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;

    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);
    fn muted(&self) -> bool;
    fn set_muted(&self, muted: bool);

    fn set_rate(&self, rate: PlaybackRate);
}

/// Fullscreen capability of the container hosting the player. Enter/exit are
/// requests; the host reports the actual change back to the session.
pub trait FullscreenHost: Send + Sync {
    fn enter(&self);
    fn exit(&self);
    fn is_fullscreen(&self) -> bool;
}
