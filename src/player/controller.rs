use std::sync::Arc;

use tracing::{debug, trace};

use super::navigator;
use super::session::PlaybackSession;
use super::traits::{FullscreenHost, MediaEvent, MediaSurface};
use super::types::PlayerState;
use crate::error::Error;
use crate::events::SessionEvent;
use crate::input::PlayerIntent;
use crate::models::Title;
use crate::services::ProgressService;

/// Synchronous playback state machine. Owns the session, mediates between
/// normalized intents, the media surface and the progress store, and decides
/// auto-advance. Timers live in the session runner; this type only exposes
/// the deadline-relevant policy (`hide_timer_active`).
///
/// All state transitions driven by the media element's own events, so
/// external play/pause sources stay consistent with displayed state.
pub struct PlaybackController {
    title: Title,
    session: PlaybackSession,
    surface: Arc<dyn MediaSurface>,
    fullscreen: Arc<dyn FullscreenHost>,
    progress: ProgressService,
    /// Logical intent to play; buffering does not change it.
    wants_play: bool,
}

impl PlaybackController {
    /// Create a controller for (title, ordinal), loading the episode's media
    /// and seeding the position from the progress store (0 when absent).
    pub fn new(
        title: Title,
        ordinal: u32,
        surface: Arc<dyn MediaSurface>,
        fullscreen: Arc<dyn FullscreenHost>,
        progress: ProgressService,
    ) -> Result<Self, Error> {
        let episode = navigator::episode(&title, ordinal).ok_or(Error::EpisodeNotFound {
            title: title.id.to_string(),
            ordinal,
        })?;

        surface.load(&episode.media);
        let seed = progress.load(&title.id, ordinal).unwrap_or(0.0);
        if seed > 0.0 {
            surface.set_position(seed);
        }

        let mut session = PlaybackSession::new(title.id.clone(), ordinal);
        session.position_secs = seed;
        debug!(
            "Session created for {} episode {} (seeded at {:.1}s)",
            title.id, ordinal, seed
        );

        Ok(Self {
            title,
            session,
            surface,
            fullscreen,
            progress,
            wants_play: false,
        })
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    /// Whether the controls auto-hide timer should be armed: controls are up
    /// and playback is running. Paused and buffering suspend the timer.
    pub fn hide_timer_active(&self) -> bool {
        self.session.controls_visible && self.session.is_playing()
    }

    pub fn apply_intent(&mut self, intent: PlayerIntent) -> Vec<SessionEvent> {
        trace!("Applying intent {:?}", intent);
        match intent {
            PlayerIntent::PlayPause => {
                // Toggles the logical intent, not the displayed state:
                // during Buffering the display lags, but a pause request
                // must still land as a pause.
                if self.wants_play {
                    self.wants_play = false;
                    self.surface.request_pause();
                } else {
                    self.wants_play = true;
                    self.surface.request_play();
                }
                // State changes once the element confirms.
                Vec::new()
            }
            PlayerIntent::SeekBy(delta) => self.seek_to(self.session.position_secs + delta),
            PlayerIntent::SeekTo(secs) => self.seek_to(secs),
            PlayerIntent::VolumeBy(delta) => {
                self.set_volume(self.session.volume_level + delta)
            }
            PlayerIntent::SetVolume(level) => self.set_volume(level),
            PlayerIntent::ToggleMute => {
                // One-way coupling: mute toggling never touches the stored
                // volume level, so unmuting restores it verbatim.
                self.session.is_muted = !self.session.is_muted;
                self.surface.set_muted(self.session.is_muted);
                vec![SessionEvent::VolumeChanged {
                    level: self.session.volume_level,
                    muted: self.session.is_muted,
                }]
            }
            PlayerIntent::ToggleFullscreen => {
                if self.session.is_fullscreen {
                    self.fullscreen.exit();
                } else {
                    self.fullscreen.enter();
                }
                // Confirmed via the host's change notification.
                Vec::new()
            }
            PlayerIntent::ShowControls => self.set_controls(true),
            PlayerIntent::HideControls => self.set_controls(false),
            PlayerIntent::ToggleControls => self.set_controls(!self.session.controls_visible),
            PlayerIntent::NextEpisode => {
                self.change_episode(self.session.current_ordinal + 1, self.wants_play)
            }
            PlayerIntent::PrevEpisode => {
                match self.session.current_ordinal.checked_sub(1) {
                    Some(target) => self.change_episode(target, self.wants_play),
                    None => Vec::new(),
                }
            }
            PlayerIntent::SetRate(rate) => self.set_rate(rate),
            PlayerIntent::CycleRate => self.set_rate(self.session.rate.next()),
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) -> Vec<SessionEvent> {
        trace!("Media event {:?}", event);
        match event {
            MediaEvent::TimeUpdated(secs) => {
                self.session.position_secs = self.session.clamp_position(secs);
                vec![SessionEvent::PositionChanged(self.session.position_secs)]
            }
            MediaEvent::DurationKnown(secs) => {
                self.session.duration_secs = Some(secs);
                self.session.position_secs = self.session.clamp_position(self.session.position_secs);
                vec![SessionEvent::DurationKnown(secs)]
            }
            MediaEvent::Waiting => {
                if self.session.is_playing() {
                    self.transition(PlayerState::Buffering)
                } else {
                    Vec::new()
                }
            }
            MediaEvent::CanPlay => {
                if self.session.is_buffering() {
                    let next = if self.wants_play {
                        PlayerState::Playing
                    } else {
                        PlayerState::Paused
                    };
                    self.transition(next)
                } else {
                    Vec::new()
                }
            }
            MediaEvent::PlayStarted => {
                self.wants_play = true;
                self.transition(PlayerState::Playing)
            }
            MediaEvent::Paused => {
                self.wants_play = false;
                self.transition(PlayerState::Paused)
            }
            MediaEvent::Ended => self.on_ended(),
        }
    }

    /// Natural completion: advance to ordinal+1 when it exists, otherwise
    /// hold the last frame in Ended with controls shown.
    fn on_ended(&mut self) -> Vec<SessionEvent> {
        // The element stopped on its own; a following PlayPause restarts.
        self.wants_play = false;
        let mut events = self.transition(PlayerState::Ended);
        match navigator::next(&self.title, self.session.current_ordinal) {
            Some(next) => {
                let target = next.ordinal;
                events.extend(self.change_episode(target, true));
            }
            None => {
                debug!(
                    "Last episode of {} ended, holding in Ended",
                    self.title.id
                );
                events.extend(self.set_controls(true));
            }
        }
        events
    }

    /// Re-seed the session onto another episode of the same title. Unknown
    /// ordinals are configuration problems in the catalog, not runtime
    /// faults: the session simply stays where it is.
    pub fn change_episode(&mut self, ordinal: u32, request_play: bool) -> Vec<SessionEvent> {
        let Some(episode) = navigator::episode(&self.title, ordinal) else {
            debug!(
                "Ignoring navigation to missing episode {} of {}",
                ordinal, self.title.id
            );
            return Vec::new();
        };

        self.surface.load(&episode.media);
        let seed = self.progress.load(&self.title.id, ordinal).unwrap_or(0.0);
        if seed > 0.0 {
            self.surface.set_position(seed);
        }

        self.session.current_ordinal = ordinal;
        self.session.position_secs = seed;
        self.session.duration_secs = None;

        // Subscribers must not keep rendering the previous episode's state
        // (Ended after an auto-advance), so the reset is announced too.
        let mut events = self.transition(PlayerState::Idle);
        events.extend(self.set_controls(true));

        self.wants_play = request_play;
        if request_play {
            self.surface.request_play();
        }

        debug!(
            "Session re-seeded to {} episode {} at {:.1}s",
            self.title.id, ordinal, seed
        );
        events.push(SessionEvent::EpisodeChanged {
            ordinal,
            position_secs: seed,
        });
        events
    }

    /// Periodic progress flush. Runs on the fixed interval regardless of
    /// play/pause state, but never records a position of zero.
    pub fn flush_progress(&self) -> Vec<SessionEvent> {
        if self.session.position_secs <= 0.0 {
            return Vec::new();
        }
        self.progress.save(
            &self.title.id,
            self.session.current_ordinal,
            self.session.position_secs,
        );
        vec![SessionEvent::ProgressSaved {
            ordinal: self.session.current_ordinal,
            position_secs: self.session.position_secs,
        }]
    }

    /// Pointer activity over the player keeps the controls up.
    pub fn on_activity(&mut self) -> Vec<SessionEvent> {
        self.set_controls(true)
    }

    /// The pointer left the player container; outside fullscreen that hides
    /// the controls immediately.
    pub fn on_pointer_leave(&mut self) -> Vec<SessionEvent> {
        if self.session.is_fullscreen {
            Vec::new()
        } else {
            self.set_controls(false)
        }
    }

    /// The auto-hide deadline passed; only hides while actually playing.
    pub fn on_hide_deadline(&mut self) -> Vec<SessionEvent> {
        if self.session.is_playing() {
            self.set_controls(false)
        } else {
            Vec::new()
        }
    }

    pub fn on_fullscreen_changed(&mut self, fullscreen: bool) -> Vec<SessionEvent> {
        if self.session.is_fullscreen == fullscreen {
            return Vec::new();
        }
        self.session.is_fullscreen = fullscreen;
        vec![SessionEvent::FullscreenChanged(fullscreen)]
    }

    fn seek_to(&mut self, secs: f64) -> Vec<SessionEvent> {
        let clamped = self.session.clamp_position(secs);
        self.surface.set_position(clamped);
        self.session.position_secs = clamped;
        vec![SessionEvent::PositionChanged(clamped)]
    }

    fn set_volume(&mut self, level: f64) -> Vec<SessionEvent> {
        let clamped = level.clamp(0.0, 1.0);
        self.session.volume_level = clamped;
        // Reaching exactly zero mutes as a side effect; raising the level
        // back up unmutes.
        self.session.is_muted = clamped == 0.0;
        self.surface.set_volume(clamped);
        self.surface.set_muted(self.session.is_muted);
        vec![SessionEvent::VolumeChanged {
            level: clamped,
            muted: self.session.is_muted,
        }]
    }

    fn set_rate(&mut self, rate: super::PlaybackRate) -> Vec<SessionEvent> {
        self.session.rate = rate;
        self.surface.set_rate(rate);
        vec![SessionEvent::RateChanged(rate)]
    }

    fn set_controls(&mut self, visible: bool) -> Vec<SessionEvent> {
        if self.session.controls_visible == visible {
            return Vec::new();
        }
        self.session.controls_visible = visible;
        vec![SessionEvent::ControlsVisibility(visible)]
    }

    fn transition(&mut self, state: PlayerState) -> Vec<SessionEvent> {
        if self.session.state == state {
            return Vec::new();
        }
        debug!("Player state {:?} -> {:?}", self.session.state, state);
        self.session.state = state;
        vec![SessionEvent::StateChanged(state)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlaybackRate;
    use crate::storage::MemoryStorage;
    use crate::test_utils::{FakeFullscreen, FakeSurface, title_with_episodes};

    fn setup(ordinal: u32) -> (PlaybackController, Arc<FakeSurface>, Arc<FakeFullscreen>) {
        setup_with_storage(ordinal, Arc::new(MemoryStorage::new()))
    }

    fn setup_with_storage(
        ordinal: u32,
        storage: Arc<MemoryStorage>,
    ) -> (PlaybackController, Arc<FakeSurface>, Arc<FakeFullscreen>) {
        let title = title_with_episodes("t", 3);
        let surface = Arc::new(FakeSurface::new());
        let fullscreen = Arc::new(FakeFullscreen::new());
        let progress = ProgressService::new(storage);
        let controller = PlaybackController::new(
            title,
            ordinal,
            surface.clone(),
            fullscreen.clone(),
            progress,
        )
        .unwrap();
        (controller, surface, fullscreen)
    }

    #[test]
    fn creation_fails_for_missing_episode() {
        let title = title_with_episodes("t", 2);
        let surface = Arc::new(FakeSurface::new());
        let fullscreen = Arc::new(FakeFullscreen::new());
        let progress = ProgressService::new(Arc::new(MemoryStorage::new()));
        let result = PlaybackController::new(title, 5, surface, fullscreen, progress);
        assert!(result.is_err());
    }

    #[test]
    fn play_pause_round_trip_reflects_media_events() {
        let (mut c, surface, _) = setup(1);
        assert_eq!(c.session().state, PlayerState::Idle);

        c.apply_intent(PlayerIntent::PlayPause);
        assert_eq!(surface.play_requests(), 1);
        // Still idle until the element confirms.
        assert_eq!(c.session().state, PlayerState::Idle);

        c.handle_media_event(MediaEvent::PlayStarted);
        assert_eq!(c.session().state, PlayerState::Playing);

        c.apply_intent(PlayerIntent::PlayPause);
        c.handle_media_event(MediaEvent::Paused);
        assert_eq!(c.session().state, PlayerState::Paused);

        // Paused -> Playing -> Paused (idempotent pairing).
        c.apply_intent(PlayerIntent::PlayPause);
        c.handle_media_event(MediaEvent::PlayStarted);
        c.apply_intent(PlayerIntent::PlayPause);
        c.handle_media_event(MediaEvent::Paused);
        assert_eq!(c.session().state, PlayerState::Paused);
    }

    #[test]
    fn external_pause_updates_displayed_state() {
        let (mut c, _, _) = setup(1);
        c.handle_media_event(MediaEvent::PlayStarted);
        // Pause arriving without any user intent (OS media keys).
        let events = c.handle_media_event(MediaEvent::Paused);
        assert_eq!(events, vec![SessionEvent::StateChanged(PlayerState::Paused)]);
    }

    #[test]
    fn buffering_preserves_play_intent() {
        let (mut c, _, _) = setup(1);
        c.handle_media_event(MediaEvent::PlayStarted);
        c.handle_media_event(MediaEvent::Waiting);
        assert_eq!(c.session().state, PlayerState::Buffering);

        c.handle_media_event(MediaEvent::CanPlay);
        assert_eq!(c.session().state, PlayerState::Playing);
    }

    #[test]
    fn pause_during_buffering_lands_paused() {
        let (mut c, surface, _) = setup(1);
        c.handle_media_event(MediaEvent::PlayStarted);
        c.handle_media_event(MediaEvent::Waiting);
        // Displayed state is Buffering, but the toggle must read the
        // logical intent and ask the element to pause.
        c.apply_intent(PlayerIntent::PlayPause);
        assert_eq!(surface.pause_requests(), 1);
        c.handle_media_event(MediaEvent::CanPlay);
        assert_eq!(c.session().state, PlayerState::Paused);

        // And toggling again from that parked state resumes.
        c.handle_media_event(MediaEvent::Waiting);
        c.apply_intent(PlayerIntent::PlayPause);
        assert_eq!(surface.play_requests(), 1);
    }

    #[test]
    fn play_pause_after_natural_end_restarts() {
        let (mut c, surface, _) = setup(3);
        c.apply_intent(PlayerIntent::PlayPause);
        c.handle_media_event(MediaEvent::PlayStarted);
        c.handle_media_event(MediaEvent::Ended);
        assert_eq!(c.session().state, PlayerState::Ended);

        c.apply_intent(PlayerIntent::PlayPause);
        assert_eq!(surface.play_requests(), 2);
        assert_eq!(surface.pause_requests(), 0);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let (mut c, surface, _) = setup(1);
        c.handle_media_event(MediaEvent::DurationKnown(100.0));

        c.apply_intent(PlayerIntent::SeekBy(250.0));
        assert_eq!(c.session().position_secs, 100.0);
        assert_eq!(surface.position(), 100.0);

        c.apply_intent(PlayerIntent::SeekBy(-500.0));
        assert_eq!(c.session().position_secs, 0.0);

        c.apply_intent(PlayerIntent::SeekTo(42.0));
        assert_eq!(c.session().position_secs, 42.0);
    }

    #[test]
    fn volume_clamps_and_couples_to_mute() {
        let (mut c, _, _) = setup(1);

        c.apply_intent(PlayerIntent::VolumeBy(0.5));
        assert_eq!(c.session().volume_level, 1.0);
        assert!(!c.session().is_muted);

        for _ in 0..12 {
            c.apply_intent(PlayerIntent::VolumeBy(-0.1));
        }
        assert_eq!(c.session().volume_level, 0.0);
        assert!(c.session().is_muted);

        // Raising the volume unmutes.
        c.apply_intent(PlayerIntent::VolumeBy(0.3));
        assert!(!c.session().is_muted);
    }

    #[test]
    fn unmute_restores_latest_volume_level() {
        let (mut c, surface, _) = setup(1);

        c.apply_intent(PlayerIntent::SetVolume(0.6));
        c.apply_intent(PlayerIntent::ToggleMute);
        assert!(c.session().is_muted);
        // Stored level untouched by mute.
        assert_eq!(c.session().volume_level, 0.6);

        c.apply_intent(PlayerIntent::ToggleMute);
        assert!(!c.session().is_muted);
        assert_eq!(c.session().volume_level, 0.6);
        assert_eq!(surface.volume(), 0.6);
    }

    #[test]
    fn rate_cycle_applies_to_surface() {
        let (mut c, surface, _) = setup(1);
        c.apply_intent(PlayerIntent::CycleRate);
        assert_eq!(c.session().rate, PlaybackRate::OneAndQuarter);
        assert_eq!(surface.rate(), PlaybackRate::OneAndQuarter);
    }

    #[test]
    fn navigation_is_noop_at_boundaries() {
        let (mut c, _, _) = setup(1);
        assert!(c.apply_intent(PlayerIntent::PrevEpisode).is_empty());
        assert_eq!(c.session().current_ordinal, 1);

        let (mut c, _, _) = setup(3);
        assert!(c.apply_intent(PlayerIntent::NextEpisode).is_empty());
        assert_eq!(c.session().current_ordinal, 3);
    }

    #[test]
    fn natural_end_auto_advances_and_requests_play() {
        let storage = Arc::new(MemoryStorage::new());
        // Pre-seed progress for episode 3 so the re-seed is observable.
        ProgressService::new(storage.clone()).save(&crate::models::TitleId::new("t"), 3, 17.0);

        let (mut c, surface, _) = setup_with_storage(2, storage);
        c.handle_media_event(MediaEvent::PlayStarted);
        let events = c.handle_media_event(MediaEvent::Ended);

        assert!(events.contains(&SessionEvent::EpisodeChanged {
            ordinal: 3,
            position_secs: 17.0
        }));
        // The re-seed announces its state reset so subscribers never keep
        // rendering Ended from the finished episode.
        let ended = events
            .iter()
            .position(|e| *e == SessionEvent::StateChanged(PlayerState::Ended));
        let idle = events
            .iter()
            .position(|e| *e == SessionEvent::StateChanged(PlayerState::Idle));
        assert!(ended.is_some() && idle.is_some() && ended < idle);
        assert_eq!(c.session().current_ordinal, 3);
        assert_eq!(c.session().position_secs, 17.0);
        assert_eq!(surface.loaded(), vec!["t-ep2.mp4", "t-ep3.mp4"]);
        assert!(surface.play_requests() >= 1);
    }

    #[test]
    fn natural_end_at_last_episode_holds_ended() {
        let (mut c, _, _) = setup(3);
        c.handle_media_event(MediaEvent::PlayStarted);
        c.apply_intent(PlayerIntent::HideControls);
        let events = c.handle_media_event(MediaEvent::Ended);

        assert_eq!(c.session().state, PlayerState::Ended);
        assert_eq!(c.session().current_ordinal, 3);
        assert!(events.contains(&SessionEvent::ControlsVisibility(true)));
    }

    #[test]
    fn flush_skips_zero_position() {
        let (c, _, _) = setup(1);
        assert!(c.flush_progress().is_empty());
    }

    #[test]
    fn flush_writes_progress_regardless_of_pause() {
        let storage = Arc::new(MemoryStorage::new());
        let (mut c, _, _) = setup_with_storage(1, storage.clone());
        c.handle_media_event(MediaEvent::PlayStarted);
        c.handle_media_event(MediaEvent::TimeUpdated(12.5));
        c.handle_media_event(MediaEvent::Paused);

        let events = c.flush_progress();
        assert_eq!(
            events,
            vec![SessionEvent::ProgressSaved {
                ordinal: 1,
                position_secs: 12.5
            }]
        );
        let load = ProgressService::new(storage).load(&crate::models::TitleId::new("t"), 1);
        assert_eq!(load, Some(12.5));
    }

    #[test]
    fn controls_hide_policy() {
        let (mut c, _, _) = setup(1);
        assert!(c.session().controls_visible);

        // No hiding while paused.
        assert!(c.on_hide_deadline().is_empty());
        assert!(!c.hide_timer_active());

        c.handle_media_event(MediaEvent::PlayStarted);
        assert!(c.hide_timer_active());
        let events = c.on_hide_deadline();
        assert_eq!(events, vec![SessionEvent::ControlsVisibility(false)]);

        // Activity brings them back and rearms.
        c.on_activity();
        assert!(c.session().controls_visible);
        assert!(c.hide_timer_active());
    }

    #[test]
    fn pointer_leave_hides_unless_fullscreen() {
        let (mut c, _, _) = setup(1);
        c.on_fullscreen_changed(true);
        assert!(c.on_pointer_leave().is_empty());
        assert!(c.session().controls_visible);

        c.on_fullscreen_changed(false);
        let events = c.on_pointer_leave();
        assert_eq!(events, vec![SessionEvent::ControlsVisibility(false)]);
    }

    #[test]
    fn fullscreen_intent_goes_through_host() {
        let (mut c, _, fullscreen) = setup(1);
        c.apply_intent(PlayerIntent::ToggleFullscreen);
        assert_eq!(fullscreen.enter_calls(), 1);
        // Session flag only flips on the host notification.
        assert!(!c.session().is_fullscreen);
        c.on_fullscreen_changed(true);
        assert!(c.session().is_fullscreen);

        c.apply_intent(PlayerIntent::ToggleFullscreen);
        assert_eq!(fullscreen.exit_calls(), 1);
    }
}
