use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::controller::PlaybackController;
use super::traits::{FullscreenHost, MediaEvent, MediaSurface};
use crate::error::Error;
use crate::events::SessionEvent;
use crate::input::{ClickArbiter, Key, KeyMap, PlayerIntent, TapTracker};
use crate::models::Title;
use crate::services::{HistoryService, ProgressService};
use crate::storage::Storage;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Timing knobs for one playback session, usually derived from
/// [`crate::config::Config`].
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub progress_flush_interval: Duration,
    pub controls_hide_delay: Duration,
    pub stall_timeout: Duration,
    pub double_click_window: Duration,
    pub double_tap_window: Duration,
    pub quick_tap: Duration,
    pub drag_threshold_px: f64,
    pub seek_step_secs: f64,
    pub volume_step: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            progress_flush_interval: Duration::from_millis(DEFAULT_PROGRESS_FLUSH_INTERVAL_MS),
            controls_hide_delay: Duration::from_millis(DEFAULT_CONTROLS_HIDE_DELAY_MS),
            stall_timeout: Duration::from_millis(DEFAULT_STALL_TIMEOUT_MS),
            double_click_window: Duration::from_millis(DEFAULT_DOUBLE_CLICK_WINDOW_MS),
            double_tap_window: Duration::from_millis(DEFAULT_DOUBLE_TAP_WINDOW_MS),
            quick_tap: Duration::from_millis(DEFAULT_QUICK_TAP_MS),
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            seek_step_secs: DEFAULT_SEEK_STEP_SECS,
            volume_step: DEFAULT_VOLUME_STEP,
        }
    }
}

/// Raw or normalized input delivered to a running session. Hosts forward
/// device events (`Click`, `TouchStart`, ...) and let the session handle the
/// time-based disambiguation, or send [`PlayerIntent`]s directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionInput {
    Intent(PlayerIntent),
    Key(Key),
    /// Every click on the video surface, including both of a double pair.
    Click,
    /// The host's own double-click notification; resolves a click pair.
    DoubleClick,
    TouchStart { x: f64, y: f64 },
    TouchMove { x: f64, y: f64 },
    TouchEnd,
    PointerMoved,
    PointerLeft,
    /// The fullscreen host observed an actual change.
    FullscreenChanged(bool),
}

/// Handle to a spawned playback session. Dropping it (or calling
/// [`SessionHandle::shutdown`]) cancels the session task, which tears down
/// both timers and all listeners on its way out, so navigating away never
/// leaks a ticking session.
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionInput>,
    events: broadcast::Sender<SessionEvent>,
    cancel: CancellationToken,
}

impl SessionHandle {
    pub fn send(&self, input: SessionInput) -> Result<(), Error> {
        self.commands.send(input).map_err(|_| Error::SessionClosed)
    }

    pub fn intent(&self, intent: PlayerIntent) -> Result<(), Error> {
        self.send(SessionInput::Intent(intent))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}

/// Spawn a playback session for (title, ordinal). Fails when the ordinal has
/// no episode; otherwise the returned handle is live immediately and a
/// history entry has been recorded for the play.
pub fn spawn_session(
    title: Title,
    ordinal: u32,
    surface: Arc<dyn MediaSurface>,
    fullscreen: Arc<dyn FullscreenHost>,
    media_events: mpsc::UnboundedReceiver<MediaEvent>,
    storage: Arc<dyn Storage>,
    config: SessionConfig,
) -> Result<SessionHandle, Error> {
    let progress = ProgressService::new(storage.clone());
    let history = HistoryService::new(storage);

    // Validate the ordinal first; a failed spawn must leave no trace in
    // the watch history.
    let controller = PlaybackController::new(title, ordinal, surface, fullscreen, progress)?;
    history.record(controller.title(), ordinal);

    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    let cancel = CancellationToken::new();

    tokio::spawn(run_session(
        controller,
        config,
        commands_rx,
        media_events,
        events_tx.clone(),
        cancel.clone(),
        history,
    ));

    Ok(SessionHandle {
        commands: commands_tx,
        events: events_tx,
        cancel,
    })
}

async fn run_session(
    mut controller: PlaybackController,
    config: SessionConfig,
    mut commands: mpsc::UnboundedReceiver<SessionInput>,
    mut media_events: mpsc::UnboundedReceiver<MediaEvent>,
    events_tx: broadcast::Sender<SessionEvent>,
    cancel: CancellationToken,
    history: HistoryService,
) {
    debug!("Session task started");

    let key_map = KeyMap {
        seek_step_secs: config.seek_step_secs,
        volume_step: config.volume_step,
    };
    let mut clicks = ClickArbiter::new(config.double_click_window);
    let mut taps = TapTracker::new(
        config.drag_threshold_px,
        config.quick_tap,
        config.double_tap_window,
    );

    let mut flush = tokio::time::interval_at(
        tokio::time::Instant::now() + config.progress_flush_interval,
        config.progress_flush_interval,
    );
    let mut hide_at: Option<Instant> = None;
    let mut stall_at: Option<Instant> = None;

    loop {
        // Resolve the wake reason first; the arbiters, interval and deadlines
        // are only touched after the select's futures are gone.
        let wake = tokio::select! {
            // Teardown beats any timer that became due in the same instant.
            biased;

            _ = cancel.cancelled() => Wake::Cancelled,
            input = commands.recv() => match input {
                Some(input) => Wake::Input(input),
                None => Wake::Cancelled,
            },
            event = media_events.recv() => match event {
                Some(event) => Wake::Media(event),
                // The media element going away is an unmount.
                None => Wake::Cancelled,
            },
            _ = flush.tick() => Wake::FlushDue,
            _ = sleep_until_opt(hide_at) => Wake::HideDue,
            _ = sleep_until_opt(clicks.deadline()) => Wake::ClickDue,
            _ = sleep_until_opt(taps.deadline()) => Wake::TapDue,
            _ = sleep_until_opt(stall_at) => Wake::StallDue,
        };

        let now = virtual_now();
        match wake {
            Wake::Cancelled => break,

            Wake::Input(input) => {
                let events = handle_input(
                    &mut controller, input, &key_map, &mut clicks, &mut taps, now,
                );
                if dispatch(&events_tx, &controller, &history, &mut flush, &config, events) {
                    stall_at = None;
                    hide_at = None;
                }
                rearm_hide(&controller, &mut hide_at, &config, now, true);
            }

            Wake::Media(event) => {
                let events = controller.handle_media_event(event);
                if dispatch(&events_tx, &controller, &history, &mut flush, &config, events) {
                    stall_at = None;
                    hide_at = None;
                }
                stall_at = if controller.session().is_buffering() {
                    stall_at.or(Some(now + config.stall_timeout))
                } else {
                    None
                };
                rearm_hide(&controller, &mut hide_at, &config, now, false);
            }

            Wake::FlushDue => {
                let events = controller.flush_progress();
                dispatch(&events_tx, &controller, &history, &mut flush, &config, events);
            }

            Wake::HideDue => {
                hide_at = None;
                let events = controller.on_hide_deadline();
                dispatch(&events_tx, &controller, &history, &mut flush, &config, events);
            }

            Wake::ClickDue => {
                if let Some(intent) = clicks.fire(now) {
                    let events = controller.apply_intent(intent);
                    dispatch(&events_tx, &controller, &history, &mut flush, &config, events);
                    rearm_hide(&controller, &mut hide_at, &config, now, true);
                }
            }

            Wake::TapDue => {
                if let Some(intent) = taps.fire(now) {
                    let events = controller.apply_intent(intent);
                    dispatch(&events_tx, &controller, &history, &mut flush, &config, events);
                    rearm_hide(&controller, &mut hide_at, &config, now, true);
                }
            }

            Wake::StallDue => {
                stall_at = None;
                warn!(
                    "Still buffering after {:?}, reporting stall",
                    config.stall_timeout
                );
                let _ = events_tx.send(SessionEvent::Stalled);
            }
        }
    }

    // Teardown: timers and listeners die with the task; tell subscribers.
    let _ = events_tx.send(SessionEvent::Closed);
    debug!("Session task terminated");
}

/// Why the session loop woke up.
enum Wake {
    Cancelled,
    Input(SessionInput),
    Media(MediaEvent),
    FlushDue,
    HideDue,
    ClickDue,
    TapDue,
    StallDue,
}

fn handle_input(
    controller: &mut PlaybackController,
    input: SessionInput,
    key_map: &KeyMap,
    clicks: &mut ClickArbiter,
    taps: &mut TapTracker,
    now: Instant,
) -> Vec<SessionEvent> {
    trace!("Session input {:?}", input);
    match input {
        SessionInput::Intent(intent) => controller.apply_intent(intent),
        SessionInput::Key(key) => match key_map.intent_for(key) {
            Some(intent) => controller.apply_intent(intent),
            None => Vec::new(),
        },
        SessionInput::Click => {
            clicks.on_click(now);
            Vec::new()
        }
        SessionInput::DoubleClick => {
            let intent = clicks.on_double_click();
            controller.apply_intent(intent)
        }
        SessionInput::TouchStart { x, y } => {
            taps.on_touch_start(x, y, now);
            Vec::new()
        }
        SessionInput::TouchMove { x, y } => {
            taps.on_touch_move(x, y);
            Vec::new()
        }
        SessionInput::TouchEnd => match taps.on_touch_end(now) {
            Some(intent) => controller.apply_intent(intent),
            None => Vec::new(),
        },
        SessionInput::PointerMoved => controller.on_activity(),
        SessionInput::PointerLeft => controller.on_pointer_leave(),
        SessionInput::FullscreenChanged(fullscreen) => {
            controller.on_fullscreen_changed(fullscreen)
        }
    }
}

/// Broadcast a batch of session events and apply their side effects.
/// Returns true when the batch contained an episode change, which restarts
/// the per-session timers and records the new play in history.
fn dispatch(
    events_tx: &broadcast::Sender<SessionEvent>,
    controller: &PlaybackController,
    history: &HistoryService,
    flush: &mut tokio::time::Interval,
    config: &SessionConfig,
    events: Vec<SessionEvent>,
) -> bool {
    let mut episode_changed = false;
    for event in events {
        if let SessionEvent::EpisodeChanged { ordinal, .. } = event {
            episode_changed = true;
            history.record(controller.title(), ordinal);
        }
        let _ = events_tx.send(event);
    }
    if episode_changed {
        *flush = tokio::time::interval_at(
            tokio::time::Instant::now() + config.progress_flush_interval,
            config.progress_flush_interval,
        );
    }
    episode_changed
}

/// Arm, rearm or disarm the controls-hide deadline. `reset` forces a fresh
/// delay (user activity); otherwise an already-armed deadline keeps running.
fn rearm_hide(
    controller: &PlaybackController,
    hide_at: &mut Option<Instant>,
    config: &SessionConfig,
    now: Instant,
    reset: bool,
) {
    if !controller.hide_timer_active() {
        *hide_at = None;
    } else if reset || hide_at.is_none() {
        *hide_at = Some(now + config.controls_hide_delay);
    }
}

/// Now, on tokio's clock, as a std instant. Keeps the input arbiters' time
/// arithmetic on the same (possibly test-paused) clock as the sleeps.
fn virtual_now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
        }
        None => std::future::pending().await,
    }
}
