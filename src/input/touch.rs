use std::time::{Duration, Instant};

use super::PlayerIntent;

/// Tap handling on the video surface: a quick, non-drag tap toggles the
/// controls; a second tap inside the double-tap window promotes the pair to
/// fullscreen and the pending controls toggle is never applied.
///
/// The controls toggle is therefore deferred by one double-tap window, the
/// same deadline/fire shape as [`super::ClickArbiter`].
#[derive(Debug)]
pub struct TapTracker {
    drag_threshold_px: f64,
    quick_tap: Duration,
    double_window: Duration,
    start: Option<(f64, f64, Instant)>,
    dragging: bool,
    last_tap: Option<Instant>,
    pending_toggle: Option<Instant>,
}

impl TapTracker {
    pub fn new(drag_threshold_px: f64, quick_tap: Duration, double_window: Duration) -> Self {
        Self {
            drag_threshold_px,
            quick_tap,
            double_window,
            start: None,
            dragging: false,
            last_tap: None,
            pending_toggle: None,
        }
    }

    pub fn on_touch_start(&mut self, x: f64, y: f64, now: Instant) {
        self.start = Some((x, y, now));
        self.dragging = false;
    }

    /// Any movement beyond the threshold in either axis disqualifies the
    /// touch from being a tap.
    pub fn on_touch_move(&mut self, x: f64, y: f64) {
        if let Some((sx, sy, _)) = self.start {
            if (x - sx).abs() > self.drag_threshold_px || (y - sy).abs() > self.drag_threshold_px {
                self.dragging = true;
            }
        }
    }

    pub fn on_touch_end(&mut self, now: Instant) -> Option<PlayerIntent> {
        let (_, _, started) = self.start.take()?;
        if self.dragging {
            self.dragging = false;
            return None;
        }

        if let Some(last) = self.last_tap {
            if now.duration_since(last) < self.double_window {
                // Second tap of a pair: fullscreen wins, the deferred
                // controls toggle is dropped.
                self.last_tap = None;
                self.pending_toggle = None;
                return Some(PlayerIntent::ToggleFullscreen);
            }
        }

        self.last_tap = Some(now);
        if now.duration_since(started) < self.quick_tap {
            self.pending_toggle = Some(now + self.double_window);
        }
        None
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending_toggle
    }

    /// Resolve the deferred controls toggle once its window has passed.
    pub fn fire(&mut self, now: Instant) -> Option<PlayerIntent> {
        let due = self.pending_toggle?;
        if now >= due {
            self.pending_toggle = None;
            Some(PlayerIntent::ToggleControls)
        } else {
            None
        }
    }
}

impl Default for TapTracker {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_DRAG_THRESHOLD_PX,
            Duration::from_millis(crate::constants::DEFAULT_QUICK_TAP_MS),
            Duration::from_millis(crate::constants::DEFAULT_DOUBLE_TAP_WINDOW_MS),
        )
    }
}
