use std::time::{Duration, Instant};

use super::PlayerIntent;

/// Disambiguates single from double clicks on the video surface. A single
/// click is only accepted as play/pause once the double-click window passes
/// with no second click; a double click wins and suppresses the single.
///
/// Deadline-driven: `on_click` arms a deadline the owner sleeps on, and
/// `fire` resolves the pending click once the deadline passes.
#[derive(Debug)]
pub struct ClickArbiter {
    window: Duration,
    pending: Option<Instant>,
}

impl ClickArbiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Register a click. Returns the deadline at which the click becomes a
    /// confirmed single click, or `None` when this click completed a pair.
    pub fn on_click(&mut self, now: Instant) -> Option<Instant> {
        if let Some(first) = self.pending {
            if now.duration_since(first) < self.window {
                // Second click of a pair; the double-click event resolves it.
                self.pending = None;
                return None;
            }
        }
        self.pending = Some(now);
        Some(now + self.window)
    }

    /// A double click always means fullscreen and cancels any pending single.
    pub fn on_double_click(&mut self) -> PlayerIntent {
        self.pending = None;
        PlayerIntent::ToggleFullscreen
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|t| t + self.window)
    }

    /// Resolve the pending click if its window has passed.
    pub fn fire(&mut self, now: Instant) -> Option<PlayerIntent> {
        let first = self.pending?;
        if now.duration_since(first) >= self.window {
            self.pending = None;
            Some(PlayerIntent::PlayPause)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arbiter() -> ClickArbiter {
        ClickArbiter::new(Duration::from_millis(200))
    }

    #[test]
    fn lone_click_becomes_play_pause_after_window() {
        let mut a = arbiter();
        let t0 = Instant::now();

        let deadline = a.on_click(t0).unwrap();
        assert_eq!(deadline, t0 + Duration::from_millis(200));
        assert_eq!(a.fire(t0 + Duration::from_millis(100)), None);
        assert_eq!(
            a.fire(t0 + Duration::from_millis(200)),
            Some(PlayerIntent::PlayPause)
        );
        assert_eq!(a.deadline(), None);
    }

    #[test]
    fn double_click_suppresses_single() {
        let mut a = arbiter();
        let t0 = Instant::now();

        a.on_click(t0);
        assert_eq!(a.on_click(t0 + Duration::from_millis(50)), None);
        assert_eq!(a.on_double_click(), PlayerIntent::ToggleFullscreen);
        assert_eq!(a.fire(t0 + Duration::from_millis(300)), None);
    }

    #[test]
    fn slow_second_click_starts_a_new_single() {
        let mut a = arbiter();
        let t0 = Instant::now();

        a.on_click(t0);
        assert_eq!(a.fire(t0 + Duration::from_millis(250)), Some(PlayerIntent::PlayPause));

        let t1 = t0 + Duration::from_millis(400);
        assert!(a.on_click(t1).is_some());
        assert_eq!(a.fire(t1 + Duration::from_millis(200)), Some(PlayerIntent::PlayPause));
    }
}
