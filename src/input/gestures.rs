use std::time::{Duration, Instant};

/// A classified touch gesture from the generic recognizer used at catalog
/// level (carousel paging, pull-to-refresh, context menus).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Swipe(SwipeDirection),
    DoubleTap,
    LongPress,
    /// Ratio of the current to the initial inter-finger distance.
    Pinch(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy)]
pub struct GestureConfig {
    /// Minimum dominant-axis travel for a completed touch to count as a swipe.
    pub swipe_threshold_px: f64,
    pub long_press_delay: Duration,
    pub double_tap_window: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: crate::constants::DEFAULT_SWIPE_THRESHOLD_PX,
            long_press_delay: Duration::from_millis(crate::constants::DEFAULT_LONG_PRESS_DELAY_MS),
            double_tap_window: Duration::from_millis(
                crate::constants::DEFAULT_DOUBLE_TAP_WINDOW_MS,
            ),
        }
    }
}

/// Normalizes raw touch events into [`Gesture`]s. One finger gives taps,
/// swipes and long presses; two fingers give pinch scale. The long press is
/// deadline-driven: `long_press_deadline`/`fire_long_press` follow the same
/// shape as the click and tap arbiters.
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    touch_start: Option<(f64, f64)>,
    last_tap: Option<Instant>,
    initial_span: Option<f64>,
    long_press_due: Option<Instant>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Begin a touch. `points` holds all active touch points; with two the
    /// recognizer starts tracking pinch scale. A second touch-start inside
    /// the double-tap window is reported as a double tap immediately.
    pub fn on_touch_start(&mut self, points: &[(f64, f64)], now: Instant) -> Option<Gesture> {
        let &(x, y) = points.first()?;
        self.touch_start = Some((x, y));
        self.long_press_due = Some(now + self.config.long_press_delay);

        if points.len() == 2 {
            self.initial_span = Some(span(points[0], points[1]));
        }

        if let Some(last) = self.last_tap {
            if now.duration_since(last) < self.config.double_tap_window {
                self.last_tap = None;
                return Some(Gesture::DoubleTap);
            }
        }
        self.last_tap = Some(now);
        None
    }

    /// Movement cancels the long press; with two fingers it reports pinch
    /// scale relative to the initial span.
    pub fn on_touch_move(&mut self, points: &[(f64, f64)]) -> Option<Gesture> {
        self.long_press_due = None;

        if points.len() == 2 {
            if let Some(initial) = self.initial_span {
                if initial > 0.0 {
                    return Some(Gesture::Pinch(span(points[0], points[1]) / initial));
                }
            }
        }
        None
    }

    /// End the touch at (x, y). A completed touch is a swipe when its
    /// dominant-axis travel exceeds the threshold; the sign picks the
    /// direction.
    pub fn on_touch_end(&mut self, x: f64, y: f64) -> Option<Gesture> {
        self.long_press_due = None;
        self.initial_span = None;
        let (sx, sy) = self.touch_start.take()?;

        let dx = x - sx;
        let dy = y - sy;

        if dx.abs().max(dy.abs()) <= self.config.swipe_threshold_px {
            return None;
        }

        let direction = if dx.abs() > dy.abs() {
            if dx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if dy > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        };

        Some(Gesture::Swipe(direction))
    }

    pub fn long_press_deadline(&self) -> Option<Instant> {
        self.long_press_due
    }

    pub fn fire_long_press(&mut self, now: Instant) -> Option<Gesture> {
        let due = self.long_press_due?;
        if now >= due {
            self.long_press_due = None;
            Some(Gesture::LongPress)
        } else {
            None
        }
    }
}

fn span(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

type Handler = Box<dyn Fn() + Send + Sync>;
type PinchHandler = Box<dyn Fn(f64) + Send + Sync>;

/// Optional per-gesture callbacks. A classified gesture with no registered
/// handler is silently dropped.
#[derive(Default)]
pub struct GestureBindings {
    pub on_swipe_left: Option<Handler>,
    pub on_swipe_right: Option<Handler>,
    pub on_swipe_up: Option<Handler>,
    pub on_swipe_down: Option<Handler>,
    pub on_double_tap: Option<Handler>,
    pub on_long_press: Option<Handler>,
    pub on_pinch: Option<PinchHandler>,
}

impl GestureBindings {
    pub fn dispatch(&self, gesture: Gesture) {
        match gesture {
            Gesture::Swipe(SwipeDirection::Left) => call(&self.on_swipe_left),
            Gesture::Swipe(SwipeDirection::Right) => call(&self.on_swipe_right),
            Gesture::Swipe(SwipeDirection::Up) => call(&self.on_swipe_up),
            Gesture::Swipe(SwipeDirection::Down) => call(&self.on_swipe_down),
            Gesture::DoubleTap => call(&self.on_double_tap),
            Gesture::LongPress => call(&self.on_long_press),
            Gesture::Pinch(scale) => {
                if let Some(handler) = &self.on_pinch {
                    handler(scale);
                }
            }
        }
    }
}

fn call(handler: &Option<Handler>) {
    if let Some(handler) = handler {
        handler();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recognizer() -> GestureRecognizer {
        GestureRecognizer::new(GestureConfig::default())
    }

    #[test]
    fn horizontal_swipe_beats_smaller_vertical_delta() {
        let mut g = recognizer();
        let now = Instant::now();

        g.on_touch_start(&[(100.0, 100.0)], now);
        assert_eq!(
            g.on_touch_end(20.0, 130.0),
            Some(Gesture::Swipe(SwipeDirection::Left))
        );
    }

    #[test]
    fn vertical_swipe_down() {
        let mut g = recognizer();
        let now = Instant::now();

        g.on_touch_start(&[(100.0, 100.0)], now);
        assert_eq!(
            g.on_touch_end(110.0, 200.0),
            Some(Gesture::Swipe(SwipeDirection::Down))
        );
    }

    #[test]
    fn sub_threshold_movement_is_not_a_swipe() {
        let mut g = recognizer();
        let now = Instant::now();

        g.on_touch_start(&[(100.0, 100.0)], now);
        assert_eq!(g.on_touch_end(140.0, 120.0), None);
    }

    #[test]
    fn double_tap_detected_on_second_start() {
        let mut g = recognizer();
        let t0 = Instant::now();

        assert_eq!(g.on_touch_start(&[(10.0, 10.0)], t0), None);
        g.on_touch_end(10.0, 10.0);
        assert_eq!(
            g.on_touch_start(&[(10.0, 10.0)], t0 + Duration::from_millis(150)),
            Some(Gesture::DoubleTap)
        );
    }

    #[test]
    fn long_press_fires_only_without_movement() {
        let mut g = recognizer();
        let t0 = Instant::now();

        g.on_touch_start(&[(10.0, 10.0)], t0);
        assert!(g.long_press_deadline().is_some());
        g.on_touch_move(&[(15.0, 10.0)]);
        assert!(g.long_press_deadline().is_none());
        assert_eq!(g.fire_long_press(t0 + Duration::from_secs(1)), None);

        g.on_touch_start(&[(10.0, 10.0)], t0 + Duration::from_secs(2));
        assert_eq!(
            g.fire_long_press(t0 + Duration::from_secs(3)),
            Some(Gesture::LongPress)
        );
    }

    #[test]
    fn pinch_reports_span_ratio() {
        let mut g = recognizer();
        let now = Instant::now();

        g.on_touch_start(&[(0.0, 0.0), (100.0, 0.0)], now);
        match g.on_touch_move(&[(0.0, 0.0), (200.0, 0.0)]) {
            Some(Gesture::Pinch(scale)) => assert!((scale - 2.0).abs() < 1e-9),
            other => panic!("expected pinch, got {:?}", other),
        }
    }

    #[test]
    fn unbound_gesture_is_silently_dropped() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();

        let bindings = GestureBindings {
            on_swipe_left: Some(Box::new(move || {
                hits_clone.fetch_add(1, Ordering::SeqCst);
            })),
            ..Default::default()
        };

        bindings.dispatch(Gesture::Swipe(SwipeDirection::Left));
        bindings.dispatch(Gesture::Swipe(SwipeDirection::Down));
        bindings.dispatch(Gesture::LongPress);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
