// Tuning constants in one place. Config fields default to these values;
// adjust here to change behavior crate-wide.

/// Namespace prefix shared by every persistent storage key.
pub const STORAGE_PREFIX: &str = "rookery";

// === Playback timing ===
pub const DEFAULT_SEEK_STEP_SECS: f64 = 10.0;
pub const DEFAULT_VOLUME_STEP: f64 = 0.1;
pub const DEFAULT_CONTROLS_HIDE_DELAY_MS: u64 = 3_000;
pub const DEFAULT_PROGRESS_FLUSH_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_STALL_TIMEOUT_MS: u64 = 30_000;

// === Input timing ===
pub const DEFAULT_DOUBLE_CLICK_WINDOW_MS: u64 = 200;
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 300;
pub const DEFAULT_QUICK_TAP_MS: u64 = 200;
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 10.0;
pub const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 50.0;
pub const DEFAULT_LONG_PRESS_DELAY_MS: u64 = 500;

// === Library caps ===
pub const DEFAULT_HISTORY_CAP: usize = 50;
pub const DEFAULT_SEARCH_HISTORY_CAP: usize = 10;
