#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rookery::models::{Episode, Title, TitleId, TitleStatus};
use rookery::player::{FullscreenHost, MediaSurface, PlaybackRate};

/// Opt-in log output for failing tests (RUST_LOG=rookery=trace).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Media element double for integration tests: records commands, mirrors
/// property writes.
#[derive(Default)]
pub struct FakeSurface {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    loaded: Vec<String>,
    play_requests: usize,
    pause_requests: usize,
    position: f64,
    volume: f64,
    muted: bool,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(&self) -> Vec<String> {
        self.inner.lock().unwrap().loaded.clone()
    }

    pub fn play_requests(&self) -> usize {
        self.inner.lock().unwrap().play_requests
    }

    pub fn pause_requests(&self) -> usize {
        self.inner.lock().unwrap().pause_requests
    }
}

impl MediaSurface for FakeSurface {
    fn load(&self, media: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.loaded.push(media.to_string());
        inner.position = 0.0;
    }

    fn request_play(&self) {
        self.inner.lock().unwrap().play_requests += 1;
    }

    fn request_pause(&self) {
        self.inner.lock().unwrap().pause_requests += 1;
    }

    fn position(&self) -> f64 {
        self.inner.lock().unwrap().position
    }

    fn set_position(&self, secs: f64) {
        self.inner.lock().unwrap().position = secs;
    }

    fn duration(&self) -> Option<f64> {
        None
    }

    fn volume(&self) -> f64 {
        self.inner.lock().unwrap().volume
    }

    fn set_volume(&self, volume: f64) {
        self.inner.lock().unwrap().volume = volume;
    }

    fn muted(&self) -> bool {
        self.inner.lock().unwrap().muted
    }

    fn set_muted(&self, muted: bool) {
        self.inner.lock().unwrap().muted = muted;
    }

    fn set_rate(&self, _rate: PlaybackRate) {}
}

#[derive(Default)]
pub struct FakeFullscreen {
    enter_calls: Mutex<usize>,
    exit_calls: Mutex<usize>,
}

impl FakeFullscreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_calls(&self) -> usize {
        *self.enter_calls.lock().unwrap()
    }

    pub fn exit_calls(&self) -> usize {
        *self.exit_calls.lock().unwrap()
    }
}

impl FullscreenHost for FakeFullscreen {
    fn enter(&self) {
        *self.enter_calls.lock().unwrap() += 1;
    }

    fn exit(&self) {
        *self.exit_calls.lock().unwrap() += 1;
    }

    fn is_fullscreen(&self) -> bool {
        false
    }
}

pub fn title_with_episodes(id: &str, count: u32) -> Title {
    Title {
        id: TitleId::new(id),
        name: id.to_uppercase(),
        release_year: 2021,
        status: TitleStatus::Airing,
        genres: vec!["Drama".to_string()],
        synopsis: String::new(),
        poster: None,
        episodes: (1..=count)
            .map(|n| Episode {
                ordinal: n,
                media: format!("{id}-ep{n}.mp4"),
                name: format!("Episode {n}"),
            })
            .collect(),
    }
}

pub fn fakes() -> (Arc<FakeSurface>, Arc<FakeFullscreen>) {
    (Arc::new(FakeSurface::new()), Arc::new(FakeFullscreen::new()))
}
