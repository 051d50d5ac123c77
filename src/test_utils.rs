#![cfg(test)]

use std::sync::Mutex;

use chrono::Utc;

use crate::catalog::Catalog;
use crate::models::{Episode, HistoryEntry, Title, TitleId, TitleStatus};
use crate::player::{FullscreenHost, MediaSurface, PlaybackRate};

/// In-memory media element double. Records commands and mirrors property
/// writes so assertions can observe what the controller asked for.
pub struct FakeSurface {
    inner: Mutex<FakeSurfaceState>,
}

#[derive(Default)]
struct FakeSurfaceState {
    loaded: Vec<String>,
    play_requests: usize,
    pause_requests: usize,
    position: f64,
    duration: Option<f64>,
    volume: f64,
    muted: bool,
    rate: PlaybackRate,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FakeSurfaceState {
                volume: 0.5,
                ..Default::default()
            }),
        }
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

    pub fn rate(&self) -> PlaybackRate {
        self.inner.lock().unwrap().rate
    }
}

impl MediaSurface for FakeSurface {
    fn load(&self, media: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.loaded.push(media.to_string());
        inner.position = 0.0;
        inner.duration = None;
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
        self.inner.lock().unwrap().duration
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

    fn set_rate(&self, rate: PlaybackRate) {
        self.inner.lock().unwrap().rate = rate;
    }
}

/// Fullscreen host double counting enter/exit requests.
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

/// A title whose episodes carry media references "{id}-ep{n}.mp4".
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

fn sample_title(
    id: &str,
    name: &str,
    year: u32,
    status: TitleStatus,
    genres: &[&str],
    episodes: u32,
) -> Title {
    Title {
        id: TitleId::new(id),
        name: name.to_string(),
        release_year: year,
        status,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        synopsis: format!("Synopsis for {name}."),
        poster: Some(format!("/posters/{id}.jpg")),
        episodes: (1..=episodes)
            .map(|n| Episode {
                ordinal: n,
                media: format!("{id}-ep{n}.mp4"),
                name: format!("Episode {n}"),
            })
            .collect(),
    }
}

/// A small catalog with varied years, genres, statuses and episode counts.
/// "march" is the only name matching a search for "march".
pub fn sample_titles() -> Vec<Title> {
    vec![
        sample_title(
            "frozen-shores",
            "Frozen Shores",
            2023,
            TitleStatus::Airing,
            &["Adventure", "Nature"],
            12,
        ),
        sample_title(
            "march",
            "The Long March",
            2019,
            TitleStatus::Completed,
            &["Nature", "Documentary"],
            8,
        ),
        sample_title(
            "deep-dive",
            "Deep Dive",
            2022,
            TitleStatus::Completed,
            &["Nature"],
            4,
        ),
        sample_title(
            "city-lights",
            "City Lights",
            2017,
            TitleStatus::Feature,
            &["Drama"],
            1,
        ),
        sample_title(
            "southern-winds",
            "Southern Winds",
            2024,
            TitleStatus::Airing,
            &["Adventure"],
            3,
        ),
    ]
}

pub fn sample_catalog() -> Catalog {
    Catalog::new(sample_titles())
}

pub fn history_entry(id: &str, ordinal: u32) -> HistoryEntry {
    HistoryEntry {
        title_id: TitleId::new(id),
        title_name: id.to_string(),
        ordinal,
        timestamp: Utc::now(),
        poster: None,
    }
}
