//! Presentation core for a streaming video catalog: a playback session state
//! machine, deterministic input interpretation, catalog browsing, and local
//! persistence for the viewer's library features. Rendering and media
//! decoding stay behind the [`player::MediaSurface`] and
//! [`player::FullscreenHost`] seams of the embedding UI.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod input;
pub mod models;
pub mod player;
pub mod services;
pub mod storage;

#[cfg(test)]
mod test_utils;

pub use error::{Error, StorageError};
