pub mod controller;
pub mod navigator;
mod runner;
mod session;
mod traits;
mod types;

pub use controller::PlaybackController;
pub use runner::{SessionConfig, SessionHandle, SessionInput, spawn_session};
pub use session::PlaybackSession;
pub use traits::{FullscreenHost, MediaEvent, MediaSurface};
pub use types::{PlaybackRate, PlayerState};
