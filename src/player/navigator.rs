//! Episode navigation: pure ordinal lookups against a title's episode list.
//! No wraparound; out-of-range ordinals are simply not found and callers
//! treat that as a no-op.

use crate::models::{Episode, Title};

pub fn episode(title: &Title, ordinal: u32) -> Option<&Episode> {
    title.episodes.iter().find(|ep| ep.ordinal == ordinal)
}

pub fn next(title: &Title, current: u32) -> Option<&Episode> {
    episode(title, current + 1)
}

pub fn prev(title: &Title, current: u32) -> Option<&Episode> {
    current.checked_sub(1).and_then(|o| episode(title, o))
}

/// Whether prev/next controls should be enabled at `current`; the same
/// lookup the navigation itself uses.
pub fn has_next(title: &Title, current: u32) -> bool {
    next(title, current).is_some()
}

pub fn has_prev(title: &Title, current: u32) -> bool {
    prev(title, current).is_some()
}
