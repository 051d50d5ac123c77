use std::sync::Arc;

use crate::error::StorageError;
use crate::models::{RatingSummary, TitleId, Vote, VoteTally};
use crate::storage::{Storage, StorageKey, read_json, write_json};

/// Star ratings and thumb votes, both client-side running values. Every star
/// rating counts as a fresh submission toward the running average, including
/// re-rating the same title. Tallies start at zero, never from fake seeds.
#[derive(Clone)]
pub struct RatingsService {
    storage: Arc<dyn Storage>,
}

impl RatingsService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn summary(&self, title_id: &TitleId) -> RatingSummary {
        read_json(self.storage.as_ref(), &StorageKey::Ratings(title_id.clone()))
            .unwrap_or_default()
    }

    /// Submit a 1-5 star rating. Out-of-range values are clamped.
    pub fn rate(&self, title_id: &TitleId, stars: u8) -> Result<RatingSummary, StorageError> {
        let stars = stars.clamp(1, 5);
        let mut summary = self.summary(title_id);

        let new_total = summary.total + 1;
        summary.average =
            (summary.average * summary.total as f64 + stars as f64) / new_total as f64;
        summary.total = new_total;
        summary.user_rating = Some(stars);

        write_json(
            self.storage.as_ref(),
            &StorageKey::Ratings(title_id.clone()),
            &summary,
        )?;
        Ok(summary)
    }

    pub fn tally(&self, title_id: &TitleId) -> VoteTally {
        read_json(self.storage.as_ref(), &StorageKey::Votes(title_id.clone())).unwrap_or_default()
    }

    /// Cast a thumb vote. Voting the same way twice retracts the vote; voting
    /// the other way moves the count across.
    pub fn vote(&self, title_id: &TitleId, vote: Vote) -> Result<VoteTally, StorageError> {
        let mut tally = self.tally(title_id);

        match tally.user_vote {
            Some(current) if current == vote => {
                match vote {
                    Vote::Up => tally.likes = tally.likes.saturating_sub(1),
                    Vote::Down => tally.dislikes = tally.dislikes.saturating_sub(1),
                }
                tally.user_vote = None;
            }
            Some(_) => {
                match vote {
                    Vote::Up => {
                        tally.dislikes = tally.dislikes.saturating_sub(1);
                        tally.likes += 1;
                    }
                    Vote::Down => {
                        tally.likes = tally.likes.saturating_sub(1);
                        tally.dislikes += 1;
                    }
                }
                tally.user_vote = Some(vote);
            }
            None => {
                match vote {
                    Vote::Up => tally.likes += 1,
                    Vote::Down => tally.dislikes += 1,
                }
                tally.user_vote = Some(vote);
            }
        }

        write_json(
            self.storage.as_ref(),
            &StorageKey::Votes(title_id.clone()),
            &tally,
        )?;
        Ok(tally)
    }
}
