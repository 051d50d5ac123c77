use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::{Comment, CommentId, TitleId};
use crate::storage::{Storage, StorageKey, read_json, write_json};

/// Threaded per-episode comments. One level of nesting: top-level comments
/// carry replies, replies do not.
#[derive(Clone)]
pub struct CommentsService {
    storage: Arc<dyn Storage>,
}

impl CommentsService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Newest top-level comment first.
    pub fn for_episode(&self, title_id: &TitleId, ordinal: u32) -> Vec<Comment> {
        read_json(
            self.storage.as_ref(),
            &StorageKey::Comments(title_id.clone(), ordinal),
        )
        .unwrap_or_default()
    }

    pub fn add(
        &self,
        title_id: &TitleId,
        ordinal: u32,
        user: &str,
        content: &str,
    ) -> Result<Comment, StorageError> {
        let comment = new_comment(user, content);
        let mut comments = self.for_episode(title_id, ordinal);
        comments.insert(0, comment.clone());
        self.write(title_id, ordinal, &comments)?;
        Ok(comment)
    }

    /// Append a reply to a top-level comment. Unknown parent is a no-op.
    pub fn reply(
        &self,
        title_id: &TitleId,
        ordinal: u32,
        parent: &CommentId,
        user: &str,
        content: &str,
    ) -> Result<Option<Comment>, StorageError> {
        let mut comments = self.for_episode(title_id, ordinal);
        let Some(target) = comments.iter_mut().find(|c| c.id == *parent) else {
            return Ok(None);
        };
        let reply = new_comment(user, content);
        target.replies.push(reply.clone());
        self.write(title_id, ordinal, &comments)?;
        Ok(Some(reply))
    }

    /// Increment the like counter on a comment or one of its replies.
    pub fn like(
        &self,
        title_id: &TitleId,
        ordinal: u32,
        comment_id: &CommentId,
    ) -> Result<(), StorageError> {
        let mut comments = self.for_episode(title_id, ordinal);
        for comment in comments.iter_mut() {
            if comment.id == *comment_id {
                comment.likes += 1;
            } else if let Some(reply) =
                comment.replies.iter_mut().find(|r| r.id == *comment_id)
            {
                reply.likes += 1;
            }
        }
        self.write(title_id, ordinal, &comments)
    }

    fn write(
        &self,
        title_id: &TitleId,
        ordinal: u32,
        comments: &[Comment],
    ) -> Result<(), StorageError> {
        write_json(
            self.storage.as_ref(),
            &StorageKey::Comments(title_id.clone(), ordinal),
            &comments,
        )
    }
}

fn new_comment(user: &str, content: &str) -> Comment {
    Comment {
        id: CommentId::new(Uuid::new_v4().to_string()),
        user: user.to_string(),
        content: content.trim().to_string(),
        timestamp: Utc::now(),
        likes: 0,
        replies: Vec::new(),
    }
}
