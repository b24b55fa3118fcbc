use indexmap::IndexMap;

use crate::annotation::model::{CREATED_NOW, Comment, Reply};
use crate::annotation::store::AnnotationStore;
use crate::foundation::error::{ReelmarkError, ReelmarkResult};
use crate::foundation::ids::{CommentId, IdAllocator, ReplyId};

/// Comment/reply input box state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Composer {
    text: String,
    reply_target: Option<CommentId>,
}

impl Composer {
    /// Current input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the input text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Comment the next submit replies to, if any.
    pub fn reply_target(&self) -> Option<CommentId> {
        self.reply_target
    }

    /// Make the next submit a reply to `target`.
    pub fn reply_to(&mut self, target: CommentId) {
        self.reply_target = Some(target);
    }

    /// Go back to composing a new comment.
    pub fn cancel_reply(&mut self) {
        self.reply_target = None;
    }
}

/// Result of [`CommentLog::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// A new comment was created.
    Commented(CommentId),
    /// A reply was appended.
    Replied {
        /// Target comment.
        comment: CommentId,
        /// The new reply.
        reply: ReplyId,
    },
    /// The reply target no longer exists. The target was cleared and the text kept.
    MissingReplyTarget(CommentId),
}

/// Ordered list of review comments.
#[derive(Clone, Debug, Default)]
pub struct CommentLog {
    comments: IndexMap<CommentId, Comment>,
}

impl CommentLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Comments in creation order.
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.values()
    }

    /// Look up a comment.
    pub fn get(&self, id: CommentId) -> Option<&Comment> {
        self.comments.get(&id)
    }

    /// Number of comments.
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Whether there are no comments.
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Add a comment loaded from storage.
    pub fn insert_seeded(&mut self, comment: Comment) -> ReelmarkResult<()> {
        if self.comments.contains_key(&comment.id()) {
            return Err(ReelmarkError::validation(format!(
                "comment id {} already exists",
                comment.id()
            )));
        }
        self.comments.insert(comment.id(), comment);
        Ok(())
    }

    /// Flip a comment's completion flag. Returns the new value.
    pub fn toggle_completed(&mut self, id: CommentId) -> Option<bool> {
        self.comments.get_mut(&id).map(Comment::toggle_completed)
    }

    /// Submit the composer's text as a reply or a new comment.
    ///
    /// For a new comment the pending strokes are snapshotted, marked posted and moved into the
    /// comment in one step; the exclusive borrows keep anything from interleaving.
    pub fn submit(
        &mut self,
        composer: &mut Composer,
        store: &mut AnnotationStore,
        ids: &mut IdAllocator,
        author: &str,
        current_time: f64,
    ) -> SubmitOutcome {
        let text = composer.text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        let text = text.to_string();

        if let Some(target) = composer.reply_target.take() {
            let Some(comment) = self.comments.get_mut(&target) else {
                tracing::warn!(comment = %target, "reply target no longer exists");
                return SubmitOutcome::MissingReplyTarget(target);
            };
            let reply = Reply {
                id: ids.reply(),
                author: author.to_string(),
                text,
                created_label: CREATED_NOW.to_string(),
            };
            let reply_id = reply.id;
            comment.push_reply(reply);
            composer.text.clear();
            return SubmitOutcome::Replied {
                comment: target,
                reply: reply_id,
            };
        }

        let pending = store.pending_snapshot();
        store.mark_posted(pending.iter().map(|s| s.id));
        let comment = Comment::new(ids.comment(), author, text, pending, current_time);
        let id = comment.id();
        tracing::debug!(
            comment = %id,
            strokes = comment.strokes().len(),
            "posted comment"
        );
        self.comments.insert(id, comment);
        composer.text.clear();
        SubmitOutcome::Commented(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/aggregator.rs"]
mod tests;
