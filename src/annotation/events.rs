use std::sync::mpsc::Sender;

use crate::annotation::model::Comment;
use crate::foundation::ids::{ReplyId, StrokeId};

/// Why pending strokes were deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionReason {
    /// Ctrl/Cmd+Z or an explicit undo.
    Undo,
    /// Clear of all pending strokes.
    Clear,
    /// Alt-click on a pending timeline marker.
    Marker,
}

/// Notifications for the external persistence collaborator.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReviewEvent {
    /// A new comment was posted (with its strokes).
    CommentCreated {
        /// The full comment.
        comment: Comment,
    },
    /// A reply was appended to an existing comment.
    ReplyAppended {
        /// The full comment, reply included.
        comment: Comment,
        /// Id of the new reply.
        reply: ReplyId,
    },
    /// A comment's completion flag changed.
    CommentUpdated {
        /// The full comment.
        comment: Comment,
    },
    /// Pending strokes were deleted.
    StrokesDeleted {
        /// Deleted stroke ids, in deletion order.
        ids: Vec<StrokeId>,
        /// What triggered the deletion.
        reason: DeletionReason,
    },
}

/// Fire-and-forget receiver of [`ReviewEvent`]s.
///
/// The engine never waits on a sink; local state is already updated when `emit` runs.
pub trait EventSink {
    /// Deliver one event.
    fn emit(&mut self, event: ReviewEvent);
}

impl EventSink for Vec<ReviewEvent> {
    fn emit(&mut self, event: ReviewEvent) {
        self.push(event);
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: ReviewEvent) {}
}

/// Sink forwarding events over a std channel to a persistence worker.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<ReviewEvent>,
}

impl ChannelSink {
    /// Wrap a channel sender.
    pub fn new(tx: Sender<ReviewEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: ReviewEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("review event receiver disconnected; event dropped");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/events.rs"]
mod tests;
