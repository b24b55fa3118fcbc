use crate::foundation::core::{BezPath, Point, Rgba8};
use crate::foundation::ids::{CommentId, ReplyId, StrokeId};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A single freehand gesture bound to one playback timestamp.
///
/// Strokes are created once, on gesture completion, and never mutated afterwards.
pub struct Stroke {
    /// Unique stroke id.
    pub id: StrokeId,
    /// Ordered points in logical canvas coordinates (at least one).
    pub path: Vec<Point>,
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in logical pixels.
    pub width: f64,
    /// Playback time (seconds) at which the gesture completed.
    pub timestamp: f64,
}

impl Stroke {
    /// Polyline through the stroke's points.
    pub fn to_bezpath(&self) -> BezPath {
        polyline(&self.path)
    }
}

/// Build a polyline path through `points`.
pub fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(&first) = it.next() {
        path.move_to(first);
        for &p in it {
            path.line_to(p);
        }
    }
    path
}

/// Sorted, de-duplicated timestamps of `strokes`.
pub fn distinct_timestamps<'a>(strokes: impl IntoIterator<Item = &'a Stroke>) -> Vec<f64> {
    let mut ts: Vec<f64> = strokes.into_iter().map(|s| s.timestamp).collect();
    ts.sort_by(f64::total_cmp);
    ts.dedup();
    ts
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A threaded response to a [`Comment`].
pub struct Reply {
    /// Unique reply id.
    pub id: ReplyId,
    /// Author display name.
    pub author: String,
    /// Reply body.
    pub text: String,
    /// Human-readable creation label ("now" for fresh replies).
    pub created_label: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A review note aggregating zero or more posted strokes.
///
/// `timestamps` is derived from `strokes` at construction and cannot be set independently.
pub struct Comment {
    id: CommentId,
    author: String,
    text: String,
    timestamps: Vec<f64>,
    primary_timestamp: f64,
    created_label: String,
    completed: bool,
    replies: Vec<Reply>,
    strokes: Vec<Stroke>,
}

/// Label given to freshly created comments and replies.
pub const CREATED_NOW: &str = "now";

impl Comment {
    /// Build a comment from its posted strokes.
    ///
    /// `fallback_time` becomes the primary timestamp when `strokes` is empty; otherwise the
    /// earliest stroke timestamp is used.
    pub fn new(
        id: CommentId,
        author: impl Into<String>,
        text: impl Into<String>,
        strokes: Vec<Stroke>,
        fallback_time: f64,
    ) -> Self {
        let timestamps = distinct_timestamps(&strokes);
        let primary_timestamp = timestamps.first().copied().unwrap_or(fallback_time);
        Self {
            id,
            author: author.into(),
            text: text.into(),
            timestamps,
            primary_timestamp,
            created_label: CREATED_NOW.to_string(),
            completed: false,
            replies: Vec::new(),
            strokes,
        }
    }

    /// Replace the creation label (seeded comments carry their stored label).
    pub fn with_created_label(mut self, label: impl Into<String>) -> Self {
        self.created_label = label.into();
        self
    }

    /// Set the completion flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Attach pre-existing replies.
    pub fn with_replies(mut self, replies: Vec<Reply>) -> Self {
        self.replies = replies;
        self
    }

    /// Comment id.
    pub fn id(&self) -> CommentId {
        self.id
    }

    /// Author display name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Comment body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Distinct stroke timestamps, ascending.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Earliest stroke time, or the playback time at submit for drawing-less comments.
    pub fn primary_timestamp(&self) -> f64 {
        self.primary_timestamp
    }

    /// Creation label.
    pub fn created_label(&self) -> &str {
        &self.created_label
    }

    /// Whether the note has been resolved.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Replies in arrival order.
    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    /// Strokes posted with this comment.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub(crate) fn push_reply(&mut self, reply: Reply) {
        self.replies.push(reply);
    }

    pub(crate) fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/model.rs"]
mod tests;
