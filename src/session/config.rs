use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::annotation::model::{Comment, Reply, Stroke};
use crate::capture::drawing::PenStyle;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelmarkError, ReelmarkResult};
use crate::foundation::ids::{CommentId, StrokeId};

fn default_hover_hide_ms() -> u64 {
    1500
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Descriptive metadata of the item under review, supplied by the upstream page.
pub struct ReviewItemMeta {
    /// Display identifier (shot or asset code).
    pub identifier: String,
    /// Sequence the item belongs to.
    #[serde(default)]
    pub sequence: Option<String>,
    /// Production status label.
    #[serde(default)]
    pub status: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Due date, as provided upstream.
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Start-up configuration injected by the host. The engine never fetches any of it.
pub struct ReviewConfig {
    /// Source URL of the media under review.
    pub video_url: String,
    /// Item metadata.
    pub item: ReviewItemMeta,
    /// Authenticated user; author of new comments and replies.
    pub author: String,
    /// Logical drawing resolution.
    #[serde(default)]
    pub canvas: Canvas,
    /// Initial pen style.
    #[serde(default)]
    pub pen: PenStyle,
    /// Delay before hover-revealed UI hides after the pointer leaves.
    #[serde(default = "default_hover_hide_ms")]
    pub hover_hide_ms: u64,
}

impl ReviewConfig {
    /// Minimal configuration with default canvas, pen and hover delay.
    pub fn new(
        video_url: impl Into<String>,
        identifier: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            video_url: video_url.into(),
            item: ReviewItemMeta {
                identifier: identifier.into(),
                sequence: None,
                status: None,
                description: None,
                due_date: None,
            },
            author: author.into(),
            canvas: Canvas::default(),
            pen: PenStyle::default(),
            hover_hide_ms: default_hover_hide_ms(),
        }
    }

    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelmarkResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelmarkError::serde(format!("parse review config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelmarkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelmarkError::validation(format!("open review config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check required fields and value ranges.
    pub fn validate(&self) -> ReelmarkResult<()> {
        if self.video_url.trim().is_empty() {
            return Err(ReelmarkError::validation("video_url must be non-empty"));
        }
        if self.item.identifier.trim().is_empty() {
            return Err(ReelmarkError::validation(
                "item identifier must be non-empty",
            ));
        }
        if self.author.trim().is_empty() {
            return Err(ReelmarkError::validation("author must be non-empty"));
        }
        self.canvas.validate()?;
        self.pen.validate()?;
        Ok(())
    }

    /// Hover auto-hide delay.
    pub fn hover_hide_delay(&self) -> Duration {
        Duration::from_millis(self.hover_hide_ms)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Persisted form of a comment, as loaded at start-up.
pub struct SeedComment {
    /// Comment id.
    pub id: CommentId,
    /// Author display name.
    pub author: String,
    /// Comment body.
    pub text: String,
    /// Stored creation label.
    #[serde(default)]
    pub created_label: String,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
    /// Replies in order.
    #[serde(default)]
    pub replies: Vec<Reply>,
    /// Strokes posted with the comment.
    #[serde(default)]
    pub strokes: Vec<Stroke>,
    /// Primary timestamp for drawing-less comments.
    #[serde(default)]
    pub primary_timestamp: Option<f64>,
}

impl SeedComment {
    /// Rebuild the comment; timestamps are re-derived from the strokes.
    pub fn into_comment(self) -> Comment {
        Comment::new(
            self.id,
            self.author,
            self.text,
            self.strokes,
            self.primary_timestamp.unwrap_or(0.0),
        )
        .with_created_label(self.created_label)
        .with_completed(self.completed)
        .with_replies(self.replies)
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Initial comments and pending strokes loaded from storage.
pub struct ReviewSeed {
    /// Posted comments, oldest first.
    #[serde(default)]
    pub comments: Vec<SeedComment>,
    /// Strokes drawn but not yet attached to a comment.
    #[serde(default)]
    pub pending_strokes: Vec<Stroke>,
}

impl ReviewSeed {
    /// Parse a seed from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelmarkResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelmarkError::serde(format!("parse review seed JSON: {e}")))
    }

    /// Check every stroke is drawable and stamped with a valid time.
    pub fn validate(&self) -> ReelmarkResult<()> {
        let strokes = self
            .comments
            .iter()
            .flat_map(|c| c.strokes.iter())
            .chain(self.pending_strokes.iter());
        for s in strokes {
            validate_seed_stroke(s)?;
        }
        Ok(())
    }

    /// Largest id mentioned anywhere in the seed.
    pub(crate) fn max_raw_id(&self) -> u64 {
        let comment_ids = self.comments.iter().map(|c| c.id.0);
        let reply_ids = self
            .comments
            .iter()
            .flat_map(|c| c.replies.iter().map(|r| r.id.0));
        let stroke_ids = self
            .comments
            .iter()
            .flat_map(|c| c.strokes.iter())
            .chain(self.pending_strokes.iter())
            .map(|s| s.id.0);
        comment_ids
            .chain(reply_ids)
            .chain(stroke_ids)
            .max()
            .unwrap_or(0)
    }

    /// Ids of strokes owned by seeded comments.
    pub(crate) fn posted_ids(&self) -> impl Iterator<Item = StrokeId> + '_ {
        self.comments
            .iter()
            .flat_map(|c| c.strokes.iter().map(|s| s.id))
    }
}

fn validate_seed_stroke(s: &Stroke) -> ReelmarkResult<()> {
    if s.path.is_empty() {
        return Err(ReelmarkError::validation(format!(
            "stroke {} has an empty path",
            s.id
        )));
    }
    if !s.timestamp.is_finite() || s.timestamp < 0.0 {
        return Err(ReelmarkError::validation(format!(
            "stroke {} timestamp must be finite and >= 0",
            s.id
        )));
    }
    if !s.width.is_finite() || s.width <= 0.0 {
        return Err(ReelmarkError::validation(format!(
            "stroke {} width must be finite and > 0",
            s.id
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
