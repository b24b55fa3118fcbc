use crate::annotation::model::Comment;
use crate::annotation::store::AnnotationStore;
use crate::foundation::core::time_ratio;
use crate::foundation::ids::{CommentId, StrokeId};
use crate::playback::controller::PlaybackState;

/// Markers within this many seconds of the playhead are emphasized.
pub const MARKER_EMPHASIS_WINDOW_SECS: f64 = 0.3;

/// Posted vs. pending marker flavor.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerKind {
    /// Outlined marker for a stroke not yet attached to a comment.
    Pending,
    /// Filled marker for a stroke owned by a comment.
    Posted {
        /// Owning comment.
        comment: CommentId,
        /// Tooltip text (the comment body).
        tooltip: String,
    },
}

/// Timeline marker for one stroke.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineMarker {
    /// Stroke the marker stands for.
    pub stroke: StrokeId,
    /// Stroke timestamp in seconds.
    pub timestamp: f64,
    /// Horizontal position, 0..=100; 0 while the duration is unknown.
    pub position_percent: f64,
    /// Whether the playhead is close enough to emphasize the marker.
    pub emphasized: bool,
    /// Pending or posted.
    #[serde(flatten)]
    pub kind: MarkerKind,
}

/// What a click on a marker should do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerAction {
    /// Seek playback to the marker time.
    Seek(f64),
    /// Delete the pending stroke behind the marker.
    DeletePending(StrokeId),
}

impl TimelineMarker {
    fn new(stroke: StrokeId, timestamp: f64, playback: &PlaybackState, kind: MarkerKind) -> Self {
        Self {
            stroke,
            timestamp,
            position_percent: time_ratio(timestamp, playback.duration) * 100.0,
            emphasized: (timestamp - playback.current_time).abs() < MARKER_EMPHASIS_WINDOW_SECS,
            kind,
        }
    }

    /// Whether this marker stands for a pending stroke.
    pub fn is_pending(&self) -> bool {
        matches!(self.kind, MarkerKind::Pending)
    }

    /// Resolve a click. Alt-click deletes pending strokes; everything else seeks.
    pub fn click(&self, alt: bool) -> MarkerAction {
        if alt && self.is_pending() {
            MarkerAction::DeletePending(self.stroke)
        } else {
            MarkerAction::Seek(self.timestamp)
        }
    }
}

/// Markers for every pending stroke (insertion order) followed by posted strokes grouped
/// by owning comment.
pub fn build_markers<'a>(
    store: &AnnotationStore,
    comments: impl IntoIterator<Item = &'a Comment>,
    playback: &PlaybackState,
) -> Vec<TimelineMarker> {
    let mut markers: Vec<TimelineMarker> = store
        .pending_strokes()
        .map(|s| TimelineMarker::new(s.id, s.timestamp, playback, MarkerKind::Pending))
        .collect();

    for comment in comments {
        for s in comment.strokes() {
            markers.push(TimelineMarker::new(
                s.id,
                s.timestamp,
                playback,
                MarkerKind::Posted {
                    comment: comment.id(),
                    tooltip: comment.text().to_string(),
                },
            ));
        }
    }
    markers
}

#[cfg(test)]
#[path = "../../tests/unit/review/markers.rs"]
mod tests;
