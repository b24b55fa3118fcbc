use std::str::FromStr;

use crate::annotation::model::Comment;
use crate::foundation::core::format_timecode;
use crate::foundation::error::ReelmarkError;
use crate::foundation::ids::CommentId;

/// Completion filter over the comment list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentFilter {
    /// Every comment.
    #[default]
    All,
    /// Comments not yet completed.
    Pending,
    /// Completed comments.
    Completed,
}

const VALID_FILTERS: &[&str] = &["all", "pending", "completed"];

impl CommentFilter {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Whether `comment` passes the filter.
    pub fn matches(self, comment: &Comment) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !comment.is_completed(),
            Self::Completed => comment.is_completed(),
        }
    }
}

impl FromStr for CommentFilter {
    type Err = ReelmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(ReelmarkError::validation(format!(
                "invalid comment filter '{s}'. Must be one of: {}",
                VALID_FILTERS.join(", ")
            ))),
        }
    }
}

/// Apply `filter` to `comments`, keeping order.
pub fn filter_comments<'a>(
    comments: impl IntoIterator<Item = &'a Comment>,
    filter: CommentFilter,
) -> impl Iterator<Item = &'a Comment> {
    comments.into_iter().filter(move |c| filter.matches(c))
}

/// Clickable timecode shown on a comment; clicking seeks to `time`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimestampChip {
    /// Owning comment.
    pub comment: CommentId,
    /// Seek target in seconds.
    pub time: f64,
    /// `MM:SS` label.
    pub label: String,
}

/// One chip per distinct stroke timestamp of `comment`, ascending.
pub fn timestamp_chips(comment: &Comment) -> Vec<TimestampChip> {
    comment
        .timestamps()
        .iter()
        .map(|&time| TimestampChip {
            comment: comment.id(),
            time,
            label: format_timecode(time),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/review/thread.rs"]
mod tests;
