use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{Receiver, channel};

use crate::annotation::events::{ChannelSink, ReviewEvent};
use crate::annotation::model::{Comment, Stroke};
use crate::capture::drawing::{PenStyle, Tool};
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ReelmarkError, ReelmarkResult};
use crate::foundation::ids::{CommentId, StrokeId};
use crate::playback::controller::PlaybackState;
use crate::playback::scrub::ProgressBar;
use crate::render::backend::{FrameRGBA, OverlayBackend};
use crate::review::markers::TimelineMarker;
use crate::review::thread::CommentFilter;
use crate::session::config::{ReviewConfig, ReviewSeed};
use crate::session::engine::ReviewSession;
use crate::session::input::{InputEvent, Key, KeyPress, Surface};

/// Progress bar geometry scripts scrub against.
pub const SCRIPT_PROGRESS_BAR: ProgressBar = ProgressBar {
    left: 0.0,
    width: 1000.0,
};

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
/// One scripted interaction.
///
/// Drawing points are logical canvas coordinates: the surface is attached at its logical size.
pub enum ScriptStep {
    /// Media reports its duration.
    Metadata {
        /// Duration in seconds.
        duration: f64,
    },
    /// Start playback.
    Play,
    /// Pause playback.
    Pause,
    /// Media reports a new position.
    TimeUpdate {
        /// Position in seconds.
        t: f64,
    },
    /// Seek to a time.
    Seek {
        /// Target in seconds.
        t: f64,
    },
    /// Press on the progress bar at the first fraction, drag through the rest, release.
    Scrub {
        /// Bar fractions in `[0, 1]`.
        fractions: Vec<f64>,
    },
    /// Switch tools.
    Tool {
        /// Tool to activate.
        tool: Tool,
    },
    /// Change the pen; omitted fields keep their current value.
    Pen {
        /// New color.
        #[serde(default)]
        color: Option<Rgba8>,
        /// New width.
        #[serde(default)]
        width: Option<f64>,
    },
    /// Press, drag through and release on the canvas.
    Draw {
        /// Gesture points.
        points: Vec<Point>,
    },
    /// Undo the last pending stroke.
    Undo,
    /// Clear pending strokes.
    Clear,
    /// Delete one pending stroke.
    DeletePending {
        /// Stroke to delete.
        stroke: StrokeId,
    },
    /// Press a key outside any text field.
    Key {
        /// Pressed key.
        key: Key,
        /// Ctrl held.
        #[serde(default)]
        ctrl: bool,
        /// Cmd/Meta held.
        #[serde(default)]
        meta: bool,
    },
    /// Replace the composer text.
    Text {
        /// New text.
        text: String,
    },
    /// Reply to a comment on the next submit.
    ReplyTo {
        /// Target comment.
        comment: CommentId,
    },
    /// Submit the composer.
    Submit,
    /// Flip a comment's completion flag.
    ToggleCompleted {
        /// Target comment.
        comment: CommentId,
    },
    /// Change the comment filter.
    Filter {
        /// New filter.
        filter: CommentFilter,
    },
    /// Rasterize the overlay.
    Render {
        /// Output name recorded with the frame.
        out: String,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
/// Scripted review session: configuration, optional persisted state and steps.
pub struct ReviewScript {
    /// Session configuration.
    pub config: ReviewConfig,
    /// Persisted state loaded before the first step.
    #[serde(default)]
    pub seed: Option<ReviewSeed>,
    /// Steps in order.
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl ReviewScript {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelmarkResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelmarkError::serde(format!("parse review script JSON: {e}")))
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelmarkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelmarkError::validation(format!("open review script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Frame produced by a `render` step.
pub struct RenderedFrame {
    /// Output name from the step.
    pub out: String,
    /// Playback time of the frame.
    pub time: f64,
    /// Pixels (premultiplied).
    #[serde(skip)]
    pub frame: FrameRGBA,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Final state after a replay.
pub struct ReplayReport {
    /// Every comment, oldest first.
    pub comments: Vec<Comment>,
    /// Strokes still pending.
    pub pending: Vec<Stroke>,
    /// Final playback state.
    pub playback: PlaybackState,
    /// Final comment filter.
    pub filter: CommentFilter,
    /// Comments passing the filter.
    pub visible: Vec<CommentId>,
    /// Final timeline markers.
    pub markers: Vec<TimelineMarker>,
    /// Events emitted during the replay.
    pub events: Vec<ReviewEvent>,
    /// Frames from `render` steps.
    pub frames: Vec<RenderedFrame>,
}

/// A replayed session, still live for further interaction.
#[derive(Debug)]
pub struct Replay {
    session: ReviewSession,
    frames: Vec<RenderedFrame>,
    events: Receiver<ReviewEvent>,
}

impl Replay {
    /// Open a session for `script`, seed it and apply every step.
    #[tracing::instrument(skip(script, backend), fields(steps = script.steps.len()))]
    pub fn run(script: &ReviewScript, backend: &mut dyn OverlayBackend) -> ReelmarkResult<Self> {
        let (tx, events) = channel();
        let mut session =
            ReviewSession::new(script.config.clone(), Box::new(ChannelSink::new(tx)))?;
        if let Some(seed) = &script.seed {
            session.seed(seed.clone())?;
        }
        session.attach_surface(script.config.canvas.rect());
        session.attach_progress_bar(SCRIPT_PROGRESS_BAR);

        let mut replay = Self {
            session,
            frames: Vec::new(),
            events,
        };
        for (index, step) in script.steps.iter().enumerate() {
            if let Err(err) = replay.apply(step, backend) {
                tracing::warn!(index, ?step, %err, "script step failed");
                return Err(err);
            }
        }
        Ok(replay)
    }

    /// The replayed session.
    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    /// The replayed session, mutably.
    pub fn session_mut(&mut self) -> &mut ReviewSession {
        &mut self.session
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    fn apply(&mut self, step: &ScriptStep, backend: &mut dyn OverlayBackend) -> ReelmarkResult<()> {
        let s = &mut self.session;
        match step {
            ScriptStep::Metadata { duration } => s.on_metadata_loaded(*duration),
            ScriptStep::Play => s.play(),
            ScriptStep::Pause => s.pause(),
            ScriptStep::TimeUpdate { t } => s.on_time_update(*t),
            ScriptStep::Seek { t } => {
                s.seek(*t);
            }
            ScriptStep::Scrub { fractions } => {
                let bar_x = |f: f64| {
                    Point::new(
                        SCRIPT_PROGRESS_BAR.left + f * SCRIPT_PROGRESS_BAR.width,
                        0.0,
                    )
                };
                let mut it = fractions.iter();
                if let Some(&first) = it.next() {
                    s.handle(InputEvent::PointerDown {
                        surface: Surface::ProgressBar,
                        position: bar_x(first),
                    });
                    for &f in it {
                        s.handle(InputEvent::PointerMove { position: bar_x(f) });
                    }
                    s.handle(InputEvent::PointerUp);
                }
            }
            ScriptStep::Tool { tool } => s.set_tool(*tool),
            ScriptStep::Pen { color, width } => {
                let current = s.pen();
                s.set_pen(PenStyle {
                    color: color.unwrap_or(current.color),
                    width: width.unwrap_or(current.width),
                })?;
            }
            ScriptStep::Draw { points } => {
                if s.tool() != Tool::Pen {
                    tracing::debug!("draw step with the select tool draws nothing");
                }
                let mut it = points.iter();
                if let Some(&first) = it.next() {
                    s.handle(InputEvent::PointerDown {
                        surface: Surface::Canvas,
                        position: first,
                    });
                    for &p in it {
                        s.handle(InputEvent::PointerMove { position: p });
                    }
                    s.handle(InputEvent::PointerUp);
                }
            }
            ScriptStep::Undo => {
                s.undo();
            }
            ScriptStep::Clear => {
                s.clear();
            }
            ScriptStep::DeletePending { stroke } => {
                if !s.delete_pending(*stroke) {
                    tracing::warn!(stroke = %stroke, "stroke is not pending; nothing deleted");
                }
            }
            ScriptStep::Key { key, ctrl, meta } => s.handle(InputEvent::Key(KeyPress {
                key: *key,
                ctrl: *ctrl,
                meta: *meta,
                in_text_field: false,
            })),
            ScriptStep::Text { text } => s.set_text(text.clone()),
            ScriptStep::ReplyTo { comment } => {
                if !s.reply_to(*comment) {
                    return Err(ReelmarkError::validation(format!(
                        "reply target comment {comment} does not exist"
                    )));
                }
            }
            ScriptStep::Submit => {
                s.submit();
            }
            ScriptStep::ToggleCompleted { comment } => {
                if s.toggle_completed(*comment).is_none() {
                    return Err(ReelmarkError::validation(format!(
                        "comment {comment} does not exist"
                    )));
                }
            }
            ScriptStep::Filter { filter } => s.set_filter(*filter),
            ScriptStep::Render { out } => {
                let frame = s.render(backend)?;
                self.frames.push(RenderedFrame {
                    out: out.clone(),
                    time: self.session.playback().current_time,
                    frame,
                });
            }
        }
        Ok(())
    }

    /// Snapshot the final state and every event emitted so far.
    pub fn into_report(self) -> ReplayReport {
        let s = &self.session;
        ReplayReport {
            comments: s.comments().comments().cloned().collect(),
            pending: s.store().pending_snapshot(),
            playback: *s.playback(),
            filter: s.filter(),
            visible: s.visible_comments().iter().map(|c| c.id()).collect(),
            markers: s.markers(),
            events: self.events.try_iter().collect(),
            frames: self.frames,
        }
    }
}

/// Replay `script` from scratch and report the final state.
pub fn replay_script(
    script: &ReviewScript,
    backend: &mut dyn OverlayBackend,
) -> ReelmarkResult<ReplayReport> {
    Ok(Replay::run(script, backend)?.into_report())
}

#[cfg(test)]
#[path = "../../tests/unit/session/script.rs"]
mod tests;
