//! Reelmark is a timeline-synchronized annotation and review engine.
//!
//! Reviewers watch a video, draw freehand strokes over a fixed logical canvas, and post
//! comments that bundle every stroke drawn since the previous post. Each stroke is bound to
//! the playback time at which it was drawn and is shown only while playback sits within half
//! a second of that time.
//!
//! # Architecture
//!
//! 1. **Capture**: pointer gestures on the canvas become [`Stroke`]s in logical coordinates
//!    ([`CoordinateMapper`], [`DrawingCapture`]).
//! 2. **Store**: strokes land in an [`AnnotationStore`] and move one way, pending to posted,
//!    when a [`CommentLog`] submit bundles them into a [`Comment`].
//! 3. **Review**: comments are filtered, expose timestamp chips and feed timeline markers.
//! 4. **Render**: `compile_overlay` turns the strokes visible at the playhead into an
//!    [`OverlayPlan`]; an [`OverlayBackend`] rasterizes it ([`CpuOverlayBackend`]).
//!
//! [`ReviewSession`] ties these together behind one synchronous, `&mut self` API. Persistence
//! is fire-and-forget: the session emits [`ReviewEvent`]s to an [`EventSink`] and never waits.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO in the engine**: configuration, seed data and media are injected by the host.
//! - **Premultiplied RGBA8** frames out of the rasterizer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation {
    pub mod core;
    pub mod error;
    pub mod ids;
}

mod playback {
    pub mod controller;
    pub mod scrub;
}

mod capture {
    pub mod drawing;
    pub mod mapper;
}

mod annotation {
    pub mod aggregator;
    pub mod events;
    pub mod model;
    pub mod store;
}

mod render {
    pub mod backend;
    pub mod cpu;
    pub mod plan;
}

mod review {
    pub mod markers;
    pub mod thread;
}

mod schedule {
    pub mod hover;
    pub mod timer;
}

mod session {
    pub mod config;
    pub mod engine;
    pub mod input;
    pub mod script;
}

pub use annotation::aggregator::{CommentLog, Composer, SubmitOutcome};
pub use annotation::events::{ChannelSink, DeletionReason, EventSink, NullSink, ReviewEvent};
pub use annotation::model::{CREATED_NOW, Comment, Reply, Stroke, distinct_timestamps, polyline};
pub use annotation::store::AnnotationStore;
pub use capture::drawing::{
    DrawingCapture, MAX_PATH_POINTS, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, PenStyle, Tool,
};
pub use capture::mapper::CoordinateMapper;
pub use foundation::core::{
    BezPath, Canvas, Point, Rect, Rgba8, clamp_time, format_timecode, time_ratio,
};
pub use foundation::error::{ReelmarkError, ReelmarkResult};
pub use foundation::ids::{CommentId, IdAllocator, ReplyId, StrokeId};
pub use playback::controller::{MediaTransport, PlaybackController, PlaybackState};
pub use playback::scrub::{ProgressBar, ScrubGesture};
pub use render::backend::{FrameRGBA, OverlayBackend};
pub use render::cpu::CpuOverlayBackend;
pub use render::plan::{
    OverlayPlan, StrokeOp, VISIBILITY_WINDOW_SECS, compile_overlay, is_visible_at,
};
pub use review::markers::{
    MARKER_EMPHASIS_WINDOW_SECS, MarkerAction, MarkerKind, TimelineMarker, build_markers,
};
pub use review::thread::{CommentFilter, TimestampChip, filter_comments, timestamp_chips};
pub use schedule::hover::{AutoHide, HoverTarget};
pub use schedule::timer::{TaskId, TaskScheduler};
pub use session::config::{ReviewConfig, ReviewItemMeta, ReviewSeed, SeedComment};
pub use session::engine::ReviewSession;
pub use session::input::{InputEvent, Key, KeyPress, Shortcut, Surface, shortcut_for};
pub use session::script::{
    RenderedFrame, Replay, ReplayReport, ReviewScript, SCRIPT_PROGRESS_BAR, ScriptStep,
    replay_script,
};
