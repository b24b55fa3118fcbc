use crate::annotation::aggregator::{CommentLog, Composer, SubmitOutcome};
use crate::annotation::events::{DeletionReason, EventSink, ReviewEvent};
use crate::annotation::model::{Comment, Stroke};
use crate::annotation::store::AnnotationStore;
use crate::capture::drawing::{DrawingCapture, PenStyle, Tool};
use crate::capture::mapper::CoordinateMapper;
use crate::foundation::core::{Point, Rect, clamp_time};
use crate::foundation::error::ReelmarkResult;
use crate::foundation::ids::{CommentId, IdAllocator, StrokeId};
use crate::playback::controller::{MediaTransport, PlaybackController, PlaybackState};
use crate::playback::scrub::{ProgressBar, ScrubGesture};
use crate::render::backend::{FrameRGBA, OverlayBackend};
use crate::render::plan::{OverlayPlan, compile_overlay};
use crate::review::markers::{MarkerAction, TimelineMarker, build_markers};
use crate::review::thread::{CommentFilter, TimestampChip, filter_comments, timestamp_chips};
use crate::schedule::hover::{AutoHide, HoverTarget};
use crate::session::config::{ReviewConfig, ReviewSeed};
use crate::session::input::{InputEvent, KeyPress, Shortcut, Surface, shortcut_for};

/// Capture timestamps stay this far inside a known duration so their markers remain on the bar.
const END_GUARD_SECS: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gesture {
    Draw,
    Scrub,
}

/// One review surface: playback, drawing capture, stroke log, comments and timeline state.
///
/// Every mutation runs synchronously inside one `&mut self` call. Persistence is
/// fire-and-forget through the [`EventSink`] given at construction.
pub struct ReviewSession {
    config: ReviewConfig,
    playback: PlaybackController,
    mapper: CoordinateMapper,
    capture: DrawingCapture,
    scrub: ScrubGesture,
    store: AnnotationStore,
    comments: CommentLog,
    composer: Composer,
    filter: CommentFilter,
    hover: AutoHide,
    ids: IdAllocator,
    surface_bounds: Option<Rect>,
    progress_bar: Option<ProgressBar>,
    gesture: Option<Gesture>,
    sink: Box<dyn EventSink>,
    revision: u64,
    rendered_revision: Option<u64>,
}

impl std::fmt::Debug for ReviewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewSession")
            .field("item", &self.config.item.identifier)
            .field("playback", self.playback.state())
            .field("strokes", &self.store.len())
            .field("pending", &self.store.pending_len())
            .field("comments", &self.comments.len())
            .field("tool", &self.capture.tool())
            .field("gesture", &self.gesture)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl ReviewSession {
    /// Build a session from a validated configuration.
    pub fn new(config: ReviewConfig, sink: Box<dyn EventSink>) -> ReelmarkResult<Self> {
        config.validate()?;
        tracing::debug!(item = %config.item.identifier, "opening review session");
        Ok(Self {
            playback: PlaybackController::new(),
            mapper: CoordinateMapper::new(config.canvas),
            capture: DrawingCapture::new(config.pen),
            scrub: ScrubGesture::default(),
            store: AnnotationStore::new(),
            comments: CommentLog::new(),
            composer: Composer::default(),
            filter: CommentFilter::default(),
            hover: AutoHide::new(config.hover_hide_delay()),
            ids: IdAllocator::new(),
            surface_bounds: None,
            progress_bar: None,
            gesture: None,
            sink,
            revision: 0,
            rendered_revision: None,
            config,
        })
    }

    /// Load persisted comments and pending strokes.
    ///
    /// All or nothing: on error the session is left untouched.
    #[tracing::instrument(skip(self, seed), fields(comments = seed.comments.len(), pending = seed.pending_strokes.len()))]
    pub fn seed(&mut self, seed: ReviewSeed) -> ReelmarkResult<()> {
        seed.validate()?;

        let mut store = self.store.clone();
        let mut comments = self.comments.clone();
        let mut ids = self.ids.clone();
        ids.observe(seed.max_raw_id());

        let posted: Vec<StrokeId> = seed.posted_ids().collect();
        let strokes: Vec<Stroke> = seed
            .comments
            .iter()
            .flat_map(|c| c.strokes.iter().cloned())
            .chain(seed.pending_strokes.iter().cloned())
            .collect();
        store.seed(strokes, posted)?;
        for c in seed.comments {
            comments.insert_seeded(c.into_comment())?;
        }

        self.store = store;
        self.comments = comments;
        self.ids = ids;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn emit(&mut self, event: ReviewEvent) {
        self.sink.emit(event);
    }

    // ---- accessors ----

    /// Configuration the session was opened with.
    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Playback snapshot.
    pub fn playback(&self) -> &PlaybackState {
        self.playback.state()
    }

    /// Stroke log.
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Posted comments.
    pub fn comments(&self) -> &CommentLog {
        &self.comments
    }

    /// Comment input state.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.capture.tool()
    }

    /// Active pen style.
    pub fn pen(&self) -> PenStyle {
        self.capture.style()
    }

    /// Logical points of the drawing in progress.
    pub fn in_progress(&self) -> Option<&[Point]> {
        self.capture.in_progress()
    }

    /// Whether the progress bar is being dragged.
    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_active()
    }

    /// Active comment filter.
    pub fn filter(&self) -> CommentFilter {
        self.filter
    }

    /// Change counter for the overlay, markers and comment thread.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether a hover-revealed element is shown.
    pub fn hover_visible(&self, target: HoverTarget) -> bool {
        self.hover.is_visible(target)
    }

    // ---- resource handles ----

    /// Attach the media element.
    pub fn attach_media(&mut self, transport: Box<dyn MediaTransport>) {
        self.playback.attach(transport);
    }

    /// Detach the media element.
    pub fn detach_media(&mut self) -> Option<Box<dyn MediaTransport>> {
        self.playback.detach()
    }

    /// Attach (or resize) the drawing surface, given its displayed bounds.
    pub fn attach_surface(&mut self, displayed: Rect) {
        self.surface_bounds = Some(displayed);
    }

    /// Detach the drawing surface, abandoning any drawing on it.
    pub fn detach_surface(&mut self) {
        self.surface_bounds = None;
        if self.gesture == Some(Gesture::Draw) {
            self.gesture = None;
            if self.capture.abandon() {
                self.touch();
            }
        }
    }

    /// Attach (or move) the progress bar.
    pub fn attach_progress_bar(&mut self, bar: ProgressBar) {
        self.progress_bar = Some(bar);
    }

    /// Detach the progress bar, ending any scrub on it.
    pub fn detach_progress_bar(&mut self) {
        self.progress_bar = None;
        if self.gesture == Some(Gesture::Scrub) {
            self.gesture = None;
            self.scrub.end();
        }
    }

    // ---- input ----

    /// Dispatch one host input event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { surface, position } => self.pointer_down(surface, position),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::PointerLeave { surface } => {
                // Leaving the bar keeps the scrub alive; leaving the canvas finishes the drawing.
                if surface == Surface::Canvas && self.gesture == Some(Gesture::Draw) {
                    self.commit_drawing();
                }
            }
            InputEvent::Key(press) => self.key(press),
            InputEvent::HoverEnter(target) => self.hover.enter(target),
            InputEvent::HoverLeave { target, now } => self.hover.leave(target, now),
            InputEvent::HoverDismiss(target) => self.hover.dismiss(target),
            InputEvent::Tick { now } => {
                for target in self.hover.tick(now) {
                    tracing::trace!(?target, "auto-hid element");
                }
            }
        }
    }

    fn pointer_down(&mut self, surface: Surface, position: Point) {
        if self.gesture.is_some() {
            return;
        }
        match surface {
            Surface::Canvas => {
                let Some(p) = self.map_pointer(position) else {
                    return;
                };
                if self.capture.pointer_down(p) {
                    self.gesture = Some(Gesture::Draw);
                    self.touch();
                }
            }
            Surface::ProgressBar => {
                let Some(bar) = self.progress_bar else {
                    return;
                };
                self.scrub.begin(&bar, position.x, &mut self.playback);
                self.gesture = Some(Gesture::Scrub);
                self.touch();
            }
        }
    }

    fn pointer_move(&mut self, position: Point) {
        match self.gesture {
            Some(Gesture::Draw) => {
                if let Some(p) = self.map_pointer(position)
                    && self.capture.pointer_move(p)
                {
                    self.touch();
                }
            }
            Some(Gesture::Scrub) => {
                if let Some(bar) = self.progress_bar
                    && self
                        .scrub
                        .update(&bar, position.x, &mut self.playback)
                        .is_some()
                {
                    self.touch();
                }
            }
            None => {}
        }
    }

    fn pointer_up(&mut self) {
        match self.gesture {
            Some(Gesture::Draw) => self.commit_drawing(),
            Some(Gesture::Scrub) => {
                self.gesture = None;
                self.scrub.end();
            }
            None => {}
        }
    }

    fn map_pointer(&self, position: Point) -> Option<Point> {
        let bounds = self.surface_bounds?;
        self.mapper.to_logical(position, bounds)
    }

    fn capture_timestamp(&self) -> f64 {
        let state = self.playback.state();
        let t = clamp_time(state.current_time, state.duration);
        if state.duration > END_GUARD_SECS {
            t.min(state.duration - END_GUARD_SECS)
        } else {
            t
        }
    }

    fn commit_drawing(&mut self) {
        self.gesture = None;
        let timestamp = self.capture_timestamp();
        let Some(stroke) = self.capture.pointer_up(&mut self.ids, timestamp) else {
            self.touch();
            return;
        };
        let id = stroke.id;
        match self.store.insert(stroke) {
            Ok(()) => tracing::debug!(stroke = %id, timestamp, "committed stroke"),
            Err(err) => tracing::warn!(stroke = %id, %err, "dropping stroke"),
        }
        self.touch();
    }

    fn key(&mut self, press: KeyPress) {
        match shortcut_for(&press) {
            Some(Shortcut::TogglePlay) => self.toggle_play_pause(),
            Some(Shortcut::ToggleTool) => self.toggle_tool(),
            Some(Shortcut::Undo) => {
                self.undo();
            }
            None => {}
        }
    }

    // ---- playback ----

    /// Toggle between playing and paused.
    pub fn toggle_play_pause(&mut self) {
        self.playback.toggle_play_pause();
    }

    /// Start playback.
    pub fn play(&mut self) {
        self.playback.play();
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        self.playback.pause();
    }

    /// Seek to `t`, clamped. Returns the applied time.
    pub fn seek(&mut self, t: f64) -> f64 {
        let applied = self.playback.seek(t);
        self.touch();
        applied
    }

    /// Seek to a fraction of the duration. Returns the applied time.
    pub fn seek_fraction(&mut self, p: f64) -> f64 {
        let applied = self.playback.seek_fraction(p);
        self.touch();
        applied
    }

    /// Set the volume, clamped into `[0, 1]`.
    pub fn set_volume(&mut self, v: f64) {
        self.playback.set_volume(v);
    }

    /// Mute or restore the pre-mute volume.
    pub fn toggle_mute(&mut self) {
        self.playback.toggle_mute();
    }

    /// Toggle looping.
    pub fn toggle_loop(&mut self) {
        self.playback.toggle_loop();
    }

    /// Media callback: duration known.
    pub fn on_metadata_loaded(&mut self, duration: f64) {
        self.playback.on_metadata_loaded(duration);
        self.touch();
    }

    /// Media callback: position changed.
    pub fn on_time_update(&mut self, t: f64) {
        let before = self.playback.current_time();
        self.playback.on_time_update(t);
        if self.playback.current_time() != before {
            self.touch();
        }
    }

    /// Media callback: playback reached the end.
    pub fn on_ended(&mut self) {
        self.playback.on_ended();
        self.touch();
    }

    // ---- drawing ----

    /// Switch tools. Leaving the pen abandons the drawing in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.capture.set_tool(tool) {
            tracing::debug!("abandoned drawing on tool switch");
            self.touch();
        }
        if tool != Tool::Pen && self.gesture == Some(Gesture::Draw) {
            self.gesture = None;
        }
    }

    /// Flip between select and pen.
    pub fn toggle_tool(&mut self) {
        self.set_tool(self.capture.tool().toggled());
    }

    /// Replace the pen style for future strokes.
    pub fn set_pen(&mut self, style: PenStyle) -> ReelmarkResult<()> {
        self.capture.set_style(style)?;
        if self.capture.is_capturing() {
            self.touch();
        }
        Ok(())
    }

    // ---- stroke log ----

    /// Remove the most recently committed pending stroke.
    #[tracing::instrument(skip(self))]
    pub fn undo(&mut self) -> Option<StrokeId> {
        let stroke = self.store.undo()?;
        self.emit(ReviewEvent::StrokesDeleted {
            ids: vec![stroke.id],
            reason: DeletionReason::Undo,
        });
        self.touch();
        Some(stroke.id)
    }

    /// Remove every pending stroke. Returns the removed ids.
    #[tracing::instrument(skip(self))]
    pub fn clear(&mut self) -> Vec<StrokeId> {
        let ids: Vec<StrokeId> = self.store.clear().into_iter().map(|s| s.id).collect();
        if !ids.is_empty() {
            self.emit(ReviewEvent::StrokesDeleted {
                ids: ids.clone(),
                reason: DeletionReason::Clear,
            });
            self.touch();
        }
        ids
    }

    /// Remove one pending stroke. Posted or unknown ids are refused.
    #[tracing::instrument(skip(self))]
    pub fn delete_pending(&mut self, id: StrokeId) -> bool {
        if self.store.remove_pending(id).is_none() {
            return false;
        }
        self.emit(ReviewEvent::StrokesDeleted {
            ids: vec![id],
            reason: DeletionReason::Marker,
        });
        self.touch();
        true
    }

    // ---- comments ----

    /// Replace the composer text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.composer.set_text(text);
    }

    /// Make the next submit a reply to `comment`. Unknown comments are refused.
    pub fn reply_to(&mut self, comment: CommentId) -> bool {
        if self.comments.get(comment).is_none() {
            return false;
        }
        self.composer.reply_to(comment);
        true
    }

    /// Go back to composing a new comment.
    pub fn cancel_reply(&mut self) {
        self.composer.cancel_reply();
    }

    /// Submit the composer as a reply or a new comment carrying every pending stroke.
    #[tracing::instrument(skip(self))]
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.comments.submit(
            &mut self.composer,
            &mut self.store,
            &mut self.ids,
            &self.config.author,
            self.playback.current_time(),
        );
        match outcome {
            SubmitOutcome::Commented(id) => {
                if let Some(comment) = self.comments.get(id).cloned() {
                    self.emit(ReviewEvent::CommentCreated { comment });
                }
                self.touch();
            }
            SubmitOutcome::Replied { comment, reply } => {
                if let Some(comment) = self.comments.get(comment).cloned() {
                    self.emit(ReviewEvent::ReplyAppended { comment, reply });
                }
            }
            SubmitOutcome::Ignored | SubmitOutcome::MissingReplyTarget(_) => {}
        }
        outcome
    }

    /// Flip a comment's completion flag. Returns the new value.
    #[tracing::instrument(skip(self))]
    pub fn toggle_completed(&mut self, id: CommentId) -> Option<bool> {
        let completed = self.comments.toggle_completed(id)?;
        if let Some(comment) = self.comments.get(id).cloned() {
            self.emit(ReviewEvent::CommentUpdated { comment });
        }
        self.touch();
        Some(completed)
    }

    // ---- thread ----

    /// Change the comment filter.
    pub fn set_filter(&mut self, filter: CommentFilter) {
        self.filter = filter;
    }

    /// Comments passing the active filter, oldest first.
    pub fn visible_comments(&self) -> Vec<&Comment> {
        filter_comments(self.comments.comments(), self.filter).collect()
    }

    /// Timestamp chips of one comment.
    pub fn chips(&self, comment: CommentId) -> Vec<TimestampChip> {
        self.comments
            .get(comment)
            .map(timestamp_chips)
            .unwrap_or_default()
    }

    /// Seek to a chip's time.
    pub fn click_chip(&mut self, chip: &TimestampChip) -> f64 {
        self.seek(chip.time)
    }

    /// Timeline markers for every stroke.
    pub fn markers(&self) -> Vec<TimelineMarker> {
        build_markers(&self.store, self.comments.comments(), self.playback.state())
    }

    /// Click the marker of `stroke`; `alt` deletes pending strokes instead of seeking.
    pub fn click_marker(&mut self, stroke: StrokeId, alt: bool) -> Option<MarkerAction> {
        let action = self
            .markers()
            .into_iter()
            .find(|m| m.stroke == stroke)?
            .click(alt);
        match action {
            MarkerAction::Seek(t) => {
                self.seek(t);
            }
            MarkerAction::DeletePending(id) => {
                self.delete_pending(id);
            }
        }
        Some(action)
    }

    // ---- overlay ----

    /// Overlay for the current playback time.
    pub fn overlay_plan(&self) -> OverlayPlan {
        let style = self.capture.style();
        compile_overlay(
            self.mapper.logical(),
            self.store.strokes(),
            self.capture.in_progress().map(|p| (p, style)),
            self.playback.current_time(),
        )
    }

    /// Whether the overlay changed since the last render.
    pub fn needs_redraw(&self) -> bool {
        self.rendered_revision != Some(self.revision)
    }

    /// Rasterize the overlay.
    #[tracing::instrument(skip(self, backend), fields(revision = self.revision))]
    pub fn render(&mut self, backend: &mut dyn OverlayBackend) -> ReelmarkResult<FrameRGBA> {
        let frame = backend.render(&self.overlay_plan())?;
        self.rendered_revision = Some(self.revision);
        Ok(frame)
    }

    /// Rasterize only when something changed since the last render.
    pub fn render_if_dirty(
        &mut self,
        backend: &mut dyn OverlayBackend,
    ) -> ReelmarkResult<Option<FrameRGBA>> {
        if !self.needs_redraw() {
            return Ok(None);
        }
        self.render(backend).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/engine.rs"]
mod tests;
