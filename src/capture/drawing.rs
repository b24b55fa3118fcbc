use crate::annotation::model::Stroke;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ReelmarkError, ReelmarkResult};
use crate::foundation::ids::IdAllocator;

/// Maximum number of points kept for one gesture; later moves are dropped.
pub const MAX_PATH_POINTS: usize = 5000;

/// Minimum pen width in logical pixels.
pub const MIN_STROKE_WIDTH: f64 = 0.5;

/// Maximum pen width in logical pixels.
pub const MAX_STROKE_WIDTH: f64 = 20.0;

/// Active pointer tool over the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Pointer interacts with the player; nothing is drawn.
    #[default]
    Select,
    /// Freehand pen.
    Pen,
}

impl Tool {
    /// The other tool.
    pub fn toggled(self) -> Self {
        match self {
            Self::Select => Self::Pen,
            Self::Pen => Self::Select,
        }
    }
}

/// Color and width applied to new strokes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PenStyle {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in logical pixels.
    pub width: f64,
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::rgb(0xff, 0x3b, 0x30),
            width: 4.0,
        }
    }
}

impl PenStyle {
    /// Check the width is finite and within [`MIN_STROKE_WIDTH`]..=[`MAX_STROKE_WIDTH`].
    pub fn validate(&self) -> ReelmarkResult<()> {
        if !self.width.is_finite() {
            return Err(ReelmarkError::validation(
                "pen width must be a finite number",
            ));
        }
        if !(MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH).contains(&self.width) {
            return Err(ReelmarkError::validation(format!(
                "pen width must be between {MIN_STROKE_WIDTH} and {MAX_STROKE_WIDTH}, got {}",
                self.width
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
enum CaptureState {
    #[default]
    Idle,
    Capturing {
        path: Vec<Point>,
    },
}

/// Pointer gesture to stroke state machine: Idle -> Capturing -> commit or discard.
#[derive(Clone, Debug, Default)]
pub struct DrawingCapture {
    tool: Tool,
    style: PenStyle,
    state: CaptureState,
}

impl DrawingCapture {
    /// Idle capture with the select tool active.
    pub fn new(style: PenStyle) -> Self {
        Self {
            tool: Tool::Select,
            style,
            state: CaptureState::Idle,
        }
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Pen style used for new strokes.
    pub fn style(&self) -> PenStyle {
        self.style
    }

    /// Replace the pen style after validating it.
    pub fn set_style(&mut self, style: PenStyle) -> ReelmarkResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    /// Switch tools. Leaving the pen abandons any in-progress path; returns whether it did.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        self.tool = tool;
        if tool != Tool::Pen {
            return self.abandon();
        }
        false
    }

    /// Whether a gesture is being captured.
    pub fn is_capturing(&self) -> bool {
        matches!(self.state, CaptureState::Capturing { .. })
    }

    /// Points of the gesture in progress.
    pub fn in_progress(&self) -> Option<&[Point]> {
        match &self.state {
            CaptureState::Capturing { path } => Some(path),
            CaptureState::Idle => None,
        }
    }

    /// Start a gesture at `p`. Ignored unless the pen is active.
    pub fn pointer_down(&mut self, p: Point) -> bool {
        if self.tool != Tool::Pen {
            return false;
        }
        self.state = CaptureState::Capturing { path: vec![p] };
        true
    }

    /// Append `p` to the gesture in progress.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let CaptureState::Capturing { path } = &mut self.state else {
            return false;
        };
        if path.len() >= MAX_PATH_POINTS {
            return false;
        }
        path.push(p);
        true
    }

    /// Finish the gesture.
    ///
    /// A path with at least one movement becomes a [`Stroke`] stamped with `timestamp`; a bare
    /// press/release is discarded. The id is only allocated for committed strokes.
    pub fn pointer_up(&mut self, ids: &mut IdAllocator, timestamp: f64) -> Option<Stroke> {
        let CaptureState::Capturing { path } = std::mem::take(&mut self.state) else {
            return None;
        };
        if path.len() < 2 {
            tracing::trace!("discarding drawing gesture without movement");
            return None;
        }
        Some(Stroke {
            id: ids.stroke(),
            path,
            color: self.style.color,
            width: self.style.width,
            timestamp,
        })
    }

    /// Drop the gesture in progress without committing. Returns whether one existed.
    pub fn abandon(&mut self) -> bool {
        let was_capturing = self.is_capturing();
        self.state = CaptureState::Idle;
        was_capturing
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/drawing.rs"]
mod tests;
