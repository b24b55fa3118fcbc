use crate::annotation::model::{Stroke, polyline};
use crate::capture::drawing::PenStyle;
use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};
use crate::foundation::ids::StrokeId;

/// Strokes are drawn while `|timestamp - current_time|` is below this many seconds.
pub const VISIBILITY_WINDOW_SECS: f64 = 0.5;

/// Whether a stroke captured at `timestamp` is visible at `current_time`.
pub fn is_visible_at(timestamp: f64, current_time: f64) -> bool {
    (timestamp - current_time).abs() < VISIBILITY_WINDOW_SECS
}

#[derive(Clone, Debug, PartialEq)]
/// One stroked polyline, round caps and joins.
pub struct StrokeOp {
    /// Source stroke; `None` for the gesture in progress.
    pub stroke: Option<StrokeId>,
    /// Path in logical canvas coordinates.
    pub path: BezPath,
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in logical pixels.
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// Backend-agnostic description of one overlay frame.
///
/// Ops are painted in order; later ops land on top.
pub struct OverlayPlan {
    /// Logical canvas the ops are expressed in.
    pub canvas: Canvas,
    /// Playback time the plan was built for.
    pub time: f64,
    /// Paint operations in order.
    pub ops: Vec<StrokeOp>,
}

impl OverlayPlan {
    /// Ids of the committed strokes included in the plan.
    pub fn stroke_ids(&self) -> impl Iterator<Item = StrokeId> + '_ {
        self.ops.iter().filter_map(|op| op.stroke)
    }
}

/// Build the overlay for `current_time`.
///
/// Committed strokes inside the visibility window are emitted in insertion order; an
/// in-progress gesture with at least two points is emitted last with the active pen style.
pub fn compile_overlay<'a>(
    canvas: Canvas,
    strokes: impl IntoIterator<Item = &'a Stroke>,
    in_progress: Option<(&[Point], PenStyle)>,
    current_time: f64,
) -> OverlayPlan {
    let mut ops: Vec<StrokeOp> = strokes
        .into_iter()
        .filter(|s| is_visible_at(s.timestamp, current_time))
        .map(|s| StrokeOp {
            stroke: Some(s.id),
            path: s.to_bezpath(),
            color: s.color,
            width: s.width,
        })
        .collect();

    if let Some((points, style)) = in_progress
        && points.len() >= 2
    {
        ops.push(StrokeOp {
            stroke: None,
            path: polyline(points),
            color: style.color,
            width: style.width,
        });
    }

    OverlayPlan {
        canvas,
        time: current_time,
        ops,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
