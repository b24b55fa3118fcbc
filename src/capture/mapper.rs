use crate::foundation::core::{Canvas, Point, Rect};

/// Maps display-space pointer positions into the fixed logical drawing resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    logical: Canvas,
}

impl CoordinateMapper {
    /// Mapper targeting `logical`.
    pub fn new(logical: Canvas) -> Self {
        Self { logical }
    }

    /// Logical resolution points are mapped into.
    pub fn logical(&self) -> Canvas {
        self.logical
    }

    /// Map `pointer` (display coordinates) given the surface's displayed bounds.
    ///
    /// Returns `None` when the displayed bounds are degenerate.
    pub fn to_logical(&self, pointer: Point, displayed: Rect) -> Option<Point> {
        let (dw, dh) = (displayed.width(), displayed.height());
        if !(dw.is_finite() && dh.is_finite()) || dw <= 0.0 || dh <= 0.0 {
            return None;
        }
        let sx = f64::from(self.logical.width) / dw;
        let sy = f64::from(self.logical.height) / dh;
        Some(Point::new(
            (pointer.x - displayed.x0) * sx,
            (pointer.y - displayed.y0) * sy,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/mapper.rs"]
mod tests;
