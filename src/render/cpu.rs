use crate::foundation::core::{BezPath, Canvas, Point};
use crate::foundation::error::{ReelmarkError, ReelmarkResult};
use crate::render::backend::{FrameRGBA, OverlayBackend};
use crate::render::plan::{OverlayPlan, StrokeOp};

/// `vello_cpu` rasterizer for overlay plans.
///
/// Keeps one pixmap around and reallocates it only when the canvas size changes.
#[derive(Default)]
pub struct CpuOverlayBackend {
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuOverlayBackend {
    /// Backend with no surface allocated yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_surface(&mut self, canvas: Canvas) -> ReelmarkResult<&mut CpuSurface> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ReelmarkError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ReelmarkError::render("canvas height exceeds u16"))?;

        let surface = match self.surface.take() {
            Some(s) if s.width == width && s.height == height => s,
            _ => CpuSurface {
                width,
                height,
                pixmap: vello_cpu::Pixmap::new(width, height),
            },
        };
        Ok(self.surface.insert(surface))
    }
}

impl OverlayBackend for CpuOverlayBackend {
    #[tracing::instrument(skip(self, plan), fields(ops = plan.ops.len()))]
    fn render(&mut self, plan: &OverlayPlan) -> ReelmarkResult<FrameRGBA> {
        let surface = self.ensure_surface(plan.canvas)?;
        clear_pixmap(&mut surface.pixmap);

        let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for op in &plan.ops {
            draw_stroke(&mut ctx, op);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);

        Ok(FrameRGBA {
            width: u32::from(surface.width),
            height: u32::from(surface.height),
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_stroke(ctx: &mut vello_cpu::RenderContext, op: &StrokeOp) {
    if !op.width.is_finite() || op.width <= 0.0 {
        return;
    }
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        op.color.r, op.color.g, op.color.b, op.color.a,
    ));
    ctx.set_stroke(
        vello_cpu::kurbo::Stroke::new(op.width)
            .with_caps(vello_cpu::kurbo::Cap::Round)
            .with_join(vello_cpu::kurbo::Join::Round),
    );
    ctx.stroke_path(&bezpath_to_cpu(&op.path));
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
