use flowfield_core::{FieldError, LinearGradient, Surface};
use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`Surface`] backed by a canvas 2D context.
#[derive(Clone)]
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Acquires the 2D context of `canvas`. Without one nothing can be drawn.
    pub fn from_canvas(canvas: &web::HtmlCanvasElement) -> Result<Self, FieldError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| FieldError::Surface(format!("{e:?}")))?
            .ok_or_else(|| FieldError::Surface("canvas has no 2d context".into()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| FieldError::Surface("2d context has unexpected type".into()))?;
        Ok(Self::new(ctx))
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_stroke_gradient(&mut self, gradient: &LinearGradient) -> Result<(), FieldError> {
        let (x0, y0) = gradient.start();
        let (x1, y1) = gradient.end();
        let native = self.ctx.create_linear_gradient(x0, y0, x1, y1);
        for stop in gradient.stops() {
            native
                .add_color_stop(stop.offset as f32, &stop.color.to_hex())
                .map_err(|e| FieldError::Surface(format!("color stop rejected: {e:?}")))?;
        }
        self.ctx.set_stroke_style_canvas_gradient(&native);
        Ok(())
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}
