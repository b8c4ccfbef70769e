// Canvas 2D backend for the vortex. Holds the canvas and its context and
// turns each `Stroke` into a round-capped line.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::{GLOW_COMPOSITE, GLOW_FILTER};
use crate::viewport::Viewport;
use crate::vortex::{Stroke, Surface};

pub struct Renderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl Renderer {
    // Fails when the canvas has no 2D context (e.g. already claimed by WebGL)
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Renderer { canvas, context })
    }

    pub fn resize(&self, viewport: &Viewport) {
        self.canvas.set_width(viewport.width as u32);
        self.canvas.set_height(viewport.height as u32);
    }

    pub fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    pub fn height(&self) -> f64 {
        self.canvas.height() as f64
    }
}

impl Surface for Renderer {
    fn clear(&mut self, background: &str) {
        self.context.set_fill_style_str(background);
        self.context.fill_rect(0.0, 0.0, self.width(), self.height());
    }

    fn stroke(&mut self, stroke: &Stroke) {
        let ctx = &self.context;
        ctx.save();
        ctx.set_line_cap("round");
        ctx.set_line_width(stroke.width);
        ctx.set_stroke_style_str(&stroke.color.to_string());
        ctx.begin_path();
        ctx.move_to(stroke.from[0], stroke.from[1]);
        ctx.line_to(stroke.to[0], stroke.to[1]);
        ctx.stroke();
        ctx.restore();
    }

    fn glow(&mut self) {
        let ctx = &self.context;
        ctx.save();
        ctx.set_filter(GLOW_FILTER);
        if let Err(err) = ctx.set_global_composite_operation(GLOW_COMPOSITE) {
            log::debug!("composite operation rejected: {:?}", err);
        }
        if let Err(err) = ctx.draw_image_with_html_canvas_element(&self.canvas, 0.0, 0.0) {
            log::debug!("glow pass skipped: {:?}", err);
        }
        ctx.restore();
    }
}
