//! Canvas2D rendering backend

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, ImageSource, Rect, Surface};
use crate::platform::HostError;

impl ImageSource for HtmlImageElement {
    fn natural_size(&self) -> Vec2 {
        Vec2::new(self.natural_width() as f32, self.natural_height() as f32)
    }
}

/// A `<canvas>` element and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, HostError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(HostError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| HostError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;
    type Error = JsValue;

    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn draw_image(&mut self, image: &HtmlImageElement, rect: Rect) -> Result<(), JsValue> {
        // Pending and broken images have no intrinsic size, so the logo rect
        // is empty; drawing a broken image would throw
        if rect.is_empty() {
            return Ok(());
        }
        self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        )
    }
}
