//! Rendering module
//!
//! The animation only needs a surface that can fill rectangles and draw a
//! scaled image. `canvas` backs that with the browser's 2D context,
//! `software` with an in-memory raster.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod software;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use software::{Bitmap, SoftwareSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Sprite;

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with full alpha
    pub const fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// CSS color string for Canvas2D fill styles
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

/// Colors for frame elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0, 0, 0);
    pub const LOGO_BACKDROP: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
}

/// Fill colors used by `render`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Whole-canvas fill; always painted opaque
    pub background: Color,
    /// Fill behind the logo's bounding box
    pub logo_backdrop: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: colors::BACKGROUND,
            logo_backdrop: colors::LOGO_BACKDROP,
        }
    }
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn is_empty(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }
}

/// Anything with an intrinsic pixel size
pub trait ImageSource {
    /// Intrinsic size; `Vec2::ZERO` while the image is still loading
    fn natural_size(&self) -> Vec2;
}

/// A drawable 2D surface
pub trait Surface {
    type Image: ImageSource;
    type Error: std::fmt::Debug;

    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// Fill a rectangle with a solid color
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw `image` scaled to fill `rect`. Zero-area rects draw nothing.
    fn draw_image(&mut self, image: &Self::Image, rect: Rect) -> Result<(), Self::Error>;
}

/// Paint one complete frame: background, logo backdrop, logo.
///
/// Repaints the entire surface every call so nothing from the previous frame
/// survives.
pub fn render<S: Surface>(
    surface: &mut S,
    sprite: &Sprite,
    image: &S::Image,
    palette: &Palette,
) -> Result<(), S::Error> {
    let full = Rect::new(Vec2::ZERO, surface.size());
    surface.fill_rect(full, palette.background.opaque());

    let logo = Rect::new(sprite.pos, sprite.size);
    surface.fill_rect(logo, palette.logo_backdrop);
    surface.draw_image(image, logo)
}
