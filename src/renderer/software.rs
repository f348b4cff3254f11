//! In-memory raster surface
//!
//! Used by the native build and by tests to inspect exactly what a frame
//! looks like. Pixels are covered when their center lies inside a rect;
//! images are scaled nearest-neighbour. Alpha is treated as a mask: fully
//! transparent fills and source pixels are skipped, anything else overwrites.

use std::convert::Infallible;

use glam::Vec2;

use super::{Color, ImageSource, Rect, Surface, colors};

/// A simple RGBA pixel grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// Transparent bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, colors::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Zero-sized bitmap, standing in for an image that has not loaded
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Count pixels equal to `color`
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

impl ImageSource for Bitmap {
    fn natural_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Pixel span `[start, end)` covered by `[pos, pos + len)`, clipped to `limit`
fn span(pos: f32, len: f32, limit: u32) -> (u32, u32) {
    let clip = |v: f32| v.round().clamp(0.0, limit as f32) as u32;
    (clip(pos), clip(pos + len))
}

/// Software framebuffer implementing `Surface`
#[derive(Debug, Clone)]
pub struct SoftwareSurface {
    frame: Bitmap,
}

impl SoftwareSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Bitmap::new(width, height),
        }
    }

    /// Current frame contents
    pub fn frame(&self) -> &Bitmap {
        &self.frame
    }

    /// Reallocate at a new size (contents are discarded)
    pub fn resize(&mut self, width: u32, height: u32) {
        self.frame = Bitmap::new(width, height);
    }
}

impl Surface for SoftwareSurface {
    type Image = Bitmap;
    type Error = Infallible;

    fn width(&self) -> f32 {
        self.frame.width as f32
    }

    fn height(&self) -> f32 {
        self.frame.height as f32
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || color.a == 0 {
            return;
        }
        let (x0, x1) = span(rect.pos.x, rect.size.x, self.frame.width);
        let (y0, y1) = span(rect.pos.y, rect.size.y, self.frame.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.frame.set(x, y, color);
            }
        }
    }

    fn draw_image(&mut self, image: &Bitmap, rect: Rect) -> Result<(), Infallible> {
        if rect.is_empty() || image.width == 0 || image.height == 0 {
            return Ok(());
        }
        let (x0, x1) = span(rect.pos.x, rect.size.x, self.frame.width);
        let (y0, y1) = span(rect.pos.y, rect.size.y, self.frame.height);
        let scale = image.natural_size() / rect.size;

        for y in y0..y1 {
            let v = ((y as f32 + 0.5 - rect.pos.y) * scale.y) as u32;
            for x in x0..x1 {
                let u = ((x as f32 + 0.5 - rect.pos.x) * scale.x) as u32;
                let src = image
                    .get(u.min(image.width - 1), v.min(image.height - 1))
                    .unwrap_or(colors::TRANSPARENT);
                if src.a != 0 {
                    self.frame.set(x, y, src);
                }
            }
        }
        Ok(())
    }
}
