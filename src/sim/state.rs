//! Simulation state and core types
//!
//! Everything the bounce loop mutates lives in `Simulation`, owned by the
//! driver and passed explicitly into each step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{EdgeContact, edge_contact};
use super::tick::tick;
use crate::consts::*;

/// Pixel extents of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The moving logo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Signed speed per tick; sign is the direction along each axis
    pub vel: Vec2,
    /// On-screen extent, zero until the image has loaded
    pub size: Vec2,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new(
            Vec2::new(START_X, START_Y),
            Vec2::new(START_XSPD, START_YSPD),
        )
    }
}

impl Sprite {
    /// A sprite with no size yet (image not loaded)
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size: Vec2::ZERO,
        }
    }

    /// Builder-style size override
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = non_negative(size);
        self
    }

    /// Resize to the image's intrinsic size scaled by `aspect_ratio`
    pub fn fit_to_image(&mut self, image_size: Vec2, aspect_ratio: f32) {
        self.size = non_negative(image_size * aspect_ratio);
    }

    /// Far corner of the bounding box
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// Clamp each component to >= 0, mapping NaN to 0
fn non_negative(v: Vec2) -> Vec2 {
    Vec2::new(
        if v.x > 0.0 { v.x } else { 0.0 },
        if v.y > 0.0 { v.y } else { 0.0 },
    )
}

/// Complete simulation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub sprite: Sprite,
    /// Captured once at startup; host resizes are not tracked
    pub bounds: Bounds,
    pub aspect_ratio: f32,
    /// Completed ticks
    pub ticks: u64,
}

impl Simulation {
    pub fn new(sprite: Sprite, bounds: Bounds, aspect_ratio: f32) -> Self {
        Self {
            sprite,
            bounds,
            aspect_ratio,
            ticks: 0,
        }
    }

    /// Size the sprite from the image as it is right now
    pub fn refit(&mut self, image_size: Vec2) {
        self.sprite.fit_to_image(image_size, self.aspect_ratio);
    }

    /// Refit the sprite to the current image size, then advance one tick.
    ///
    /// Returns the edge contact evaluated on the moved position, i.e. which
    /// velocity components were just inverted.
    pub fn step(&mut self, image_size: Vec2) -> EdgeContact {
        self.refit(image_size);
        self.sprite = tick(&self.sprite, self.bounds);
        self.ticks += 1;
        edge_contact(&self.sprite, self.bounds)
    }
}
