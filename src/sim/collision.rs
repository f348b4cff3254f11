//! Edge contact detection
//!
//! The canvas is an axis-aligned box anchored at the origin, so contact is
//! decided per axis: the sprite touches an edge when its near side is at or
//! past 0, or its far side is at or past the bound.

use serde::{Deserialize, Serialize};

use super::state::{Bounds, Sprite};

/// Which axes are in contact with a canvas edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeContact {
    /// Left or right edge
    pub x: bool,
    /// Top or bottom edge
    pub y: bool,
}

impl EdgeContact {
    /// Neither axis touching
    pub const NONE: Self = Self { x: false, y: false };

    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.y
    }

    /// Both axes at once (a corner hit)
    #[inline]
    pub fn corner(&self) -> bool {
        self.x && self.y
    }
}

/// Check the sprite's current position against the canvas edges
pub fn edge_contact(sprite: &Sprite, bounds: Bounds) -> EdgeContact {
    let far = sprite.max();
    EdgeContact {
        x: far.x >= bounds.width || sprite.pos.x <= 0.0,
        y: far.y >= bounds.height || sprite.pos.y <= 0.0,
    }
}
