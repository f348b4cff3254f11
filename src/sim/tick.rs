//! Per-frame simulation tick
//!
//! Moves the sprite by one velocity step, then reflects off any edge it is
//! touching. The reflection is evaluated on the moved position and only
//! affects the next move, so the sprite can overshoot an edge by up to one
//! step before it turns around.

use super::collision::edge_contact;
use super::state::{Bounds, Sprite};

/// Advance the sprite by one tick
pub fn tick(sprite: &Sprite, bounds: Bounds) -> Sprite {
    let mut next = *sprite;
    next.pos += next.vel;

    let contact = edge_contact(&next, bounds);
    if contact.x {
        next.vel.x = -next.vel.x;
    }
    if contact.y {
        next.vel.y = -next.vel.y;
    }

    next
}
