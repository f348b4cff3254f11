//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - State passed in explicitly, no globals
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{EdgeContact, edge_contact};
pub use state::{Bounds, Simulation, Sprite};
pub use tick::tick;
