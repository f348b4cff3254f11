//! Logo Bounce - a bouncing-logo screensaver
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sprite motion, edge reflection)
//! - `renderer`: Drawing surface abstraction, Canvas2D and software backends
//! - `platform`: Timer scheduling and browser host glue
//! - `animation`: Self-rescheduling driver with start/stop
//! - `settings`: Data-driven configuration

pub mod animation;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use animation::Animation;
pub use settings::Settings;

/// Constants of the stock deployment
pub mod consts {
    /// Delay between frames (milliseconds)
    pub const DEFAULT_TICK_MS: u32 = 125;
    /// On-screen logo size as a fraction of the image's intrinsic size
    pub const DEFAULT_ASPECT_RATIO: f32 = 0.2;

    /// Logo start position (top-left corner)
    pub const START_X: f32 = 20.0;
    pub const START_Y: f32 = 30.0;
    /// Logo start velocity (pixels per tick)
    pub const START_XSPD: f32 = 10.0;
    pub const START_YSPD: f32 = 10.0;

    /// Canvas element the logo is drawn on
    pub const CANVAS_ID: &str = "tv-screen";
    /// Logo image served by the host
    pub const IMAGE_PATH: &str = "/static/images/image.png";
}
