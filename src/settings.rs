//! Animation settings
//!
//! Optionally overridden from a JSON object in LocalStorage. Every field
//! falls back to the stock value when missing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::{Color, Palette, colors};
use crate::sim::Sprite;

/// Animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay between frames in milliseconds (at least 1)
    pub tick_ms: u32,
    /// Logo size as a fraction of the image's intrinsic size
    pub aspect_ratio: f32,
    /// URL of the logo image
    pub image_path: String,
    /// Id of the `<canvas>` element to draw on
    pub canvas_id: String,

    // === Motion ===
    /// Logo top-left corner at startup
    pub start_position: Vec2,
    /// Logo velocity at startup (pixels per tick)
    pub start_velocity: Vec2,

    // === Colors ===
    /// Canvas fill (forced opaque)
    pub background: Color,
    /// Fill behind the logo
    pub logo_backdrop: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            image_path: IMAGE_PATH.to_string(),
            canvas_id: CANVAS_ID.to_string(),

            start_position: Vec2::new(START_X, START_Y),
            start_velocity: Vec2::new(START_XSPD, START_YSPD),

            background: colors::BACKGROUND,
            logo_backdrop: colors::LOGO_BACKDROP,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "logo_bounce_settings";

    /// Parse settings from JSON and sanitize them
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Replace values the animation cannot run with
    pub fn sanitize(&mut self) {
        let defaults = Self::default();

        self.tick_ms = self.tick_ms.max(1);
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio >= 0.0) {
            log::warn!("Invalid aspect_ratio {}, using default", self.aspect_ratio);
            self.aspect_ratio = defaults.aspect_ratio;
        }
        if !self.start_position.is_finite() {
            self.start_position = defaults.start_position;
        }
        if !self.start_velocity.is_finite() {
            self.start_velocity = defaults.start_velocity;
        }
        self.background = self.background.opaque();
    }

    /// Sprite at its configured start state
    pub fn start_sprite(&self) -> Sprite {
        Sprite::new(self.start_position, self.start_velocity)
    }

    pub fn palette(&self) -> Palette {
        Palette {
            background: self.background,
            logo_backdrop: self.logo_backdrop,
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
