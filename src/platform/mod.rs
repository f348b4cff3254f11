//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Timers (one-shot callbacks used to drive the animation)
//! - Canvas and image lookup in the DOM

pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use time::{ManualTimer, Timer};
#[cfg(target_arch = "wasm32")]
pub use web::WebTimer;

/// Failures while wiring the animation into the host page
#[derive(thiserror::Error, Debug)]
pub enum HostError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("no element with id `{0}`")]
    CanvasNotFound(String),

    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),

    #[error("2D context unavailable")]
    NoContext,

    /// Exception thrown by a browser API
    #[error("JS error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for HostError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        HostError::Js(format!("{:?}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_messages() {
        assert_eq!(
            HostError::CanvasNotFound("tv-screen".into()).to_string(),
            "no element with id `tv-screen`"
        );
        assert_eq!(HostError::NoContext.to_string(), "2D context unavailable");
    }
}
