//! Browser host glue
//!
//! DOM lookups, canvas sizing, image loading and `setTimeout` scheduling.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, Window};

use super::{HostError, Timer};

pub fn window() -> Result<Window, HostError> {
    web_sys::window().ok_or(HostError::NoWindow)
}

pub fn document() -> Result<Document, HostError> {
    window()?.document().ok_or(HostError::NoDocument)
}

/// Look up the `<canvas>` with the given id
pub fn canvas_by_id(id: &str) -> Result<HtmlCanvasElement, HostError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| HostError::CanvasNotFound(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| HostError::NotACanvas(id.to_string()))
}

/// Size the canvas backing store to the window's inner size.
///
/// Done once at startup; later window resizes are not followed.
pub fn fit_to_window(canvas: &HtmlCanvasElement) -> Result<(u32, u32), HostError> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0) as u32;
    let height = window.inner_height()?.as_f64().unwrap_or(0.0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    Ok((width, height))
}

/// Start loading an image. Returns immediately; the browser fills in the
/// natural size once the fetch completes.
pub fn load_image(src: &str) -> Result<HtmlImageElement, HostError> {
    let image = HtmlImageElement::new()?;
    image.set_src(src);
    Ok(image)
}

struct Scheduled {
    handle: i32,
    /// Set once the callback has returned
    fired: Rc<Cell<bool>>,
    _closure: Closure<dyn FnMut()>,
}

/// `window.setTimeout` based timer
///
/// Keeps each JS closure alive until it has fired or been cleared. Fired
/// closures are released on the next `set_timeout`, never while running.
pub struct WebTimer {
    window: Window,
    scheduled: RefCell<Vec<Scheduled>>,
}

impl WebTimer {
    pub fn new() -> Result<Self, HostError> {
        Ok(Self {
            window: window()?,
            scheduled: RefCell::new(Vec::new()),
        })
    }
}

impl Timer for WebTimer {
    type Handle = i32;
    type Error = HostError;

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<i32, HostError> {
        let fired = Rc::new(Cell::new(false));
        let done = fired.clone();
        let closure: Closure<dyn FnMut()> = Closure::once(move || {
            callback();
            done.set(true);
        });

        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )?;

        let mut scheduled = self.scheduled.borrow_mut();
        scheduled.retain(|s| !s.fired.get());
        scheduled.push(Scheduled {
            handle,
            fired,
            _closure: closure,
        });
        Ok(handle)
    }

    fn clear_timeout(&self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
        // Cancelled callbacks never run, so their closures can go now
        self.scheduled.borrow_mut().retain(|s| s.handle != handle);
    }
}
