//! Logo Bounce entry point
//!
//! Handles platform-specific initialization and starts the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_screensaver {
    use std::cell::RefCell;
    use std::rc::Rc;

    use logo_bounce::platform::{HostError, WebTimer, web};
    use logo_bounce::renderer::CanvasSurface;
    use logo_bounce::{Animation, Settings};

    type WebAnimation = Animation<CanvasSurface, WebTimer>;

    thread_local! {
        /// Keeps the running animation alive for the page's lifetime
        static ANIMATION: RefCell<Option<WebAnimation>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<(), HostError> {
        let settings = Settings::load();

        let canvas = web::canvas_by_id(&settings.canvas_id)?;
        log::info!("Canvas loaded");
        let (width, height) = web::fit_to_window(&canvas)?;
        log::info!("Canvas sized to {}x{}", width, height);

        let image = web::load_image(&settings.image_path)?;
        let surface = CanvasSurface::new(canvas)?;
        let timer = Rc::new(WebTimer::new()?);

        let animation = Animation::new(&settings, surface, image, timer);
        animation.start();
        ANIMATION.with(|slot| *slot.borrow_mut() = Some(animation));

        Ok(())
    }

    pub fn with_animation(f: impl FnOnce(&WebAnimation)) {
        ANIMATION.with(|slot| match slot.borrow().as_ref() {
            Some(animation) => f(animation),
            None => log::warn!("Screensaver not initialized"),
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
    }

    log::info!("Logo Bounce starting...");
    match wasm_screensaver::run() {
        Ok(()) => log::info!("Logo Bounce running!"),
        Err(e) => log::error!("Logo Bounce failed to start: {}", e),
    }
}

/// Resume the animation from where it stopped
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_screensaver() {
    wasm_screensaver::with_animation(|a| a.start());
}

/// Halt the animation; the logo stays where it is
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_screensaver() {
    wasm_screensaver::with_animation(|a| a.stop());
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Logo Bounce (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    run_headless(400);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the animation on a virtual clock against an in-memory surface
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(frames: u64) {
    use std::rc::Rc;

    use logo_bounce::platform::ManualTimer;
    use logo_bounce::renderer::{Bitmap, Color, SoftwareSurface};
    use logo_bounce::{Animation, Settings};

    let settings = Settings::load();
    let timer = Rc::new(ManualTimer::new());
    // The image arrives a few frames in, like a slow network fetch
    let animation = Animation::new(
        &settings,
        SoftwareSurface::new(800, 600),
        Bitmap::empty(),
        timer.clone(),
    );
    animation.start();

    for frame in 0..frames {
        if frame == 3 {
            animation.set_image(Bitmap::filled(200, 200, Color::rgb(230, 230, 230)));
            log::info!("Logo loaded");
        }
        timer.advance(settings.tick_ms as u64);
        if frame % 50 == 0 {
            let sprite = animation.sprite();
            log::info!(
                "t={}ms frame {}: pos ({}, {}) vel ({}, {})",
                timer.now_ms(),
                animation.frames(),
                sprite.pos.x,
                sprite.pos.y,
                sprite.vel.x,
                sprite.vel.y
            );
        }
    }

    animation.stop();
    println!(
        "Ran {} frames, logo at ({}, {})",
        animation.frames(),
        animation.sprite().pos.x,
        animation.sprite().pos.y
    );
}
