//! Animation driver
//!
//! Owns the simulation, the drawing surface, the logo image and the pending
//! timer. Each frame paints the current state, advances the simulation one
//! tick and then schedules the next frame `tick_ms` later, so frames never
//! overlap and the real cadence is the interval plus the frame's own cost.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::platform::Timer;
use crate::renderer::{ImageSource, Palette, Surface, render};
use crate::settings::Settings;
use crate::sim::{Bounds, Simulation, Sprite};

struct Inner<S: Surface, T: Timer> {
    sim: Simulation,
    surface: S,
    image: S::Image,
    palette: Palette,
    timer: Rc<T>,
    tick_ms: u32,
    running: bool,
    pending: Option<T::Handle>,
    frames: u64,
}

/// A bouncing logo bound to a surface and a timer
pub struct Animation<S, T>
where
    S: Surface + 'static,
    T: Timer + 'static,
{
    inner: Rc<RefCell<Inner<S, T>>>,
}

impl<S, T> Animation<S, T>
where
    S: Surface + 'static,
    T: Timer + 'static,
{
    /// Bounds are taken from the surface here and kept for the lifetime of
    /// the animation.
    pub fn new(settings: &Settings, surface: S, image: S::Image, timer: Rc<T>) -> Self {
        let bounds = Bounds::new(surface.width(), surface.height());
        let sim = Simulation::new(settings.start_sprite(), bounds, settings.aspect_ratio);
        log::info!(
            "Animation created: {}x{} canvas, {} ms per frame",
            bounds.width,
            bounds.height,
            settings.tick_ms
        );

        Self {
            inner: Rc::new(RefCell::new(Inner {
                sim,
                surface,
                image,
                palette: settings.palette(),
                timer,
                tick_ms: settings.tick_ms.max(1),
                running: false,
                pending: None,
                frames: 0,
            })),
        }
    }

    /// Begin the frame loop. The first frame runs one interval from now.
    /// Does nothing if already running. If the timer refuses the first frame
    /// the animation is left stopped.
    pub fn start(&self) {
        {
            let mut state = self.inner.borrow_mut();
            if state.running {
                return;
            }
            state.running = true;
        }
        log::info!("Animation started");
        schedule_next(&self.inner);
    }

    /// Cancel the pending frame. State is kept, so `start` resumes in place.
    pub fn stop(&self) {
        let mut state = self.inner.borrow_mut();
        if !state.running {
            return;
        }
        state.running = false;
        if let Some(handle) = state.pending.take() {
            state.timer.clear_timeout(handle);
        }
        log::info!("Animation stopped after {} frames", state.frames);
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.inner.borrow().frames
    }

    pub fn sprite(&self) -> Sprite {
        self.inner.borrow().sim.sprite
    }

    pub fn bounds(&self) -> Bounds {
        self.inner.borrow().sim.bounds
    }

    /// Swap the logo image; its size applies from the next frame
    pub fn set_image(&self, image: S::Image) {
        self.inner.borrow_mut().image = image;
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.borrow().surface)
    }

    /// Mutable surface access for the host (e.g. resizing the backing store).
    /// The simulation keeps the bounds captured at creation.
    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.borrow_mut().surface)
    }
}

impl<S, T> Drop for Animation<S, T>
where
    S: Surface + 'static,
    T: Timer + 'static,
{
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule_next<S, T>(inner: &Rc<RefCell<Inner<S, T>>>)
where
    S: Surface + 'static,
    T: Timer + 'static,
{
    let weak: Weak<RefCell<Inner<S, T>>> = Rc::downgrade(inner);
    let mut state = inner.borrow_mut();
    let timer = state.timer.clone();
    let scheduled = timer.set_timeout(
        state.tick_ms,
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                run_frame(&inner);
            }
        }),
    );
    match scheduled {
        Ok(handle) => state.pending = Some(handle),
        Err(e) => {
            // Nothing is queued, so the loop is over; let `start` retry
            log::error!("Failed to schedule frame: {:?}", e);
            state.running = false;
        }
    }
}

fn run_frame<S, T>(inner: &Rc<RefCell<Inner<S, T>>>)
where
    S: Surface + 'static,
    T: Timer + 'static,
{
    {
        let mut guard = inner.borrow_mut();
        let state = &mut *guard;
        state.pending = None;
        if !state.running {
            return;
        }

        // Size comes from the image as it is at draw time
        state.sim.refit(state.image.natural_size());
        if let Err(e) = render(&mut state.surface, &state.sim.sprite, &state.image, &state.palette)
        {
            log::warn!("Render error: {:?}", e);
        }

        let contact = state.sim.step(state.image.natural_size());
        if contact.any() {
            let sprite = &state.sim.sprite;
            log::debug!(
                "Bounce at ({:.1}, {:.1}): x={} y={}, velocity now ({}, {})",
                sprite.pos.x,
                sprite.pos.y,
                contact.x,
                contact.y,
                sprite.vel.x,
                sprite.vel.y
            );
        }
        state.frames += 1;
        log::trace!("Frame {} done", state.frames);
    }

    schedule_next(inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualTimer;
    use crate::renderer::{Bitmap, Color, SoftwareSurface, colors};
    use glam::Vec2;

    const LOGO: Color = Color::rgb(255, 0, 0);

    fn animation(image: Bitmap) -> (Animation<SoftwareSurface, ManualTimer>, Rc<ManualTimer>) {
        let timer = Rc::new(ManualTimer::new());
        let anim = Animation::new(
            &Settings::default(),
            SoftwareSurface::new(800, 600),
            image,
            timer.clone(),
        );
        (anim, timer)
    }

    fn logo() -> Bitmap {
        Bitmap::filled(200, 200, LOGO)
    }

    #[test]
    fn test_not_running_until_started() {
        let (anim, timer) = animation(logo());
        assert!(!anim.is_running());
        assert_eq!(timer.pending(), 0);
        timer.advance(1000);
        assert_eq!(anim.frames(), 0);
    }

    #[test]
    fn test_frames_follow_tick_interval() {
        let (anim, timer) = animation(logo());
        anim.start();

        timer.advance(124);
        assert_eq!(anim.frames(), 0);
        timer.advance(1);
        assert_eq!(anim.frames(), 1);
        assert_eq!(anim.sprite().pos, Vec2::new(30.0, 40.0));
        assert_eq!(anim.sprite().vel, Vec2::new(10.0, 10.0));

        timer.advance(125 * 9);
        assert_eq!(anim.frames(), 10);
        assert_eq!(anim.sprite().pos, Vec2::new(120.0, 130.0));
        // Only ever one frame queued
        assert_eq!(timer.pending(), 1);
    }

    #[test]
    fn test_start_twice_keeps_one_loop() {
        let (anim, timer) = animation(logo());
        anim.start();
        anim.start();
        assert_eq!(timer.pending(), 1);
        timer.advance(125);
        assert_eq!(anim.frames(), 1);
    }

    #[test]
    fn test_stop_and_resume() {
        let (anim, timer) = animation(logo());
        anim.start();
        timer.advance(250);
        assert_eq!(anim.frames(), 2);

        anim.stop();
        assert!(!anim.is_running());
        assert_eq!(timer.pending(), 0);
        timer.advance(10_000);
        assert_eq!(anim.frames(), 2);
        let parked = anim.sprite();

        anim.start();
        timer.advance(125);
        assert_eq!(anim.frames(), 3);
        assert_eq!(anim.sprite().pos, parked.pos + parked.vel);
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let (anim, timer) = animation(logo());
        anim.start();
        assert_eq!(timer.pending(), 1);
        drop(anim);
        assert_eq!(timer.pending(), 0);
        assert_eq!(timer.advance(1000), 0);
    }

    #[test]
    fn test_frame_paints_pre_tick_position() {
        let (anim, timer) = animation(logo());
        anim.start();
        timer.advance(125);

        anim.with_surface(|surface| {
            let frame = surface.frame();
            // 200x200 logo at 0.2 scale drawn at the start position
            assert_eq!(frame.count(LOGO), 40 * 40);
            assert_eq!(frame.get(20, 30), Some(LOGO));
            assert_eq!(frame.get(59, 69), Some(LOGO));
            assert_eq!(frame.get(60, 70), Some(colors::BACKGROUND));
            assert_eq!(frame.count(colors::BACKGROUND), 800 * 600 - 40 * 40);
        });
    }

    #[test]
    fn test_no_trail_between_frames() {
        let (anim, timer) = animation(logo());
        anim.start();
        timer.advance(250);

        anim.with_surface(|surface| {
            let frame = surface.frame();
            assert_eq!(frame.count(LOGO), 40 * 40);
            // Previous frame's corner is background again
            assert_eq!(frame.get(20, 30), Some(colors::BACKGROUND));
            assert_eq!(frame.get(30, 40), Some(LOGO));
        });
    }

    #[test]
    fn test_late_image_load() {
        let (anim, timer) = animation(Bitmap::empty());
        anim.start();
        timer.advance(125);
        assert_eq!(anim.sprite().size, Vec2::ZERO);
        anim.with_surface(|s| assert_eq!(s.frame().count(LOGO), 0));

        anim.set_image(logo());
        timer.advance(125);
        assert_eq!(anim.sprite().size, Vec2::new(40.0, 40.0));
        anim.with_surface(|s| assert_eq!(s.frame().count(LOGO), 40 * 40));
    }

    #[test]
    fn test_first_frame_after_load_draws_logo() {
        let (anim, timer) = animation(Bitmap::empty());
        anim.start();
        timer.advance(125);
        anim.set_image(logo());

        timer.advance(125);
        anim.with_surface(|s| {
            // Drawn at the pre-tick position of frame two
            assert_eq!(s.frame().count(LOGO), 40 * 40);
            assert_eq!(s.frame().get(30, 40), Some(LOGO));
        });
    }

    /// Timer whose host refuses every request
    struct RefusingTimer;

    impl Timer for RefusingTimer {
        type Handle = ();
        type Error = &'static str;

        fn set_timeout(&self, _delay_ms: u32, _callback: Box<dyn FnOnce()>) -> Result<(), &'static str> {
            Err("no timers")
        }

        fn clear_timeout(&self, _handle: ()) {}
    }

    #[test]
    fn test_failed_schedule_leaves_animation_stopped() {
        let anim = Animation::new(
            &Settings::default(),
            SoftwareSurface::new(800, 600),
            logo(),
            Rc::new(RefusingTimer),
        );
        anim.start();
        assert!(!anim.is_running());
        assert_eq!(anim.frames(), 0);

        // Not wedged: a later start tries again
        anim.start();
        assert!(!anim.is_running());
    }

    #[test]
    fn test_bounds_not_refreshed_on_resize() {
        let (anim, timer) = animation(logo());
        anim.start();
        anim.with_surface_mut(|s| s.resize(400, 300));
        timer.advance(125);
        assert_eq!(anim.bounds(), Bounds::new(800.0, 600.0));
        anim.with_surface(|s| assert_eq!(s.frame().width(), 400));
    }

    #[test]
    fn test_bounces_off_right_edge() {
        let timer = Rc::new(ManualTimer::new());
        let settings = Settings {
            start_position: Vec2::new(750.0, 100.0),
            ..Default::default()
        };
        let anim = Animation::new(&settings, SoftwareSurface::new(800, 600), logo(), timer.clone());
        anim.start();

        // 750 -> 760: 760 + 40 >= 800
        timer.advance(125);
        assert_eq!(anim.sprite().pos.x, 760.0);
        assert_eq!(anim.sprite().vel.x, -10.0);

        timer.advance(125);
        assert_eq!(anim.sprite().pos.x, 750.0);
        assert_eq!(anim.sprite().vel.y, 10.0);
    }
}
