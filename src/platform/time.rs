//! One-shot timers
//!
//! The animation reschedules itself after every frame instead of using a
//! fixed-period interval, so a timer only needs "run this once after N ms"
//! and a way to cancel it.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;

/// A "call me once after `delay_ms`" scheduler.
///
/// Callbacks must never run synchronously inside `set_timeout`.
pub trait Timer {
    type Handle;
    type Error: std::fmt::Debug;

    /// Queue `callback`. On error nothing was queued.
    fn set_timeout(
        &self,
        delay_ms: u32,
        callback: Box<dyn FnOnce()>,
    ) -> Result<Self::Handle, Self::Error>;

    /// Cancel a pending callback. Cancelling one that already ran is a no-op.
    fn clear_timeout(&self, handle: Self::Handle);
}

struct Pending {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

/// Virtual clock that only moves when told to
///
/// Drives the animation natively and in tests without real waiting.
#[derive(Default)]
pub struct ManualTimer {
    now: Cell<u64>,
    next_id: Cell<u64>,
    queue: RefCell<Vec<Pending>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (ms)
    pub fn now_ms(&self) -> u64 {
        self.now.get()
    }

    /// Number of callbacks waiting to fire
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward by `ms`, firing every callback that comes due,
    /// in due order. Callbacks scheduled by a firing callback also run if
    /// they fall inside the window. Returns how many callbacks ran.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now.get() + ms;
        let mut fired = 0;
        while let Some(next) = self.pop_due(target) {
            self.now.set(next.due);
            (next.callback)();
            fired += 1;
        }
        self.now.set(target);
        fired
    }

    fn pop_due(&self, target: u64) -> Option<Pending> {
        let mut queue = self.queue.borrow_mut();
        let index = queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;
        Some(queue.remove(index))
    }
}

impl Timer for ManualTimer {
    type Handle = u64;
    type Error = Infallible;

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<u64, Infallible> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.queue.borrow_mut().push(Pending {
            id,
            due: self.now.get() + delay_ms as u64,
            callback,
        });
        Ok(id)
    }

    fn clear_timeout(&self, handle: u64) {
        self.queue.borrow_mut().retain(|p| p.id != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_fires_when_due() {
        let timer = ManualTimer::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        timer
            .set_timeout(100, Box::new(move || h.set(h.get() + 1)))
            .unwrap();

        assert_eq!(timer.advance(99), 0);
        assert_eq!(hits.get(), 0);
        assert_eq!(timer.advance(1), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(timer.pending(), 0);
        assert_eq!(timer.now_ms(), 100);
    }

    #[test]
    fn test_fires_in_due_order() {
        let timer = ManualTimer::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, 'c'), (10, 'a'), (20, 'b')] {
            let order = order.clone();
            timer
                .set_timeout(delay, Box::new(move || order.borrow_mut().push(tag)))
                .unwrap();
        }
        timer.advance(50);
        assert_eq!(*order.borrow(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_clear_timeout() {
        let timer = ManualTimer::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let handle = timer
            .set_timeout(10, Box::new(move || h.set(h.get() + 1)))
            .unwrap();
        timer.clear_timeout(handle);
        assert_eq!(timer.advance(100), 0);
        assert_eq!(hits.get(), 0);

        // Clearing again is harmless
        timer.clear_timeout(handle);
    }

    #[test]
    fn test_rescheduling_chain() {
        fn schedule(timer: Rc<ManualTimer>, hits: Rc<Cell<u32>>) {
            let t = timer.clone();
            timer
                .set_timeout(
                    25,
                    Box::new(move || {
                        hits.set(hits.get() + 1);
                        schedule(t, hits);
                    }),
                )
                .unwrap();
        }

        let timer = Rc::new(ManualTimer::new());
        let hits = Rc::new(Cell::new(0));
        schedule(timer.clone(), hits.clone());

        assert_eq!(timer.advance(100), 4);
        assert_eq!(hits.get(), 4);
        assert_eq!(timer.pending(), 1);
    }
}
