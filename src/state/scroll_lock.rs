/// Page scroll suspension while the viewer is open
///
/// The page owns a `PageScroll` handle. Opening the viewer acquires a
/// `ScrollLock`, which remembers the overflow mode it found and puts it back
/// when dropped, so every exit path (close, escape, background click,
/// teardown) restores the page.

use std::cell::Cell;
use std::rc::Rc;

/// Whether the page content scrolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

/// Shared handle to the page's overflow mode
#[derive(Debug, Clone, Default)]
pub struct PageScroll {
    overflow: Rc<Cell<Overflow>>,
}

impl PageScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow.get()
    }

    pub fn is_suspended(&self) -> bool {
        self.overflow() == Overflow::Hidden
    }

    /// Suspend page scrolling until the returned lock is dropped
    pub fn lock(&self) -> ScrollLock {
        let prior = self.overflow.replace(Overflow::Hidden);
        ScrollLock {
            page: self.clone(),
            prior,
        }
    }
}

/// Held for as long as page scrolling must stay suspended
#[derive(Debug)]
pub struct ScrollLock {
    page: PageScroll,
    prior: Overflow,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.page.overflow.set(self.prior);
    }
}
