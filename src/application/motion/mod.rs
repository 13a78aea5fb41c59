//! Scroll-driven presentation effects.
//!
//! Each effect owns its watcher registration through a [`WatchGuard`], so
//! dropping the effect (unmounting the page that holds it) always releases
//! the registration, whether or not it ever fired.

pub mod parallax;
pub mod reveal;

pub use parallax::*;
pub use reveal::*;

use crate::ports::{ViewportWatcher, WatchId};
use std::sync::Arc;

/// A live registration with a [`ViewportWatcher`], released on drop.
pub struct WatchGuard {
    watcher: Arc<dyn ViewportWatcher>,
    id: WatchId,
}

impl WatchGuard {
    pub fn new(watcher: Arc<dyn ViewportWatcher>, id: WatchId) -> Self {
        Self { watcher, id }
    }

    pub fn id(&self) -> WatchId {
        self.id
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.watcher.release(self.id);
    }
}

impl std::fmt::Debug for WatchGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchGuard").field("id", &self.id).finish()
    }
}

/// How far along a visual effect is drawn, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub opacity: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Presentation {
    pub const SETTLED: Presentation = Presentation {
        opacity: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::ports::{ElementId, ObserverOptions, ViewportWatcher, WatchId};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    /// Watcher that only records registrations; tests deliver entries by hand.
    #[derive(Default)]
    pub struct FakeWatcher {
        next_id: AtomicU64,
        active: Mutex<Vec<WatchId>>,
        released: Mutex<Vec<WatchId>>,
        options: Mutex<Vec<ObserverOptions>>,
    }

    impl FakeWatcher {
        pub fn active(&self) -> Vec<WatchId> {
            self.active.lock().unwrap().clone()
        }

        pub fn released(&self) -> Vec<WatchId> {
            self.released.lock().unwrap().clone()
        }

        pub fn observed_options(&self) -> Vec<ObserverOptions> {
            self.options.lock().unwrap().clone()
        }

        fn register(&self) -> WatchId {
            let id = WatchId(self.next_id.fetch_add(1, Ordering::SeqCst));
            self.active.lock().unwrap().push(id);
            id
        }
    }

    impl ViewportWatcher for FakeWatcher {
        fn observe(&self, _element: ElementId, options: ObserverOptions) -> WatchId {
            self.options.lock().unwrap().push(options);
            self.register()
        }

        fn listen_scroll(&self, _element: ElementId) -> WatchId {
            self.register()
        }

        fn release(&self, watch: WatchId) {
            self.active.lock().unwrap().retain(|id| *id != watch);
            self.released.lock().unwrap().push(watch);
        }
    }
}
