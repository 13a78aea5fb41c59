use std::sync::Arc;

use super::WatchGuard;
use crate::ports::{ElementId, ScrollEntry, ViewportWatcher, WatchId};

pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;
const PARALLAX_FACTOR: f64 = 0.1;

/// Vertical offset for an element whose top edge sits `element_top` pixels
/// below the top of a viewport `viewport_height` pixels tall.
pub fn parallax_offset(viewport_height: f64, element_top: f64, speed: f64) -> f64 {
    (viewport_height - element_top) * speed * PARALLAX_FACTOR
}

/// Continuously offsets an element against the scroll direction while it is on screen.
#[derive(Debug)]
pub struct ScrollParallax {
    element: ElementId,
    speed: f64,
    offset: f64,
    watch: WatchGuard,
}

impl ScrollParallax {
    /// `speed` is a signed multiplier; negative values move the element the other way.
    pub fn mount(watcher: Arc<dyn ViewportWatcher>, element: ElementId, speed: f64) -> Self {
        let id = watcher.listen_scroll(element);

        Self {
            element,
            speed,
            offset: 0.0,
            watch: WatchGuard::new(watcher, id),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn watch_id(&self) -> WatchId {
        self.watch.id()
    }

    /// Last computed offset in logical pixels
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Recompute the offset; outside the viewport the previous value is kept.
    pub fn handle_scroll(&mut self, entry: &ScrollEntry) -> bool {
        if entry.watch != self.watch.id() {
            return false;
        }
        if !entry.bounds.intersects_viewport(entry.viewport_height) {
            return false;
        }

        let next = parallax_offset(entry.viewport_height, entry.bounds.top, self.speed);
        let changed = next != self.offset;
        self.offset = next;
        changed
    }
}
