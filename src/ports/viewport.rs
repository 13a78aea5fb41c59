#[cfg(test)]
use mockall::automock;

/// Identifies one laid-out element of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Identifies one registration (observer or scroll listener) with a watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub u64);

/// Vertical extent of an element relative to the top of the viewport, in
/// logical pixels. Negative values are above the visible area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub bottom: f64,
}

impl ElementRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height.max(0.0),
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn shifted(&self, by: f64) -> Self {
        Self {
            top: self.top + by,
            bottom: self.bottom + by,
        }
    }

    /// True while any part of the element sits inside a viewport of the given height
    pub fn intersects_viewport(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom > 0.0
    }

    /// Fraction of the element inside the root band `[0, root_bottom]`.
    pub fn intersection_ratio(&self, root_bottom: f64) -> f64 {
        let visible = (self.bottom.min(root_bottom) - self.top.max(0.0)).max(0.0);
        let height = self.height();
        if height <= 0.0 {
            // Zero-height elements count as fully visible when inside the band
            return if self.top >= 0.0 && self.top <= root_bottom {
                1.0
            } else {
                0.0
            };
        }
        (visible / height).clamp(0.0, 1.0)
    }
}

/// Intersection observer settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Minimum visible fraction that counts as intersecting
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport before measuring
    pub root_margin_bottom: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            root_margin_bottom: 50.0,
        }
    }
}

impl ObserverOptions {
    /// An element taller than the band can never show `threshold` of itself,
    /// so covering the whole band also counts.
    pub fn is_intersecting(&self, rect: &ElementRect, viewport_height: f64) -> bool {
        let root_bottom = (viewport_height - self.root_margin_bottom).max(0.0);
        let ratio = rect.intersection_ratio(root_bottom);
        let covers_band = rect.top <= 0.0 && rect.bottom >= root_bottom;
        ratio > 0.0 && (ratio >= self.threshold || covers_band)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub watch: WatchId,
    pub element: ElementId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEntry {
    pub watch: WatchId,
    pub element: ElementId,
    pub bounds: ElementRect,
    pub viewport_height: f64,
}

/// Notification produced by a watcher, addressed to the registration that asked for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    Intersection(IntersectionEntry),
    Scroll(ScrollEntry),
}

impl ViewportEvent {
    pub fn watch(&self) -> WatchId {
        match self {
            ViewportEvent::Intersection(entry) => entry.watch,
            ViewportEvent::Scroll(entry) => entry.watch,
        }
    }
}

/// Visibility and scroll notifications for laid-out elements.
///
/// Every `observe`/`listen_scroll` is an acquisition that must be paired with
/// exactly one `release`. Scroll listeners are passive: they are told about a
/// scroll after it happened and cannot hold it up.
#[cfg_attr(test, automock)]
pub trait ViewportWatcher: Send + Sync {
    fn observe(&self, element: ElementId, options: ObserverOptions) -> WatchId;

    fn listen_scroll(&self, element: ElementId) -> WatchId;

    fn release(&self, watch: WatchId);
}
