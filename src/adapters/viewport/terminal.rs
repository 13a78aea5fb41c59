use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::ports::{
    ElementId, ElementRect, IntersectionEntry, ObserverOptions, ScrollEntry, ViewportEvent,
    ViewportWatcher, WatchId,
};

/// Conversion between terminal cells and logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    pub px_per_row: f64,
    pub px_per_col: f64,
}

impl PixelScale {
    pub fn new(px_per_row: u16, px_per_col: u16) -> Self {
        Self {
            px_per_row: f64::from(px_per_row.max(1)),
            px_per_col: f64::from(px_per_col.max(1)),
        }
    }

    pub fn rows_to_px(&self, rows: u16) -> f64 {
        f64::from(rows) * self.px_per_row
    }

    pub fn px_to_rows(&self, px: f64) -> i32 {
        (px / self.px_per_row).round() as i32
    }

    pub fn px_to_cols(&self, px: f64) -> i32 {
        (px / self.px_per_col).round() as i32
    }
}

impl Default for PixelScale {
    fn default() -> Self {
        Self::new(16, 8)
    }
}

#[derive(Debug, Clone, Copy)]
enum WatchKind {
    Observe {
        options: ObserverOptions,
        /// Last reported intersection state; `None` until the first report
        last: Option<bool>,
    },
    Scroll,
}

#[derive(Debug, Clone, Copy)]
struct Watch {
    element: ElementId,
    kind: WatchKind,
}

#[derive(Debug)]
struct ScrollState {
    top: f64,
    viewport_height: f64,
    /// Set by a scroll, cleared once listeners were notified
    pending_scroll: bool,
}

/// `ViewportWatcher` over a scrollable terminal document.
///
/// The page lays out its elements in document pixels with `set_layout`; the
/// UI loop moves the viewport with `scroll_to`/`scroll_by` and drains
/// notifications with `poll` once per frame.
pub struct TerminalViewport {
    scale: PixelScale,
    scroll: Mutex<ScrollState>,
    layout: DashMap<ElementId, ElementRect>,
    watches: DashMap<WatchId, Watch>,
    next_id: AtomicU64,
}

impl TerminalViewport {
    pub fn new(scale: PixelScale) -> Self {
        Self {
            scale,
            scroll: Mutex::new(ScrollState {
                top: 0.0,
                viewport_height: 0.0,
                pending_scroll: false,
            }),
            layout: DashMap::new(),
            watches: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn scale(&self) -> PixelScale {
        self.scale
    }

    /// Place an element in document coordinates (top of the page is 0)
    pub fn set_layout(&self, element: ElementId, rect: ElementRect) {
        self.layout.insert(element, rect);
    }

    pub fn clear_layout(&self) {
        self.layout.clear();
        self.with_scroll(|state| state.top = 0.0);
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.with_scroll(|state| state.viewport_height = height.max(0.0));
        let max = self.max_scroll();
        self.with_scroll(|state| state.top = state.top.min(max));
    }

    pub fn document_height(&self) -> f64 {
        self.layout
            .iter()
            .map(|entry| entry.value().bottom)
            .fold(0.0, f64::max)
    }

    pub fn scroll_top(&self) -> f64 {
        self.with_scroll(|state| state.top)
    }

    pub fn max_scroll(&self) -> f64 {
        let viewport_height = self.with_scroll(|state| state.viewport_height);
        (self.document_height() - viewport_height).max(0.0)
    }

    pub fn scroll_to(&self, top: f64) {
        let target = top.clamp(0.0, self.max_scroll());
        self.with_scroll(|state| {
            if state.top != target {
                state.top = target;
                state.pending_scroll = true;
            }
        });
    }

    pub fn scroll_by(&self, delta: f64) {
        self.scroll_to(self.scroll_top() + delta);
    }

    /// Number of live registrations
    pub fn active_watches(&self) -> usize {
        self.watches.len()
    }

    /// Drain pending notifications, ordered by registration.
    ///
    /// Observers hear about their first measurement and every later change of
    /// intersection state; scroll listeners hear about every scroll since the
    /// previous poll.
    pub fn poll(&self) -> Vec<ViewportEvent> {
        let (top, viewport_height, scrolled) = self.with_scroll(|state| {
            let scrolled = state.pending_scroll;
            state.pending_scroll = false;
            (state.top, state.viewport_height, scrolled)
        });

        let mut events = Vec::new();
        for mut entry in self.watches.iter_mut() {
            let watch_id = *entry.key();
            let watch = entry.value_mut();
            let Some(rect) = self.layout.get(&watch.element).map(|r| r.shifted(-top)) else {
                continue;
            };

            match &mut watch.kind {
                WatchKind::Observe { options, last } => {
                    let is_intersecting = options.is_intersecting(&rect, viewport_height);
                    if *last != Some(is_intersecting) {
                        *last = Some(is_intersecting);
                        let root_bottom = (viewport_height - options.root_margin_bottom).max(0.0);
                        events.push(ViewportEvent::Intersection(IntersectionEntry {
                            watch: watch_id,
                            element: watch.element,
                            ratio: rect.intersection_ratio(root_bottom),
                            is_intersecting,
                        }));
                    }
                }
                WatchKind::Scroll if scrolled => {
                    events.push(ViewportEvent::Scroll(ScrollEntry {
                        watch: watch_id,
                        element: watch.element,
                        bounds: rect,
                        viewport_height,
                    }));
                }
                WatchKind::Scroll => {}
            }
        }

        events.sort_by_key(|event| event.watch().0);
        events
    }

    fn register(&self, element: ElementId, kind: WatchKind) -> WatchId {
        let id = WatchId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.watches.insert(id, Watch { element, kind });
        id
    }

    fn with_scroll<R>(&self, f: impl FnOnce(&mut ScrollState) -> R) -> R {
        // A poisoned lock only means a panic mid-update of plain numbers
        let mut guard = self
            .scroll
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl ViewportWatcher for TerminalViewport {
    fn observe(&self, element: ElementId, options: ObserverOptions) -> WatchId {
        self.register(
            element,
            WatchKind::Observe {
                options,
                last: None,
            },
        )
    }

    fn listen_scroll(&self, element: ElementId) -> WatchId {
        self.register(element, WatchKind::Scroll)
    }

    fn release(&self, watch: WatchId) {
        if self.watches.remove(&watch).is_none() {
            tracing::trace!("Release of unknown watch {:?}", watch);
        }
    }
}
