use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{Presentation, WatchGuard};
use crate::ports::{ElementId, IntersectionEntry, ObserverOptions, ViewportWatcher, WatchId};

/// Distance a hidden element is displaced before it settles.
pub const REVEAL_DISTANCE_PX: f64 = 40.0;
pub const REVEAL_DURATION: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealStyle {
    /// Opacity plus a rise from below
    #[default]
    FadeUp,
    /// Opacity only
    FadeIn,
    /// Opacity plus a slide in from the right
    SlideInRight,
}

impl RevealStyle {
    pub fn hidden(&self) -> Presentation {
        match self {
            RevealStyle::FadeUp => Presentation {
                opacity: 0.0,
                offset_x: 0.0,
                offset_y: REVEAL_DISTANCE_PX,
            },
            RevealStyle::FadeIn => Presentation {
                opacity: 0.0,
                offset_x: 0.0,
                offset_y: 0.0,
            },
            RevealStyle::SlideInRight => Presentation {
                opacity: 0.0,
                offset_x: REVEAL_DISTANCE_PX,
                offset_y: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Hidden. `flip_at` is set once the trigger fired and the delay is running.
    Pending { flip_at: Option<Instant> },
    /// Visible from `at` onwards. Terminal.
    Revealed { at: Instant },
}

/// One-shot reveal of an element the first time it scrolls into view.
#[derive(Debug)]
pub struct ScrollReveal {
    element: ElementId,
    style: RevealStyle,
    delay: Duration,
    state: RevealState,
    watch: Option<WatchGuard>,
}

impl ScrollReveal {
    pub fn mount(
        watcher: Arc<dyn ViewportWatcher>,
        element: ElementId,
        style: RevealStyle,
        delay: Duration,
    ) -> Self {
        let id = watcher.observe(element, ObserverOptions::default());

        Self {
            element,
            style,
            delay,
            state: RevealState::Pending { flip_at: None },
            watch: Some(WatchGuard::new(watcher, id)),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, RevealState::Revealed { .. })
    }

    /// The observer registration, until the trigger fires
    pub fn watch_id(&self) -> Option<WatchId> {
        self.watch.as_ref().map(WatchGuard::id)
    }

    pub fn handle_intersection(&mut self, entry: &IntersectionEntry, now: Instant) {
        if self.watch_id() != Some(entry.watch) || !entry.is_intersecting {
            return;
        }

        // Detach first; later visibility changes must not reach this element.
        self.watch = None;
        self.state = RevealState::Pending {
            flip_at: Some(now + self.delay),
        };
        tracing::trace!("Reveal triggered for {:?}", self.element);
        self.tick(now);
    }

    /// Apply a scheduled flip whose delay has elapsed. Returns true on the flip.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let RevealState::Pending { flip_at: Some(at) } = self.state {
            if now >= at {
                self.state = RevealState::Revealed { at };
                return true;
            }
        }
        false
    }

    pub fn presentation(&self, now: Instant) -> Presentation {
        let hidden = self.style.hidden();
        match self.state {
            RevealState::Pending { .. } => hidden,
            RevealState::Revealed { at } => {
                let elapsed = now.saturating_duration_since(at).as_secs_f64();
                let t = (elapsed / REVEAL_DURATION.as_secs_f64()).clamp(0.0, 1.0);
                let eased = ease_out(t);
                let settled = Presentation::SETTLED;
                Presentation {
                    opacity: lerp(hidden.opacity, settled.opacity, eased),
                    offset_x: lerp(hidden.offset_x, settled.offset_x, eased),
                    offset_y: lerp(hidden.offset_y, settled.offset_y, eased),
                }
            }
        }
    }

    /// True while a flip is scheduled or the settle transition is running
    pub fn is_animating(&self, now: Instant) -> bool {
        match self.state {
            RevealState::Pending { flip_at } => flip_at.is_some(),
            RevealState::Revealed { at } => now.saturating_duration_since(at) < REVEAL_DURATION,
        }
    }
}

fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
