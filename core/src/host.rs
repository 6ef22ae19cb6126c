//! Capabilities the navigator needs from its host UI runtime.
//!
//! The browser's intersection observer, event listeners, scrolling and router
//! are reached only through these traits. A host registers a callback per
//! subscription and, when it fires, queues a [`DomEvent`] carrying the
//! subscription id; the navigator drains the queue from its own event loop
//! turn. [`crate::sim::SimulatedDocument`] is the in-process implementation.

use serde::{Deserialize, Serialize};

use navspy_types::{
    ActivationBand, Location, NodeId, RegionId, SectionId, SubscriptionId, VisibilityThresholds,
};

/// Options passed with every intersection observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserveOptions {
    pub band: ActivationBand,
    pub thresholds: VisibilityThresholds,
}

/// One intersection observer report for one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    /// Whether the region overlaps the activation band at all.
    pub is_intersecting: bool,
    /// Fraction of the region inside the band.
    pub ratio: f64,
}

impl IntersectionEntry {
    #[must_use]
    pub fn entering(ratio: f64) -> Self {
        Self {
            is_intersecting: true,
            ratio,
        }
    }

    #[must_use]
    pub fn leaving() -> Self {
        Self {
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

/// A callback invocation, queued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomEvent {
    Intersection {
        subscription: SubscriptionId,
        entry: IntersectionEntry,
    },
    Scroll {
        subscription: SubscriptionId,
    },
    PointerDown {
        subscription: SubscriptionId,
        target: NodeId,
    },
}

impl DomEvent {
    #[must_use]
    pub fn subscription(&self) -> SubscriptionId {
        match self {
            DomEvent::Intersection { subscription, .. }
            | DomEvent::Scroll { subscription }
            | DomEvent::PointerDown { subscription, .. } => *subscription,
        }
    }
}

/// Document access: region lookup, observation, listeners and scrolling.
pub trait Document {
    /// Resolve the rendered region for `section`, if the current page has one.
    fn find_region(&self, section: &SectionId) -> Option<RegionId>;

    /// Start observing `region`. The host queues one initial entry, then one
    /// per threshold crossing.
    fn observe(&mut self, region: RegionId, options: &ObserveOptions) -> SubscriptionId;

    fn unobserve(&mut self, subscription: SubscriptionId);

    fn on_scroll(&mut self) -> SubscriptionId;

    fn on_pointer_down(&mut self) -> SubscriptionId;

    /// Release a scroll or pointer-down listener.
    fn unsubscribe(&mut self, subscription: SubscriptionId);

    /// Current vertical scroll offset in pixels.
    fn scroll_offset(&self) -> f64;

    fn scroll_to_region(&mut self, region: RegionId);

    fn scroll_to_top(&mut self);

    /// Whether `target` lies inside the header's interactive region.
    fn header_contains(&self, target: NodeId) -> bool;

    /// Take every queued callback invocation, oldest first.
    fn drain_events(&mut self) -> Vec<DomEvent>;
}

/// Location changes initiated by the header.
pub trait Router {
    fn navigate(&mut self, location: &Location);
}

/// Everything a [`crate::Navigator`] needs from its host.
pub trait Host: Document + Router {}

impl<T: Document + Router> Host for T {}
