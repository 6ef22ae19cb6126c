//! Visibility Tracker: owns the set of sections currently in view.

use std::collections::HashMap;

use navspy_types::{SectionCatalog, SectionId, SubscriptionId, TrackerOptions, VisibilitySet};

use crate::host::{Document, IntersectionEntry, ObserveOptions};

/// A membership change in the visibility set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityTransition {
    Added(SectionId),
    Removed(SectionId),
}

/// Observes every rendered section of one page context.
///
/// An instance lives exactly as long as the context it was installed for:
/// [`VisibilityTracker::install`] registers one observation per rendered
/// section plus a scroll listener, and [`VisibilityTracker::teardown`]
/// releases all of them. The visibility set is built fresh per instance.
#[derive(Debug)]
pub struct VisibilityTracker {
    observations: HashMap<SubscriptionId, SectionId>,
    scroll_listener: SubscriptionId,
    visible: VisibilitySet,
}

impl VisibilityTracker {
    /// Observe each catalog section the document currently renders.
    ///
    /// Sections without a region are skipped; they simply never become
    /// visible.
    pub fn install<D: Document + ?Sized>(
        document: &mut D,
        catalog: &SectionCatalog,
        options: &TrackerOptions,
    ) -> Self {
        let observe_options = ObserveOptions {
            band: options.band,
            thresholds: options.thresholds.clone(),
        };

        let mut observations = HashMap::with_capacity(catalog.len());
        for id in catalog.ids() {
            match document.find_region(id) {
                Some(region) => {
                    let subscription = document.observe(region, &observe_options);
                    tracing::debug!(section = %id, %subscription, "Observing section");
                    observations.insert(subscription, id.clone());
                }
                None => tracing::debug!(section = %id, "Section not rendered; not observed"),
            }
        }

        let scroll_listener = document.on_scroll();

        Self {
            observations,
            scroll_listener,
            visible: VisibilitySet::new(),
        }
    }

    /// Release every registration this tracker holds.
    pub fn teardown<D: Document + ?Sized>(self, document: &mut D) {
        for subscription in self.observations.keys() {
            document.unobserve(*subscription);
        }
        document.unsubscribe(self.scroll_listener);
        tracing::debug!(
            observations = self.observations.len(),
            "Visibility tracker torn down"
        );
    }

    /// Apply one observer report.
    ///
    /// Returns the transition it caused, or `None` when membership did not
    /// change or the subscription is not one of ours.
    pub fn apply(
        &mut self,
        subscription: SubscriptionId,
        entry: IntersectionEntry,
    ) -> Option<VisibilityTransition> {
        let Some(section) = self.observations.get(&subscription) else {
            tracing::trace!(%subscription, "Ignoring report for unknown observation");
            return None;
        };

        if entry.is_intersecting {
            self.visible
                .insert(section.clone())
                .then(|| VisibilityTransition::Added(section.clone()))
        } else {
            self.visible
                .remove(section)
                .then(|| VisibilityTransition::Removed(section.clone()))
        }
    }

    #[must_use]
    pub fn owns_scroll_listener(&self, subscription: SubscriptionId) -> bool {
        self.scroll_listener == subscription
    }

    #[must_use]
    pub fn visible(&self) -> &VisibilitySet {
        &self.visible
    }

    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_observing(&self, section: &SectionId) -> bool {
        self.observations.values().any(|s| s == section)
    }
}
