//! In-process host: a laid-out document with a scrollable viewport.
//!
//! Regions are vertical spans per page path. Intersection is computed against
//! the activation band of each observation, and an entry is queued whenever a
//! region's intersecting flag or threshold bucket changes, plus once when the
//! observation starts. Scroll listeners fire on every effective scroll.
//! Navigations re-render the page registered for the new path.

use std::collections::{BTreeMap, HashMap, HashSet};

use navspy_types::{Location, NodeId, RegionId, SectionId, SubscriptionId, VerticalSpan};

use crate::host::{DomEvent, Document, IntersectionEntry, ObserveOptions, Router};

#[derive(Debug, Clone)]
struct RenderedRegion {
    id: RegionId,
    section: SectionId,
    span: VerticalSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reading {
    intersecting: bool,
    bucket: usize,
}

#[derive(Debug, Clone)]
struct Observation {
    region: RegionId,
    options: ObserveOptions,
    last: Option<Reading>,
}

#[derive(Debug, Clone)]
pub struct SimulatedDocument {
    viewport_height: f64,
    scroll_y: f64,
    location: Location,
    pages: HashMap<String, Vec<(SectionId, VerticalSpan)>>,
    rendered: Vec<RenderedRegion>,
    header_nodes: HashSet<NodeId>,
    next_id: u64,
    observations: BTreeMap<SubscriptionId, Observation>,
    scroll_listeners: Vec<SubscriptionId>,
    pointer_listeners: Vec<SubscriptionId>,
    queue: Vec<DomEvent>,
    navigations: Vec<Location>,
    programmatic_scrolls: Vec<f64>,
}

impl SimulatedDocument {
    /// Empty document at `/` with the given viewport height.
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height: viewport_height.max(0.0),
            scroll_y: 0.0,
            location: Location::root(),
            pages: HashMap::new(),
            rendered: Vec::new(),
            header_nodes: HashSet::new(),
            next_id: 1,
            observations: BTreeMap::new(),
            scroll_listeners: Vec::new(),
            pointer_listeners: Vec::new(),
            queue: Vec::new(),
            navigations: Vec::new(),
            programmatic_scrolls: Vec::new(),
        }
    }

    /// Register the layout rendered at `path`.
    ///
    /// Entries whose id is not a valid section id are dropped with a warning;
    /// no section could ever match them.
    #[must_use]
    pub fn with_page<S: AsRef<str>>(
        mut self,
        path: &str,
        regions: impl IntoIterator<Item = (S, VerticalSpan)>,
    ) -> Self {
        let regions = regions
            .into_iter()
            .filter_map(|(raw, span)| match SectionId::new(raw.as_ref()) {
                Ok(id) => Some((id, span)),
                Err(e) => {
                    tracing::warn!("Dropping simulated region: {e}");
                    None
                }
            })
            .collect();
        self.add_page(path, regions);
        self
    }

    #[must_use]
    pub fn with_header_nodes(mut self, nodes: impl IntoIterator<Item = u64>) -> Self {
        self.header_nodes.extend(nodes.into_iter().map(NodeId::new));
        self
    }

    /// Start at `location` without recording a navigation.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self.render_current();
        self
    }

    pub fn add_page(&mut self, path: &str, regions: Vec<(SectionId, VerticalSpan)>) {
        self.pages.insert(path.to_string(), regions);
        if self.location.path() == path {
            self.render_current();
        }
    }

    // ------------------------------------------------------------------
    // User input
    // ------------------------------------------------------------------

    /// Scroll the viewport to `offset`, clamped to the document.
    pub fn scroll_to(&mut self, offset: f64) {
        let clamped = offset.clamp(0.0, self.max_scroll());
        if clamped == self.scroll_y {
            return;
        }
        self.scroll_y = clamped;
        for subscription in &self.scroll_listeners {
            self.queue.push(DomEvent::Scroll {
                subscription: *subscription,
            });
        }
        self.refresh_observations();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.scroll_y + delta);
    }

    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height.max(0.0);
        let clamped = self.scroll_y.clamp(0.0, self.max_scroll());
        if clamped == self.scroll_y {
            self.refresh_observations();
        } else {
            self.scroll_to(clamped);
        }
    }

    pub fn pointer_down(&mut self, target: NodeId) {
        for subscription in &self.pointer_listeners {
            self.queue.push(DomEvent::PointerDown {
                subscription: *subscription,
                target,
            });
        }
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn viewport(&self) -> VerticalSpan {
        VerticalSpan::new(self.scroll_y, self.viewport_height)
    }

    /// Locations passed to [`Router::navigate`], oldest first.
    #[must_use]
    pub fn navigations(&self) -> &[Location] {
        &self.navigations
    }

    /// Offsets requested through `scroll_to_region`/`scroll_to_top`.
    #[must_use]
    pub fn programmatic_scrolls(&self) -> &[f64] {
        &self.programmatic_scrolls
    }

    /// Observations plus listeners currently registered.
    #[must_use]
    pub fn live_subscriptions(&self) -> usize {
        self.observations.len() + self.scroll_listeners.len() + self.pointer_listeners.len()
    }

    #[must_use]
    pub fn queued_events(&self) -> usize {
        self.queue.len()
    }

    /// The live observation of `section`'s rendered region.
    #[must_use]
    pub fn observation_of(&self, section: &SectionId) -> Option<SubscriptionId> {
        let region = self.find_region(section)?;
        self.observations
            .iter()
            .find(|(_, obs)| obs.region == region)
            .map(|(subscription, _)| *subscription)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn document_height(&self) -> f64 {
        self.rendered
            .iter()
            .map(|r| r.span.bottom())
            .fold(0.0, f64::max)
    }

    fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    fn render_current(&mut self) {
        let layout = self
            .pages
            .get(self.location.path())
            .cloned()
            .unwrap_or_default();
        let rendered: Vec<RenderedRegion> = layout
            .into_iter()
            .map(|(section, span)| RenderedRegion {
                id: RegionId::new(self.allocate()),
                section,
                span,
            })
            .collect();
        self.rendered = rendered;
        let clamped = self.scroll_y.clamp(0.0, self.max_scroll());
        if clamped == self.scroll_y {
            self.refresh_observations();
        } else {
            self.scroll_to(clamped);
        }
    }

    fn read(&self, observation: &Observation) -> (Reading, f64) {
        let ratio = self
            .rendered
            .iter()
            .find(|r| r.id == observation.region)
            .and_then(|r| {
                observation
                    .options
                    .band
                    .intersection_ratio(r.span, self.viewport())
            });
        match ratio {
            Some(ratio) => (
                Reading {
                    intersecting: true,
                    bucket: observation.options.thresholds.bucket(ratio),
                },
                ratio,
            ),
            None => (
                Reading {
                    intersecting: false,
                    bucket: 0,
                },
                0.0,
            ),
        }
    }

    fn refresh_observations(&mut self) {
        let mut fired = Vec::new();
        for (subscription, observation) in &self.observations {
            let (reading, ratio) = self.read(observation);
            if observation.last != Some(reading) {
                fired.push((*subscription, reading, ratio));
            }
        }
        for (subscription, reading, ratio) in fired {
            if let Some(observation) = self.observations.get_mut(&subscription) {
                observation.last = Some(reading);
            }
            self.queue.push(DomEvent::Intersection {
                subscription,
                entry: IntersectionEntry {
                    is_intersecting: reading.intersecting,
                    ratio,
                },
            });
        }
    }
}

impl Document for SimulatedDocument {
    fn find_region(&self, section: &SectionId) -> Option<RegionId> {
        self.rendered
            .iter()
            .find(|r| &r.section == section)
            .map(|r| r.id)
    }

    fn observe(&mut self, region: RegionId, options: &ObserveOptions) -> SubscriptionId {
        let subscription = SubscriptionId::new(self.allocate());
        self.observations.insert(
            subscription,
            Observation {
                region,
                options: options.clone(),
                last: None,
            },
        );
        self.refresh_observations();
        subscription
    }

    fn unobserve(&mut self, subscription: SubscriptionId) {
        self.observations.remove(&subscription);
    }

    fn on_scroll(&mut self) -> SubscriptionId {
        let subscription = SubscriptionId::new(self.allocate());
        self.scroll_listeners.push(subscription);
        subscription
    }

    fn on_pointer_down(&mut self) -> SubscriptionId {
        let subscription = SubscriptionId::new(self.allocate());
        self.pointer_listeners.push(subscription);
        subscription
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.scroll_listeners.retain(|s| *s != subscription);
        self.pointer_listeners.retain(|s| *s != subscription);
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to_region(&mut self, region: RegionId) {
        let Some(top) = self
            .rendered
            .iter()
            .find(|r| r.id == region)
            .map(|r| r.span.top)
        else {
            return;
        };
        self.programmatic_scrolls.push(top);
        self.scroll_to(top);
    }

    fn scroll_to_top(&mut self) {
        self.programmatic_scrolls.push(0.0);
        self.scroll_to(0.0);
    }

    fn header_contains(&self, target: NodeId) -> bool {
        self.header_nodes.contains(&target)
    }

    fn drain_events(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.queue)
    }
}

impl Router for SimulatedDocument {
    fn navigate(&mut self, location: &Location) {
        self.navigations.push(location.clone());
        let path_changed = self.location.path() != location.path();
        self.location = location.clone();
        if path_changed {
            self.render_current();
        }
    }
}
