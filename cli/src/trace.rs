//! Recorded sessions and their replay.
//!
//! A trace describes the page layouts, where the session starts, and the
//! ordered user/host steps. Replay drives a [`Navigator`] over a
//! [`SimulatedDocument`] and captures the state after every step.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use navspy_core::{
    DeferredOutcome, NavChange, NavSnapshot, Navigator, Router, Selection, SimulatedDocument,
};
use navspy_types::{Location, NavSettings, NodeId, SectionId, VerticalSpan};

fn default_viewport_height() -> f64 {
    800.0
}

fn default_start() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    /// Nodes that belong to the header, for outside-click detection.
    #[serde(default)]
    pub header_nodes: Vec<u64>,
    /// Regions rendered per path.
    #[serde(default)]
    pub pages: BTreeMap<String, Vec<RegionSpec>>,
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionSpec {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Scroll { to: f64 },
    ScrollBy { delta: f64 },
    Resize { height: f64 },
    PointerDown { node: u64 },
    ToggleMenu,
    CloseMenu,
    SelectSection { section: SectionId },
    SelectRoute { path: String },
    ActivateLink { index: usize },
    Tick { ms: u64 },
    ContentReady,
    /// Location change the header did not initiate (address bar, back button).
    Navigate { location: String },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Scroll { to } => write!(f, "scroll {to}"),
            Step::ScrollBy { delta } => write!(f, "scroll_by {delta}"),
            Step::Resize { height } => write!(f, "resize {height}"),
            Step::PointerDown { node } => write!(f, "pointer_down {node}"),
            Step::ToggleMenu => f.write_str("toggle_menu"),
            Step::CloseMenu => f.write_str("close_menu"),
            Step::SelectSection { section } => write!(f, "select_section {section}"),
            Step::SelectRoute { path } => write!(f, "select_route {path}"),
            Step::ActivateLink { index } => write!(f, "activate_link {index}"),
            Step::Tick { ms } => write!(f, "tick {ms}ms"),
            Step::ContentReady => f.write_str("content_ready"),
            Step::Navigate { location } => write!(f, "navigate {location}"),
        }
    }
}

/// State after one replayed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
    pub state: NavSnapshot,
    pub changes: Vec<NavChange>,
}

impl StepReport {
    fn capture(
        index: usize,
        step: String,
        outcome: Option<&'static str>,
        nav: &mut Navigator<SimulatedDocument>,
    ) -> Self {
        Self {
            index,
            step,
            outcome,
            state: nav.snapshot(),
            changes: nav.drain_changes(),
        }
    }
}

impl Trace {
    /// Build the simulated document this trace starts in.
    #[must_use]
    pub fn document(&self) -> SimulatedDocument {
        let mut doc = SimulatedDocument::new(self.viewport_height)
            .with_header_nodes(self.header_nodes.iter().copied());
        for (path, regions) in &self.pages {
            doc = doc.with_page(
                path,
                regions
                    .iter()
                    .map(|r| (r.id.as_str(), VerticalSpan::new(r.top, r.height))),
            );
        }
        doc.at(Location::parse(&self.start))
    }
}

/// Replay `trace` from mount to its last step.
#[must_use]
pub fn replay(trace: &Trace, settings: NavSettings) -> Vec<StepReport> {
    let location = Location::parse(&trace.start);
    let mut nav = Navigator::new(trace.document(), settings, location);
    nav.pump();

    let mut reports = Vec::with_capacity(trace.steps.len() + 1);
    reports.push(StepReport::capture(0, "mount".to_string(), None, &mut nav));
    for (i, step) in trace.steps.iter().enumerate() {
        tracing::debug!(index = i + 1, %step, "Replaying step");
        let outcome = apply(&mut nav, step);
        nav.pump();
        reports.push(StepReport::capture(i + 1, step.to_string(), outcome, &mut nav));
    }
    nav.unmount();
    reports
}

fn apply(nav: &mut Navigator<SimulatedDocument>, step: &Step) -> Option<&'static str> {
    match step {
        Step::Scroll { to } => nav.host_mut().scroll_to(*to),
        Step::ScrollBy { delta } => nav.host_mut().scroll_by(*delta),
        Step::Resize { height } => nav.host_mut().resize(*height),
        Step::PointerDown { node } => nav.host_mut().pointer_down(NodeId::new(*node)),
        Step::ToggleMenu => nav.toggle_menu(),
        Step::CloseMenu => nav.close_menu(),
        Step::SelectSection { section } => return Some(nav.select_section(section).as_str()),
        Step::SelectRoute { path } => return Some(nav.select_route(path).as_str()),
        Step::ActivateLink { index } => {
            return Some(nav.activate_link(*index).map_or("no-such-link", Selection::as_str));
        }
        Step::Tick { ms } => {
            return nav
                .tick(Duration::from_millis(*ms))
                .map(DeferredOutcome::as_str);
        }
        Step::ContentReady => return nav.content_ready().map(DeferredOutcome::as_str),
        Step::Navigate { location } => {
            let location = Location::parse(location);
            nav.host_mut().navigate(&location);
            nav.set_location(location);
        }
    }
    None
}
