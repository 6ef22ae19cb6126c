//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use navspy_core::{Navigator, SimulatedDocument};
use navspy_types::{ActiveSection, Location, NavSettings, SectionId, VerticalSpan};

pub const VIEWPORT: f64 = 800.0;
pub const SECTION_HEIGHT: f64 = 1000.0;
pub const HEADER_NODE: u64 = 1;
pub const OUTSIDE_NODE: u64 = 99;

pub const SECTIONS: [&str; 6] = ["home", "therapies", "why-us", "appointment", "about", "contact"];

pub fn id(raw: &str) -> SectionId {
    SectionId::new(raw).unwrap()
}

pub fn section(raw: &str) -> ActiveSection {
    ActiveSection::Section(id(raw))
}

/// Top offset of the `index`-th section on the single-page layout.
pub fn top_of(index: usize) -> f64 {
    index as f64 * SECTION_HEIGHT
}

/// The default six-section page at `/` plus two standalone pages.
pub fn site() -> SimulatedDocument {
    SimulatedDocument::new(VIEWPORT)
        .with_page(
            "/",
            SECTIONS
                .iter()
                .enumerate()
                .map(|(i, raw)| (*raw, VerticalSpan::new(top_of(i), SECTION_HEIGHT))),
        )
        .with_page("/hero", [("clinic", VerticalSpan::new(0.0, 2400.0))])
        .with_page("/achievements", [("awards", VerticalSpan::new(0.0, 1600.0))])
        .with_header_nodes([HEADER_NODE])
}

/// A mounted navigator with its initial observations already delivered.
pub fn mount(at: &str) -> Navigator<SimulatedDocument> {
    mount_with(at, NavSettings::default())
}

pub fn mount_with(at: &str, settings: NavSettings) -> Navigator<SimulatedDocument> {
    let location = Location::parse(at);
    let mut nav = Navigator::new(site().at(location.clone()), settings, location);
    nav.pump();
    nav.drain_changes();
    nav
}

/// User scroll followed by delivery of the resulting callbacks.
pub fn scroll_to(nav: &mut Navigator<SimulatedDocument>, offset: f64) {
    nav.host_mut().scroll_to(offset);
    nav.pump();
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
