//! Active-section tracking on the single-page layout.

use navspy_core::{Document, DomEvent, IntersectionEntry, NavChange, Navigator, SimulatedDocument};
use navspy_types::{Location, NavSettings, VerticalSpan};

use crate::common::{SECTIONS, id, mount, scroll_to, section, top_of};

fn enter(nav: &mut Navigator<SimulatedDocument>, raw: &str) {
    let subscription = nav.host().observation_of(&id(raw)).unwrap();
    nav.dispatch(DomEvent::Intersection {
        subscription,
        entry: IntersectionEntry::entering(0.3),
    });
}

fn leave(nav: &mut Navigator<SimulatedDocument>, raw: &str) {
    let subscription = nav.host().observation_of(&id(raw)).unwrap();
    nav.dispatch(DomEvent::Intersection {
        subscription,
        entry: IntersectionEntry::leaving(),
    });
}

#[test]
fn active_section_is_always_declared() {
    let mut nav = mount("/");
    let mut offsets: Vec<f64> = (0..60).map(|i| f64::from(i) * 97.0).collect();
    offsets.extend((0..60).rev().map(|i| f64::from(i) * 131.0));
    offsets.extend([0.0, 5_200.0, 10.0, 2_999.0, 4_400.0, 0.0]);

    for offset in offsets {
        scroll_to(&mut nav, offset);
        let active = nav.active_section().id().unwrap();
        assert!(
            SECTIONS.contains(&active.as_str()),
            "undeclared active section {active} at {offset}"
        );
    }
}

fn assert_declared(nav: &Navigator<SimulatedDocument>) {
    let active = nav.active_section().id().unwrap();
    assert!(SECTIONS.contains(&active.as_str()), "undeclared {active}");
}

#[test]
fn direct_enter_leave_sequences_keep_a_declared_section() {
    let mut nav = mount("/");

    // At the top.
    for (raw, entering) in [
        ("home", false),
        ("therapies", true),
        ("why-us", true),
        ("therapies", false),
        ("why-us", false),
    ] {
        if entering {
            enter(&mut nav, raw);
        } else {
            leave(&mut nav, raw);
        }
        assert_declared(&nav);
    }
    assert!(nav.visible_sections().is_empty());
    assert_eq!(nav.active_section(), &section("home"));

    // Below the top.
    scroll_to(&mut nav, top_of(3));
    leave(&mut nav, "appointment");
    assert_eq!(nav.active_section(), &section("appointment"));
    for raw in SECTIONS {
        enter(&mut nav, raw);
        assert_declared(&nav);
    }
    for raw in SECTIONS {
        leave(&mut nav, raw);
        assert_declared(&nav);
    }
    assert!(nav.visible_sections().is_empty());
    assert_eq!(nav.active_section(), &section("contact"));
}

#[test]
fn every_section_becomes_active_when_scrolled_to() {
    let mut nav = mount("/");
    for (i, raw) in SECTIONS.iter().enumerate().skip(1) {
        scroll_to(&mut nav, top_of(i));
        assert_eq!(nav.active_section(), &section(raw));
    }
}

#[test]
fn home_overrides_newer_sections_near_top() {
    // Short sections: three of them fit in the activation band at once.
    let doc = SimulatedDocument::new(800.0).with_page(
        "/",
        SECTIONS
            .iter()
            .enumerate()
            .map(|(i, raw)| (*raw, VerticalSpan::new(i as f64 * 300.0, 300.0))),
    );
    let mut nav = Navigator::new(doc, NavSettings::default(), Location::root());
    nav.pump();

    assert_eq!(
        nav.visible_sections(),
        [id("home"), id("therapies"), id("why-us")]
    );
    assert_eq!(nav.active_section(), &section("home"));

    scroll_to(&mut nav, 90.0);
    assert_eq!(nav.active_section(), &section("home"));

    // Past the top threshold: recency takes over.
    scroll_to(&mut nav, 150.0);
    assert_eq!(nav.active_section(), &section("appointment"));
}

#[test]
fn most_recently_added_wins_over_document_order() {
    let mut nav = mount("/");
    scroll_to(&mut nav, top_of(3));
    assert_eq!(nav.active_section(), &section("appointment"));

    enter(&mut nav, "why-us");
    assert_eq!(nav.active_section(), &section("why-us"));
    enter(&mut nav, "therapies");
    assert_eq!(nav.active_section(), &section("therapies"));
}

#[test]
fn removing_newest_falls_back_to_next_newest() {
    let mut nav = mount("/");
    scroll_to(&mut nav, top_of(3));
    enter(&mut nav, "why-us");
    enter(&mut nav, "therapies");

    leave(&mut nav, "therapies");
    assert_eq!(nav.active_section(), &section("why-us"));
}

#[test]
fn empty_visibility_below_top_retains_previous() {
    let mut nav = mount("/");
    scroll_to(&mut nav, top_of(4));
    assert_eq!(nav.active_section(), &section("about"));
    nav.drain_changes();

    leave(&mut nav, "about");
    assert!(nav.visible_sections().is_empty());
    assert_eq!(nav.active_section(), &section("about"));
    assert!(nav.drain_changes().is_empty());
}

#[test]
fn bottom_of_document_selects_last_section() {
    let mut nav = mount("/");
    scroll_to(&mut nav, 100_000.0);
    assert_eq!(nav.host().scroll_offset(), 5_200.0);
    assert_eq!(nav.active_section(), &section("contact"));
}

#[test]
fn only_changes_are_emitted() {
    let mut nav = mount("/");
    scroll_to(&mut nav, 2_100.0);
    scroll_to(&mut nav, 2_150.0);
    scroll_to(&mut nav, 2_200.0);
    assert_eq!(
        nav.drain_changes(),
        [NavChange::ActiveSection {
            section: section("why-us")
        }]
    );
}

#[test]
fn missing_regions_are_never_observed() {
    let doc = SimulatedDocument::new(800.0).with_page(
        "/",
        [
            ("home", VerticalSpan::new(0.0, 1000.0)),
            ("about", VerticalSpan::new(1000.0, 1000.0)),
        ],
    );
    let mut nav = Navigator::new(doc, NavSettings::default(), Location::root());
    nav.pump();
    // Two observations, the scroll listener, the pointer listener.
    assert_eq!(nav.host().live_subscriptions(), 4);

    scroll_to(&mut nav, 1_200.0);
    assert_eq!(nav.active_section(), &section("about"));
}

#[test]
fn shrinking_viewport_reevaluates() {
    let mut nav = mount("/");
    scroll_to(&mut nav, 600.0);
    assert_eq!(nav.active_section(), &section("therapies"));

    // The band now ends at 885: therapies drops out, home remains.
    nav.host_mut().resize(300.0);
    nav.pump();
    assert_eq!(nav.visible_sections(), [id("home")]);
    assert_eq!(nav.active_section(), &section("home"));
}
