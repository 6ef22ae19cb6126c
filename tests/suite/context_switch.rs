//! Switching between the single-page layout and standalone pages.

use std::time::Duration;

use navspy_core::{
    DeferredOutcome, Document, DomEvent, IntersectionEntry, NavChange, Navigator, Router,
    Selection, SimulatedDocument,
};
use navspy_types::{Location, NavSettings, ScrollTrigger, SubscriptionId};

use crate::common::{SECTIONS, id, mount, mount_with, scroll_to, section, top_of};

fn observations(nav: &Navigator<SimulatedDocument>) -> Vec<SubscriptionId> {
    SECTIONS
        .iter()
        .filter_map(|raw| nav.host().observation_of(&id(raw)))
        .collect()
}

#[test]
fn leaving_single_page_releases_every_registration() {
    let mut nav = mount("/");
    assert_eq!(observations(&nav).len(), SECTIONS.len());
    assert_eq!(nav.host().live_subscriptions(), SECTIONS.len() + 2);

    nav.select_route("/hero");
    assert!(observations(&nav).is_empty());
    // Only the outside-click listener survives.
    assert_eq!(nav.host().live_subscriptions(), 1);
}

#[test]
fn returning_installs_fresh_registrations() {
    let mut nav = mount("/");
    let first = observations(&nav);

    nav.select_route("/hero");
    nav.select_section(&id("home"));
    nav.pump();

    let second = observations(&nav);
    assert_eq!(second.len(), SECTIONS.len());
    assert!(second.iter().all(|s| !first.contains(s)));
    assert_eq!(nav.active_section(), &section("home"));
}

#[test]
fn torn_down_callbacks_cannot_mutate_state() {
    let mut nav = mount("/");
    scroll_to(&mut nav, top_of(3));
    let stale = observations(&nav);

    nav.select_route("/hero");
    nav.pump();
    nav.drain_changes();
    let before = nav.snapshot();

    for subscription in stale {
        nav.dispatch(DomEvent::Intersection {
            subscription,
            entry: IntersectionEntry::entering(1.0),
        });
        nav.dispatch(DomEvent::Scroll { subscription });
    }
    assert_eq!(nav.snapshot(), before);
    assert!(nav.drain_changes().is_empty());
}

#[test]
fn callbacks_queued_during_switch_are_dropped() {
    let mut nav = mount("/");
    scroll_to(&mut nav, top_of(3));
    nav.drain_changes();

    // Scrolling to the top and re-rendering both queue callbacks for the old
    // registrations before they are released.
    nav.select_route("/hero");
    assert!(nav.host().queued_events() > 0);
    nav.pump();

    assert_eq!(nav.active_section(), &section("appointment"));
    assert_eq!(
        nav.drain_changes(),
        [NavChange::Location {
            location: Location::parse("/hero")
        }]
    );
}

#[test]
fn standalone_to_standalone_keeps_unmeasured() {
    let mut nav = mount("/hero");
    nav.select_route("/achievements");
    nav.pump();
    assert!(nav.active_section().is_unmeasured());
    assert_eq!(
        nav.drain_changes(),
        [NavChange::Location {
            location: Location::parse("/achievements")
        }]
    );
    assert_eq!(nav.host().live_subscriptions(), 1);
}

#[test]
fn external_navigation_switches_context() {
    let mut nav = mount("/");
    scroll_to(&mut nav, top_of(4));
    nav.host_mut().navigate(&Location::parse("/hero"));
    nav.set_location(Location::parse("/hero"));
    nav.pump();
    assert!(!nav.context().is_single_page());
    assert_eq!(nav.active_section(), &section("about"));

    nav.host_mut().scroll_to(0.0);

    nav.host_mut().navigate(&Location::root());
    nav.set_location(Location::root());
    nav.pump();
    assert_eq!(nav.active_section(), &section("home"));
    assert_eq!(observations(&nav).len(), SECTIONS.len());
}

#[test]
fn same_location_is_a_no_op() {
    let mut nav = mount("/#about");
    let revision = nav.revision();
    nav.set_location(Location::parse("/#about"));
    assert_eq!(nav.revision(), revision);
}

#[test]
fn deferred_scroll_lands_after_delay() {
    let mut nav = mount("/hero");
    assert_eq!(nav.select_section(&id("about")), Selection::Deferred);
    nav.pump();
    assert_eq!(nav.host().scroll_offset(), 0.0);

    assert_eq!(nav.tick(Duration::from_millis(60)), None);
    assert_eq!(
        nav.tick(Duration::from_millis(40)),
        Some(DeferredOutcome::Scrolled)
    );
    nav.pump();
    assert_eq!(nav.host().scroll_offset(), top_of(4));
    assert_eq!(nav.active_section(), &section("about"));
}

#[test]
fn deferred_scroll_is_skipped_when_region_is_gone() {
    let mut nav = mount("/hero");
    nav.select_section(&id("contact"));
    // The user leaves again before the delay elapses.
    nav.select_route("/achievements");

    assert_eq!(
        nav.tick(Duration::from_millis(100)),
        Some(DeferredOutcome::Skipped)
    );
    assert_eq!(nav.host().scroll_offset(), 0.0);
    assert_eq!(nav.pending_scroll(), None);
}

#[test]
fn content_ready_releases_deferred_scroll_early() {
    let mut settings = NavSettings::default();
    settings.deferred_scroll.trigger = ScrollTrigger::ContentReady;
    let mut nav = mount_with("/hero", settings);

    nav.select_section(&id("why-us"));
    assert_eq!(nav.content_ready(), Some(DeferredOutcome::Scrolled));
    nav.pump();
    assert_eq!(nav.active_section(), &section("why-us"));
    assert_eq!(nav.tick(Duration::from_secs(1)), None);
}

#[test]
fn home_link_from_standalone_navigates_without_scroll() {
    let mut nav = mount("/hero");
    assert_eq!(nav.select_section(&id("home")), Selection::Navigated);
    assert_eq!(nav.pending_scroll(), None);
    assert_eq!(nav.host().navigations(), [Location::root()]);
    assert!(nav.context().is_single_page());
}

#[test]
fn standalone_highlighting_follows_location() {
    let nav = mount("/hero#about");
    let highlighted: Vec<_> = nav
        .link_views()
        .into_iter()
        .filter(|v| v.highlighted)
        .map(|v| v.label)
        .collect();
    assert_eq!(highlighted, ["Our Clinic", "About"]);

    let links = nav.link_views();
    assert!(links.iter().all(|v| v.href.starts_with('/')));
}
