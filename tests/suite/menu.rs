//! Collapsible menu behavior through the navigator.

use navspy_core::{NavChange, Navigator, SimulatedDocument};
use navspy_types::{Location, MenuState, NavSettings, NodeId};

use crate::common::{HEADER_NODE, OUTSIDE_NODE, id, mount, site};

fn click(nav: &mut Navigator<SimulatedDocument>, node: u64) {
    nav.host_mut().pointer_down(NodeId::new(node));
    nav.pump();
}

#[test]
fn toggle_then_outside_click_closes() {
    let mut nav = mount("/");
    nav.toggle_menu();
    assert_eq!(nav.menu_state(), MenuState::Open);
    click(&mut nav, OUTSIDE_NODE);
    assert_eq!(nav.menu_state(), MenuState::Closed);
}

#[test]
fn section_selection_closes_open_menu() {
    let mut nav = mount("/");
    nav.toggle_menu();
    nav.select_section(&id("appointment"));
    assert!(!nav.is_menu_open());
}

#[test]
fn route_selection_closes_open_menu() {
    let mut nav = mount("/");
    nav.toggle_menu();
    nav.select_route("/achievements");
    assert!(!nav.is_menu_open());
}

#[test]
fn close_when_closed_emits_nothing() {
    let mut nav = mount("/");
    let revision = nav.revision();
    nav.close_menu();
    nav.close_menu();
    assert_eq!(nav.menu_state(), MenuState::Closed);
    assert_eq!(nav.revision(), revision);
    assert!(nav.drain_changes().is_empty());
}

#[test]
fn clicks_inside_header_keep_menu_open() {
    let mut nav = mount("/");
    nav.toggle_menu();
    nav.drain_changes();
    click(&mut nav, HEADER_NODE);
    assert!(nav.is_menu_open());
    assert!(nav.drain_changes().is_empty());
}

#[test]
fn clicks_while_closed_are_no_ops() {
    let mut nav = mount("/");
    click(&mut nav, OUTSIDE_NODE);
    click(&mut nav, HEADER_NODE);
    assert!(nav.drain_changes().is_empty());
}

#[test]
fn toggle_twice_emits_both_transitions() {
    let mut nav = mount("/hero");
    nav.toggle_menu();
    nav.toggle_menu();
    assert_eq!(
        nav.drain_changes(),
        [
            NavChange::Menu {
                state: MenuState::Open
            },
            NavChange::Menu {
                state: MenuState::Closed
            },
        ]
    );
}

#[test]
fn unmounted_navigator_stops_listening() {
    let mut nav = mount("/");
    nav.unmount();
    assert_eq!(nav.host().live_subscriptions(), 0);
    nav.host_mut().pointer_down(NodeId::new(OUTSIDE_NODE));
    assert_eq!(nav.host().queued_events(), 0);
}

#[test]
fn unmounted_navigator_does_not_resubscribe() {
    let mut nav = mount("/hero");
    nav.unmount();

    nav.select_section(&id("home"));
    nav.select_route("/achievements");
    nav.pump();
    assert!(!nav.is_mounted());
    assert_eq!(nav.host().live_subscriptions(), 0);
}

#[test]
fn independent_headers_do_not_share_state() {
    let mut first = Navigator::new(site(), NavSettings::default(), Location::root());
    let mut second = Navigator::new(site(), NavSettings::default(), Location::root());
    first.pump();
    second.pump();

    first.toggle_menu();
    assert!(first.is_menu_open());
    assert!(!second.is_menu_open());
}
