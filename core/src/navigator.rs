//! Navigation State Facade.
//!
//! [`Navigator`] is the only surface the view layer talks to. It owns the
//! tracker, resolver, menu machine and deferred scroll, routes host events
//! to whichever of them registered the subscription, and records every
//! observable change in a [`ChangeLog`].

use std::time::Duration;

use serde::Serialize;

use navspy_types::{
    ActiveSection, LinkTarget, LinkView, Location, MenuState, NavSettings, PageContext, SectionId,
    SubscriptionId,
};

use crate::changes::{ChangeLog, NavChange};
use crate::deferred::{DeferredOutcome, DeferredScroll};
use crate::host::{DomEvent, Host};
use crate::menu::{MenuEvent, MenuStateMachine};
use crate::resolver::ActiveSectionResolver;
use crate::tracker::{VisibilityTracker, VisibilityTransition};

/// What a navigation action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Scrolled within the current page.
    Scrolled,
    /// The target region is not rendered; nothing scrolled.
    ScrollSkipped,
    /// Switched to the single-page layout; the scroll is pending.
    Deferred,
    /// Switched page without a follow-up scroll.
    Navigated,
    /// The section is not declared.
    Unknown,
}

impl Selection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Selection::Scrolled => "scrolled",
            Selection::ScrollSkipped => "scroll-skipped",
            Selection::Deferred => "deferred",
            Selection::Navigated => "navigated",
            Selection::Unknown => "unknown",
        }
    }
}

/// Point-in-time view of the navigator, for logging and replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavSnapshot {
    pub location: Location,
    pub context: PageContext,
    pub active: ActiveSection,
    pub menu: MenuState,
    pub visible: Vec<SectionId>,
    pub scroll_offset: f64,
    pub pending_scroll: Option<SectionId>,
    pub revision: u64,
}

pub struct Navigator<H: Host> {
    host: H,
    settings: NavSettings,
    location: Location,
    tracker: Option<VisibilityTracker>,
    resolver: ActiveSectionResolver,
    menu: MenuStateMachine,
    pointer_listener: Option<SubscriptionId>,
    deferred: DeferredScroll,
    changes: ChangeLog,
}

impl<H: Host> Navigator<H> {
    /// Mount the header at `location`.
    pub fn new(mut host: H, settings: NavSettings, location: Location) -> Self {
        let pointer_listener = host.on_pointer_down();
        let home = settings.catalog().home().clone();
        let resolver = if location.context().is_single_page() {
            ActiveSectionResolver::single_page(home, settings.resolver)
        } else {
            ActiveSectionResolver::standalone(home, settings.resolver)
        };
        let tracker = location
            .context()
            .is_single_page()
            .then(|| VisibilityTracker::install(&mut host, settings.catalog(), &settings.tracker));
        let deferred = DeferredScroll::new(settings.deferred_scroll);

        tracing::debug!(%location, "Navigator mounted");
        Self {
            host,
            settings,
            location,
            tracker,
            resolver,
            menu: MenuStateMachine::new(),
            pointer_listener: Some(pointer_listener),
            deferred,
            changes: ChangeLog::default(),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    #[must_use]
    pub fn active_section(&self) -> &ActiveSection {
        self.resolver.current()
    }

    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn context(&self) -> PageContext {
        self.location.context()
    }

    #[must_use]
    pub fn settings(&self) -> &NavSettings {
        &self.settings
    }

    /// Sections currently in view; empty outside the single-page layout.
    #[must_use]
    pub fn visible_sections(&self) -> Vec<SectionId> {
        self.tracker
            .as_ref()
            .map(|t| t.visible().iter().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn pending_scroll(&self) -> Option<&SectionId> {
        self.deferred.pending_target()
    }

    #[must_use]
    pub fn link_views(&self) -> Vec<LinkView> {
        self.settings.links().views(
            &self.location,
            self.resolver.current(),
            self.settings.catalog().home(),
        )
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.changes.revision()
    }

    /// Take every change emitted since the last drain.
    pub fn drain_changes(&mut self) -> Vec<NavChange> {
        self.changes.drain()
    }

    #[must_use]
    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            location: self.location.clone(),
            context: self.context(),
            active: self.resolver.current().clone(),
            menu: self.menu.state(),
            visible: self.visible_sections(),
            scroll_offset: self.host.scroll_offset(),
            pending_scroll: self.deferred.pending_target().cloned(),
            revision: self.changes.revision(),
        }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ------------------------------------------------------------------
    // Menu actions
    // ------------------------------------------------------------------

    pub fn toggle_menu(&mut self) {
        self.apply_menu(MenuEvent::Toggle);
    }

    pub fn close_menu(&mut self) {
        self.apply_menu(MenuEvent::Close);
    }

    fn apply_menu(&mut self, event: MenuEvent) {
        if let Some(state) = self.menu.apply(event) {
            self.changes.push(NavChange::Menu { state });
        }
    }

    // ------------------------------------------------------------------
    // Navigation actions
    // ------------------------------------------------------------------

    /// In-page anchor navigation to `section`.
    ///
    /// Closes the menu. On the single-page layout scrolls right away (home
    /// scrolls to the document top). From a standalone page, switches to the
    /// single-page layout first and parks the scroll until the new content
    /// had time to render.
    pub fn select_section(&mut self, section: &SectionId) -> Selection {
        if !self.settings.catalog().contains(section) {
            tracing::warn!(%section, "Ignoring selection of undeclared section");
            return Selection::Unknown;
        }
        self.apply_menu(MenuEvent::NavigationSelected);

        let is_home = section == self.settings.catalog().home();
        match self.context() {
            PageContext::SinglePage if is_home => {
                self.host.scroll_to_top();
                Selection::Scrolled
            }
            PageContext::SinglePage => match self.host.find_region(section) {
                Some(region) => {
                    self.host.scroll_to_region(region);
                    Selection::Scrolled
                }
                None => {
                    tracing::debug!(%section, "Selected section not rendered; not scrolling");
                    Selection::ScrollSkipped
                }
            },
            PageContext::Standalone(_) => {
                let root = Location::root();
                self.host.navigate(&root);
                self.enter_location(root);
                if is_home {
                    Selection::Navigated
                } else {
                    self.deferred.schedule(section.clone());
                    Selection::Deferred
                }
            }
        }
    }

    /// Navigate to a standalone page and start it at the top.
    pub fn select_route(&mut self, path: &str) -> Selection {
        let location = Location::parse(path);
        if location.context().is_single_page() {
            let home = self.settings.catalog().home().clone();
            return self.select_section(&home);
        }
        self.apply_menu(MenuEvent::NavigationSelected);
        self.host.scroll_to_top();
        self.host.navigate(&location);
        self.enter_location(location);
        Selection::Navigated
    }

    /// Activate the link at `index` of the link table.
    pub fn activate_link(&mut self, index: usize) -> Option<Selection> {
        let target = self.settings.links().get(index)?.target.clone();
        Some(match target {
            LinkTarget::Section(id) => self.select_section(&id),
            LinkTarget::Route(path) => self.select_route(&path),
        })
    }

    /// Router notification that the location changed.
    ///
    /// A new path switches context. A new fragment on the same path only
    /// affects link highlighting.
    pub fn set_location(&mut self, location: Location) {
        if location == self.location {
            return;
        }
        self.enter_location(location);
    }

    fn enter_location(&mut self, location: Location) {
        if location == self.location {
            return;
        }
        let path_changed = location.path() != self.location.path();
        self.location = location;
        self.changes.push(NavChange::Location {
            location: self.location.clone(),
        });
        if path_changed {
            self.switch_context();
        }
    }

    /// Tear down the old context's tracker and install the new one.
    ///
    /// The active section survives the switch. Once unmounted, nothing is
    /// installed again.
    fn switch_context(&mut self) {
        if let Some(tracker) = self.tracker.take() {
            tracker.teardown(&mut self.host);
        }

        let context = self.location.context();
        tracing::debug!(%context, "Page context switched");
        if !context.is_single_page() {
            return;
        }
        if let Some(active) = self.resolver.enter_single_page() {
            self.changes.push(NavChange::ActiveSection {
                section: active.clone(),
            });
        }
        if !self.is_mounted() {
            tracing::trace!("Navigator unmounted; not observing sections");
            return;
        }
        self.tracker = Some(VisibilityTracker::install(
            &mut self.host,
            self.settings.catalog(),
            &self.settings.tracker,
        ));
    }

    // ------------------------------------------------------------------
    // Host events
    // ------------------------------------------------------------------

    /// Route one host callback to the component that registered it.
    ///
    /// Events for subscriptions that are no longer live are dropped.
    pub fn dispatch(&mut self, event: DomEvent) {
        match event {
            DomEvent::Intersection {
                subscription,
                entry,
            } => {
                let Some(tracker) = self.tracker.as_mut() else {
                    tracing::trace!(%subscription, "Intersection outside single-page layout");
                    return;
                };
                match tracker.apply(subscription, entry) {
                    Some(VisibilityTransition::Added(section)) => {
                        tracing::trace!(%section, "Section entered view");
                        self.resolve();
                    }
                    Some(VisibilityTransition::Removed(section)) => {
                        tracing::trace!(%section, "Section left view");
                        self.resolve();
                    }
                    None => {}
                }
            }
            DomEvent::Scroll { subscription } => {
                if self
                    .tracker
                    .as_ref()
                    .is_some_and(|t| t.owns_scroll_listener(subscription))
                {
                    self.resolve();
                } else {
                    tracing::trace!(%subscription, "Stale scroll listener");
                }
            }
            DomEvent::PointerDown {
                subscription,
                target,
            } => {
                if self.pointer_listener != Some(subscription) {
                    tracing::trace!(%subscription, "Stale pointer listener");
                    return;
                }
                let inside_header = self.host.header_contains(target);
                self.apply_menu(MenuEvent::PointerDown { inside_header });
            }
        }
    }

    /// Drain the host's queued callbacks and dispatch them in order.
    /// Returns how many were dispatched.
    pub fn pump(&mut self) -> usize {
        let mut dispatched = 0;
        loop {
            let events = self.host.drain_events();
            if events.is_empty() {
                return dispatched;
            }
            dispatched += events.len();
            for event in events {
                self.dispatch(event);
            }
        }
    }

    fn resolve(&mut self) {
        let Some(tracker) = self.tracker.as_ref() else {
            return;
        };
        let scroll_offset = self.host.scroll_offset();
        if let Some(active) = self.resolver.resolve(tracker.visible(), scroll_offset) {
            self.changes.push(NavChange::ActiveSection {
                section: active.clone(),
            });
        }
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Advance host time; releases a parked scroll once its delay elapsed.
    pub fn tick(&mut self, delta: Duration) -> Option<DeferredOutcome> {
        self.deferred.advance(delta, &mut self.host)
    }

    /// Host signal that the current page's content finished rendering.
    pub fn content_ready(&mut self) -> Option<DeferredOutcome> {
        self.deferred.content_ready(&mut self.host)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Whether the header still holds its host registrations.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.pointer_listener.is_some()
    }

    /// Release every host registration. Idempotent; also runs on drop.
    pub fn unmount(&mut self) {
        if let Some(tracker) = self.tracker.take() {
            tracker.teardown(&mut self.host);
        }
        if let Some(listener) = self.pointer_listener.take() {
            self.host.unsubscribe(listener);
            tracing::debug!("Navigator unmounted");
        }
    }
}

impl<H: Host> Drop for Navigator<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
