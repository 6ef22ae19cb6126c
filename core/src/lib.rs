//! Navigation state for a single-page header.
//!
//! This crate tracks which section of the single-page layout is in view,
//! drives the collapsible menu, and exposes both through [`Navigator`]. It
//! never touches a real document: everything it needs from the host goes
//! through the [`host`] traits, and [`sim::SimulatedDocument`] implements
//! them in-process.

mod changes;
mod deferred;
pub mod host;
mod menu;
mod navigator;
mod resolver;
pub mod sim;
mod tracker;

pub use changes::{ChangeLog, NavChange};
pub use deferred::{DeferredOutcome, DeferredScroll};
pub use host::{DomEvent, Document, Host, IntersectionEntry, ObserveOptions, Router};
pub use menu::{MenuEvent, MenuStateMachine};
pub use navigator::{NavSnapshot, Navigator, Selection};
pub use resolver::{ActiveSectionResolver, ResolutionRule};
pub use sim::SimulatedDocument;
pub use tracker::{VisibilityTracker, VisibilityTransition};
