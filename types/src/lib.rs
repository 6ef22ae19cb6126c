//! Core domain types for navspy.
//!
//! This crate contains pure domain types with no IO and no host bindings.
//! Everything here can be used from any layer: the tracking core, the
//! configuration loader, and the replay binary.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod geometry;
mod ids;
mod links;
mod settings;
mod timer;
mod visibility;

pub use geometry::{ActivationBand, ThresholdError, VerticalSpan, VisibilityThresholds};
pub use ids::{NodeId, RegionId, SubscriptionId};
pub use links::{LinkTarget, LinkView, NavLink, NavLinks};
pub use settings::{
    DeferredScrollOptions, NavSettings, ResolverOptions, ScrollTrigger, SettingsError,
    TrackerOptions,
};
pub use timer::DelayTimer;
pub use visibility::VisibilitySet;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Section identifiers
// ============================================================================

/// Identifier of one scrollable region of the single-page layout.
///
/// Non-empty, lowercase ASCII letters, digits and `-` only. The same string is
/// used as the region's element id and as the `#fragment` of in-page links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionIdError {
    #[error("section id must not be empty")]
    Empty,
    #[error("section id `{id}` contains invalid character {ch:?}")]
    InvalidChar { id: String, ch: char },
}

impl SectionId {
    pub fn new(value: impl Into<String>) -> Result<Self, SectionIdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SectionIdError::Empty);
        }
        if let Some(ch) = value
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SectionIdError::InvalidChar { id: value, ch });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `#fragment` form used by in-page anchors.
    #[must_use]
    pub fn fragment(&self) -> String {
        format!("#{}", self.0)
    }
}

impl TryFrom<String> for SectionId {
    type Error = SectionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SectionId {
    type Error = SectionIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SectionId> for String {
    fn from(value: SectionId) -> Self {
        value.0
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Section catalog
// ============================================================================

/// A declared section: its id plus the label the view layer shows for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub label: String,
}

impl Section {
    #[must_use]
    pub fn new(id: SectionId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("at least one section must be declared")]
    Empty,
    #[error("section `{0}` is declared more than once")]
    Duplicate(SectionId),
}

/// The fixed, ordered list of sections declared at startup.
///
/// The first entry is the home section: the resolver falls back to it near the
/// top of the document. The catalog is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCatalog {
    sections: Vec<Section>,
}

impl SectionCatalog {
    pub fn new(sections: Vec<Section>) -> Result<Self, CatalogError> {
        if sections.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, section) in sections.iter().enumerate() {
            if sections[..index].iter().any(|s| s.id == section.id) {
                return Err(CatalogError::Duplicate(section.id.clone()));
            }
        }
        Ok(Self { sections })
    }

    #[must_use]
    pub fn home(&self) -> &SectionId {
        &self.sections[0].id
    }

    #[must_use]
    pub fn contains(&self, id: &SectionId) -> bool {
        self.sections.iter().any(|s| &s.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(|s| &s.id)
    }
}

impl Default for SectionCatalog {
    fn default() -> Self {
        const DEFAULTS: [(&str, &str); 6] = [
            ("home", "Home"),
            ("therapies", "Therapies"),
            ("why-us", "Why Choose Us"),
            ("appointment", "Appointment"),
            ("about", "About"),
            ("contact", "Contact"),
        ];
        Self {
            sections: DEFAULTS
                .iter()
                .map(|(id, label)| Section::new(SectionId(String::from(*id)), *label))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SectionCatalog {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

// ============================================================================
// Active section & menu state
// ============================================================================

/// The single section considered current for nav-link highlighting.
///
/// `Unmeasured` is the "no active section" sentinel. It is only observable
/// outside the single-page context, or before anything was resolved there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveSection {
    #[default]
    Unmeasured,
    Section(SectionId),
}

impl ActiveSection {
    #[must_use]
    pub fn id(&self) -> Option<&SectionId> {
        match self {
            ActiveSection::Unmeasured => None,
            ActiveSection::Section(id) => Some(id),
        }
    }

    #[must_use]
    pub fn is(&self, id: &SectionId) -> bool {
        self.id() == Some(id)
    }

    #[must_use]
    pub fn is_unmeasured(&self) -> bool {
        matches!(self, ActiveSection::Unmeasured)
    }
}

impl fmt::Display for ActiveSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveSection::Unmeasured => f.write_str("none"),
            ActiveSection::Section(id) => write!(f, "{id}"),
        }
    }
}

/// Open/closed state of the collapsible menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, MenuState::Open)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MenuState::Closed => "closed",
            MenuState::Open => "open",
        }
    }
}

// ============================================================================
// Location & page context
// ============================================================================

/// Path of the scrollable single-page layout.
pub const SINGLE_PAGE_PATH: &str = "/";

/// Router-supplied location: path plus optional `#fragment` (without the `#`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    path: String,
    hash: Option<String>,
}

impl Location {
    /// Build a location from a path and an optional fragment.
    ///
    /// An empty path is normalized to `/`. A leading `#` on the fragment is
    /// stripped, and an empty fragment is treated as absent.
    #[must_use]
    pub fn new(path: impl Into<String>, hash: Option<&str>) -> Self {
        let path = path.into();
        let path = if path.is_empty() {
            SINGLE_PAGE_PATH.to_string()
        } else {
            path
        };
        let hash = hash
            .map(|h| h.strip_prefix('#').unwrap_or(h))
            .filter(|h| !h.is_empty())
            .map(str::to_string);
        Self { path, hash }
    }

    /// Parse `"/path#fragment"`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('#') {
            Some((path, hash)) => Self::new(path, Some(hash)),
            None => Self::new(raw, None),
        }
    }

    #[must_use]
    pub fn root() -> Self {
        Self::new(SINGLE_PAGE_PATH, None)
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    #[must_use]
    pub fn context(&self) -> PageContext {
        PageContext::from_path(&self.path)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hash {
            Some(hash) => write!(f, "{}#{hash}", self.path),
            None => f.write_str(&self.path),
        }
    }
}

/// Either the scrollable single-page layout or a standalone routed page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageContext {
    SinglePage,
    Standalone(String),
}

impl PageContext {
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path == SINGLE_PAGE_PATH || path.is_empty() {
            PageContext::SinglePage
        } else {
            PageContext::Standalone(path.to_string())
        }
    }

    #[must_use]
    pub fn is_single_page(&self) -> bool {
        matches!(self, PageContext::SinglePage)
    }
}

impl fmt::Display for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageContext::SinglePage => f.write_str("single-page"),
            PageContext::Standalone(path) => write!(f, "standalone({path})"),
        }
    }
}
