//! Validated runtime settings for the tracking core.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ActivationBand, CatalogError, LinkTarget, NavLinks, SINGLE_PAGE_PATH, SectionCatalog,
    SectionId, SectionIdError, ThresholdError, VisibilityThresholds,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error(transparent)]
    SectionId(#[from] SectionIdError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Geometry(#[from] ThresholdError),
    #[error("link `{label}` points at undeclared section `{section}`")]
    UnknownLinkSection { label: String, section: SectionId },
    #[error("link `{label}` has invalid route `{route}`: routes start with `/` and are not `/`")]
    InvalidRoute { label: String, route: String },
    #[error("top threshold {0} must be finite and non-negative")]
    TopThreshold(f64),
}

/// How the Visibility Tracker asks the host to observe regions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackerOptions {
    pub band: ActivationBand,
    pub thresholds: VisibilityThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverOptions {
    /// Scroll offsets strictly below this count as "at the top".
    pub top_threshold_px: f64,
}

impl ResolverOptions {
    pub fn new(top_threshold_px: f64) -> Result<Self, SettingsError> {
        if !(top_threshold_px.is_finite() && top_threshold_px >= 0.0) {
            return Err(SettingsError::TopThreshold(top_threshold_px));
        }
        Ok(Self { top_threshold_px })
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            top_threshold_px: 100.0,
        }
    }
}

/// What releases a deferred scroll after a context switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollTrigger {
    /// Fire once the fixed delay has elapsed.
    #[default]
    Delay,
    /// Fire when the host reports the new content is rendered, or when the
    /// delay elapses, whichever comes first.
    ContentReady,
}

impl ScrollTrigger {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScrollTrigger::Delay => "delay",
            ScrollTrigger::ContentReady => "content-ready",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredScrollOptions {
    pub delay: Duration,
    pub trigger: ScrollTrigger,
}

impl Default for DeferredScrollOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(100),
            trigger: ScrollTrigger::Delay,
        }
    }
}

/// Everything a navigator needs, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NavSettings {
    catalog: SectionCatalog,
    links: NavLinks,
    pub tracker: TrackerOptions,
    pub resolver: ResolverOptions,
    pub deferred_scroll: DeferredScrollOptions,
}

impl NavSettings {
    /// Pair a catalog with a link table, checking every link resolves.
    pub fn new(catalog: SectionCatalog, links: NavLinks) -> Result<Self, SettingsError> {
        for link in links.iter() {
            match &link.target {
                LinkTarget::Section(id) if !catalog.contains(id) => {
                    return Err(SettingsError::UnknownLinkSection {
                        label: link.label.clone(),
                        section: id.clone(),
                    });
                }
                LinkTarget::Route(route) if !route.starts_with('/') || route == SINGLE_PAGE_PATH => {
                    return Err(SettingsError::InvalidRoute {
                        label: link.label.clone(),
                        route: route.clone(),
                    });
                }
                _ => {}
            }
        }
        Ok(Self {
            catalog,
            links,
            tracker: TrackerOptions::default(),
            resolver: ResolverOptions::default(),
            deferred_scroll: DeferredScrollOptions::default(),
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn links(&self) -> &NavLinks {
        &self.links
    }
}

impl Default for NavSettings {
    fn default() -> Self {
        let catalog = SectionCatalog::default();
        let links = NavLinks::for_catalog(&catalog);
        Self {
            catalog,
            links,
            tracker: TrackerOptions::default(),
            resolver: ResolverOptions::default(),
            deferred_scroll: DeferredScrollOptions::default(),
        }
    }
}
