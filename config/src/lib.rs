//! Configuration loading for navspy.
//!
//! Every table is optional; whatever is left out keeps the built-in site
//! layout and tuning. [`NavConfig::into_settings`] turns the raw file into
//! validated [`NavSettings`].

use serde::Deserialize;
use std::{
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use navspy_types::{
    ActivationBand, DeferredScrollOptions, NavLink, NavLinks, NavSettings, ResolverOptions,
    ScrollTrigger, Section, SectionCatalog, SectionId, SettingsError, TrackerOptions,
    VisibilityThresholds,
};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "NAVSPY_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
    /// Link table. Left empty, links are derived from the sections.
    #[serde(default)]
    pub links: Vec<LinkConfig>,
    pub tracker: Option<TrackerConfig>,
    pub resolver: Option<ResolverConfig>,
    pub deferred_scroll: Option<DeferredScrollConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub label: String,
}

/// One header link; exactly one of `section` or `route` must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    pub label: String,
    pub section: Option<String>,
    pub route: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackerConfig {
    /// Fraction of the viewport height trimmed from the top. Default: 0.05.
    pub top_inset: Option<f64>,
    /// Fraction of the viewport height trimmed from the bottom. Default: 0.05.
    pub bottom_inset: Option<f64>,
    /// Visible ratios at which the host re-reports a region.
    pub thresholds: Option<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResolverConfig {
    /// Scroll offset below which the page counts as "at the top". Default: 100.
    pub top_threshold_px: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeferredScrollConfig {
    pub delay_ms: Option<u64>,
    pub trigger: Option<ScrollTrigger>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("link `{label}` needs exactly one of `section` or `route`")]
    LinkTarget { label: String },
    #[error(transparent)]
    Invalid(#[from] SettingsError),
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path.as_path()),
            ConfigError::LinkTarget { .. } | ConfigError::Invalid(_) => None,
        }
    }
}

impl NavConfig {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse the file at `path`. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| {
            tracing::warn!("Failed to parse config at {}: {source}", path.display());
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Load the default config file, if there is one.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!("No config at {}; using defaults", path.display());
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Validate into runtime settings, filling gaps with defaults.
    pub fn into_settings(self) -> Result<NavSettings, ConfigError> {
        let catalog = if self.sections.is_empty() {
            SectionCatalog::default()
        } else {
            let sections = self
                .sections
                .into_iter()
                .map(|s| -> Result<Section, SettingsError> {
                    Ok(Section::new(SectionId::new(s.id)?, s.label))
                })
                .collect::<Result<Vec<_>, _>>()?;
            SectionCatalog::new(sections).map_err(SettingsError::from)?
        };

        let links = if self.links.is_empty() {
            NavLinks::for_catalog(&catalog)
        } else {
            NavLinks::new(
                self.links
                    .into_iter()
                    .map(LinkConfig::into_link)
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };

        let mut settings = NavSettings::new(catalog, links)?;
        if let Some(tracker) = self.tracker {
            settings.tracker = tracker.into_options()?;
        }
        if let Some(resolver) = self.resolver
            && let Some(px) = resolver.top_threshold_px
        {
            settings.resolver = ResolverOptions::new(px)?;
        }
        if let Some(deferred) = self.deferred_scroll {
            let defaults = DeferredScrollOptions::default();
            settings.deferred_scroll = DeferredScrollOptions {
                delay: deferred
                    .delay_ms
                    .map_or(defaults.delay, Duration::from_millis),
                trigger: deferred.trigger.unwrap_or(defaults.trigger),
            };
        }
        Ok(settings)
    }
}

impl LinkConfig {
    fn into_link(self) -> Result<NavLink, ConfigError> {
        match (self.section, self.route) {
            (Some(section), None) => Ok(NavLink::section(
                self.label,
                SectionId::new(section).map_err(SettingsError::from)?,
            )),
            (None, Some(route)) => Ok(NavLink::route(self.label, route)),
            _ => Err(ConfigError::LinkTarget { label: self.label }),
        }
    }
}

impl TrackerConfig {
    fn into_options(self) -> Result<TrackerOptions, SettingsError> {
        let defaults = ActivationBand::default();
        let band = ActivationBand::new(
            self.top_inset.unwrap_or(defaults.top_inset()),
            self.bottom_inset.unwrap_or(defaults.bottom_inset()),
        )?;
        let thresholds = match self.thresholds {
            Some(values) => VisibilityThresholds::new(values)?,
            None => VisibilityThresholds::default(),
        };
        Ok(TrackerOptions { band, thresholds })
    }
}

/// `$NAVSPY_CONFIG` when set, otherwise `~/.navspy/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    resolve_path(env::var_os(CONFIG_ENV), dirs::home_dir())
}

fn resolve_path(override_path: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match override_path {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => home.map(|home| home.join(".navspy").join("config.toml")),
    }
}
