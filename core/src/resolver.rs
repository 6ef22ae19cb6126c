//! Active Section Resolver.
//!
//! Rules, in order:
//!
//! 1. Near the top and `home` is visible: `home`. Several sections can
//!    register as visible while the page is actually at the top.
//! 2. Anything visible: the section that most recently became visible.
//! 3. Nothing visible and near the top: `home`.
//! 4. Otherwise keep the previous value. Observation is noisy at document
//!    extremities and during fast scrolls, so the value never drops back to
//!    "no section" once set.

use navspy_types::{ActiveSection, ResolverOptions, SectionId, VisibilitySet};

/// Which rule produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    TopOverride,
    MostRecent,
    EmptyAtTop,
    Retained,
}

#[derive(Debug, Clone)]
pub struct ActiveSectionResolver {
    current: ActiveSection,
    home: SectionId,
    options: ResolverOptions,
}

impl ActiveSectionResolver {
    /// Resolver for the single-page context: starts at `home`.
    #[must_use]
    pub fn single_page(home: SectionId, options: ResolverOptions) -> Self {
        Self {
            current: ActiveSection::Section(home.clone()),
            home,
            options,
        }
    }

    /// Resolver for a header mounted on a standalone page.
    #[must_use]
    pub fn standalone(home: SectionId, options: ResolverOptions) -> Self {
        Self {
            current: ActiveSection::Unmeasured,
            home,
            options,
        }
    }

    #[must_use]
    pub fn current(&self) -> &ActiveSection {
        &self.current
    }

    /// The single-page layout was entered. An unmeasured value becomes
    /// `home`; an established value is kept until the next observation.
    pub fn enter_single_page(&mut self) -> Option<&ActiveSection> {
        if !self.current.is_unmeasured() {
            return None;
        }
        self.current = ActiveSection::Section(self.home.clone());
        Some(&self.current)
    }

    /// Pick the rule that applies to `visible` at `scroll_offset`.
    #[must_use]
    pub fn rule_for(&self, visible: &VisibilitySet, scroll_offset: f64) -> ResolutionRule {
        let at_top = scroll_offset < self.options.top_threshold_px;
        if at_top && visible.contains(&self.home) {
            ResolutionRule::TopOverride
        } else if !visible.is_empty() {
            ResolutionRule::MostRecent
        } else if at_top {
            ResolutionRule::EmptyAtTop
        } else {
            ResolutionRule::Retained
        }
    }

    /// Re-evaluate. Returns the new value when it changed.
    pub fn resolve(
        &mut self,
        visible: &VisibilitySet,
        scroll_offset: f64,
    ) -> Option<&ActiveSection> {
        let rule = self.rule_for(visible, scroll_offset);
        let next = match rule {
            ResolutionRule::TopOverride | ResolutionRule::EmptyAtTop => self.home.clone(),
            ResolutionRule::MostRecent => match visible.newest() {
                Some(newest) => newest.clone(),
                None => return None,
            },
            ResolutionRule::Retained => return None,
        };

        if self.current.is(&next) {
            return None;
        }
        tracing::debug!(section = %next, ?rule, scroll_offset, "Active section changed");
        self.current = ActiveSection::Section(next);
        Some(&self.current)
    }
}
