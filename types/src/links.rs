//! Header navigation links and their highlight rules.

use serde::{Deserialize, Serialize};

use crate::{ActiveSection, Location, PageContext, SINGLE_PAGE_PATH, SectionCatalog, SectionId};

/// Where a header link leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// An in-page section of the single-page layout.
    Section(SectionId),
    /// A standalone routed page, e.g. `/hero`.
    Route(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub target: LinkTarget,
}

impl NavLink {
    #[must_use]
    pub fn section(label: impl Into<String>, id: SectionId) -> Self {
        Self {
            label: label.into(),
            target: LinkTarget::Section(id),
        }
    }

    #[must_use]
    pub fn route(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: LinkTarget::Route(path.into()),
        }
    }
}

/// What the view layer needs to render one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub label: String,
    pub href: String,
    pub highlighted: bool,
}

/// The ordered link table rendered by the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinks {
    links: Vec<NavLink>,
}

impl NavLinks {
    #[must_use]
    pub fn new(links: Vec<NavLink>) -> Self {
        Self { links }
    }

    /// The site's link order: the first two sections, the two standalone
    /// pages, then the remaining sections.
    #[must_use]
    pub fn for_catalog(catalog: &SectionCatalog) -> Self {
        let section_link = |s: &crate::Section| NavLink::section(s.label.clone(), s.id.clone());
        let mut links: Vec<NavLink> = catalog.iter().take(2).map(section_link).collect();
        links.push(NavLink::route("Our Clinic", "/hero"));
        links.push(NavLink::route("Achievements", "/achievements"));
        links.extend(catalog.iter().skip(2).map(section_link));
        Self { links }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&NavLink> {
        self.links.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NavLink> {
        self.links.iter()
    }

    /// Whether `link` renders highlighted.
    ///
    /// On the single-page layout section links follow the active section (the
    /// home link also while nothing is measured). On standalone pages they
    /// follow the location instead: home matches the `/` path, other sections
    /// match the `#fragment`. Route links always match on path.
    #[must_use]
    pub fn highlighted(
        link: &NavLink,
        location: &Location,
        active: &ActiveSection,
        home: &SectionId,
    ) -> bool {
        match (&link.target, location.context()) {
            (LinkTarget::Route(path), _) => location.path() == path,
            (LinkTarget::Section(id), PageContext::SinglePage) => {
                active.is(id) || (id == home && active.is_unmeasured())
            }
            (LinkTarget::Section(id), PageContext::Standalone(_)) => {
                if id == home {
                    location.path() == SINGLE_PAGE_PATH
                } else {
                    location.hash() == Some(id.as_str())
                }
            }
        }
    }

    /// Anchor href for `link` in the current context.
    #[must_use]
    pub fn href(link: &NavLink, context: &PageContext, home: &SectionId) -> String {
        match (&link.target, context) {
            (LinkTarget::Route(path), _) => path.clone(),
            (LinkTarget::Section(id), PageContext::SinglePage) if id == home => "#".to_string(),
            (LinkTarget::Section(id), PageContext::SinglePage) => id.fragment(),
            (LinkTarget::Section(_), PageContext::Standalone(_)) => SINGLE_PAGE_PATH.to_string(),
        }
    }

    #[must_use]
    pub fn views(
        &self,
        location: &Location,
        active: &ActiveSection,
        home: &SectionId,
    ) -> Vec<LinkView> {
        let context = location.context();
        self.links
            .iter()
            .map(|link| LinkView {
                label: link.label.clone(),
                href: Self::href(link, &context, home),
                highlighted: Self::highlighted(link, location, active, home),
            })
            .collect()
    }
}

impl Default for NavLinks {
    fn default() -> Self {
        Self::for_catalog(&SectionCatalog::default())
    }
}
