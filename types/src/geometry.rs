//! Viewport geometry: the activation band and visibility thresholds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A vertical extent in document coordinates (pixels from the document top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalSpan {
    pub top: f64,
    pub height: f64,
}

impl VerticalSpan {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Length of the overlap with `other`, zero when they do not meet.
    #[must_use]
    pub fn overlap(&self, other: &VerticalSpan) -> f64 {
        (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("inset {0} must be within [0, 0.5)")]
    Inset(f64),
    #[error("at least one visibility threshold is required")]
    NoThresholds,
    #[error("visibility threshold {0} must be within (0, 1]")]
    Threshold(f64),
}

/// The inset viewport region a section must reach to count as visible.
///
/// Insets are fractions of the viewport height removed from its top and
/// bottom edges, so a section merely peeking in at an edge does not count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationBand {
    top_inset: f64,
    bottom_inset: f64,
}

impl ActivationBand {
    pub fn new(top_inset: f64, bottom_inset: f64) -> Result<Self, ThresholdError> {
        for inset in [top_inset, bottom_inset] {
            if !(0.0..0.5).contains(&inset) {
                return Err(ThresholdError::Inset(inset));
            }
        }
        Ok(Self {
            top_inset,
            bottom_inset,
        })
    }

    #[must_use]
    pub fn top_inset(&self) -> f64 {
        self.top_inset
    }

    #[must_use]
    pub fn bottom_inset(&self) -> f64 {
        self.bottom_inset
    }

    /// The band within `viewport`, in document coordinates.
    #[must_use]
    pub fn apply(&self, viewport: VerticalSpan) -> VerticalSpan {
        let top = viewport.top + viewport.height * self.top_inset;
        let bottom = viewport.bottom() - viewport.height * self.bottom_inset;
        VerticalSpan::new(top, bottom - top)
    }

    /// Fraction of `region` inside the band, or `None` when they do not
    /// intersect at all.
    ///
    /// A zero-height region intersects (with ratio 1) when its top lies inside
    /// the band.
    #[must_use]
    pub fn intersection_ratio(&self, region: VerticalSpan, viewport: VerticalSpan) -> Option<f64> {
        let band = self.apply(viewport);
        if region.height <= 0.0 {
            return (region.top >= band.top && region.top <= band.bottom()).then_some(1.0);
        }
        let overlap = region.overlap(&band);
        (overlap > 0.0).then(|| (overlap / region.height).min(1.0))
    }
}

impl Default for ActivationBand {
    fn default() -> Self {
        Self {
            top_inset: 0.05,
            bottom_inset: 0.05,
        }
    }
}

/// Visibility ratios at which the host re-reports a region.
///
/// Sorted ascending with duplicates removed. Reporting at several ratios
/// rather than only at enter/exit keeps the tracker re-evaluating while a
/// section slides through the band.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityThresholds(Vec<f64>);

impl VisibilityThresholds {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Result<Self, ThresholdError> {
        let mut values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return Err(ThresholdError::NoThresholds);
        }
        if let Some(bad) = values
            .iter()
            .copied()
            .find(|v| !(v.is_finite() && *v > 0.0 && *v <= 1.0))
        {
            return Err(ThresholdError::Threshold(bad));
        }
        values.sort_by(f64::total_cmp);
        values.dedup();
        Ok(Self(values))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of thresholds at or below `ratio`.
    ///
    /// Two ratios in the same bucket are indistinguishable to an observer
    /// configured with these thresholds.
    #[must_use]
    pub fn bucket(&self, ratio: f64) -> usize {
        self.0.iter().take_while(|t| **t <= ratio).count()
    }
}

impl Default for VisibilityThresholds {
    fn default() -> Self {
        Self(vec![0.1, 0.2, 0.3])
    }
}
