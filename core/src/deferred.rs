//! Scroll scheduled after a context switch.
//!
//! Switching from a standalone page to the single-page layout and then
//! scrolling to a section cannot happen in one turn: the section is not
//! rendered yet. The scroll is parked here and released by time (or by a
//! content-ready signal, when configured). When it is released the region is
//! looked up once; if it is still missing the scroll is dropped.

use std::time::Duration;

use navspy_types::{DeferredScrollOptions, DelayTimer, ScrollTrigger, SectionId};

use crate::host::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredOutcome {
    Scrolled,
    /// The target region did not exist when the scroll fired.
    Skipped,
}

impl DeferredOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DeferredOutcome::Scrolled => "deferred-scrolled",
            DeferredOutcome::Skipped => "deferred-skipped",
        }
    }
}

#[derive(Debug, Clone)]
struct PendingScroll {
    target: SectionId,
    timer: DelayTimer,
}

#[derive(Debug, Clone)]
pub struct DeferredScroll {
    options: DeferredScrollOptions,
    pending: Option<PendingScroll>,
}

impl DeferredScroll {
    #[must_use]
    pub fn new(options: DeferredScrollOptions) -> Self {
        Self {
            options,
            pending: None,
        }
    }

    /// Park a scroll to `target`, replacing any scroll already parked.
    pub fn schedule(&mut self, target: SectionId) {
        if let Some(previous) = &self.pending {
            tracing::debug!(replaced = %previous.target, "Deferred scroll replaced");
        }
        tracing::debug!(
            section = %target,
            delay_ms = self.options.delay.as_millis() as u64,
            trigger = self.options.trigger.as_str(),
            "Deferred scroll scheduled"
        );
        self.pending = Some(PendingScroll {
            target,
            timer: DelayTimer::new(self.options.delay),
        });
    }

    #[must_use]
    pub fn pending_target(&self) -> Option<&SectionId> {
        self.pending.as_ref().map(|p| &p.target)
    }

    /// Advance the delay; fires the scroll once it has elapsed.
    pub fn advance<D: Document + ?Sized>(
        &mut self,
        delta: Duration,
        document: &mut D,
    ) -> Option<DeferredOutcome> {
        let pending = self.pending.as_mut()?;
        pending.timer.advance(delta);
        if !pending.timer.is_finished() {
            return None;
        }
        self.fire(document)
    }

    /// Host signal that freshly switched content is rendered.
    ///
    /// Only releases the scroll under [`ScrollTrigger::ContentReady`]; under
    /// the fixed-delay contract the timer alone decides.
    pub fn content_ready<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
    ) -> Option<DeferredOutcome> {
        match self.options.trigger {
            ScrollTrigger::ContentReady => self.fire(document),
            ScrollTrigger::Delay => None,
        }
    }

    fn fire<D: Document + ?Sized>(&mut self, document: &mut D) -> Option<DeferredOutcome> {
        let PendingScroll { target, .. } = self.pending.take()?;
        match document.find_region(&target) {
            Some(region) => {
                document.scroll_to_region(region);
                tracing::debug!(section = %target, "Deferred scroll fired");
                Some(DeferredOutcome::Scrolled)
            }
            None => {
                tracing::debug!(section = %target, "Deferred scroll target missing; skipped");
                Some(DeferredOutcome::Skipped)
            }
        }
    }
}
