use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::document::Document;
use crate::nav::{ClickOutcome, NavHandler};
use crate::reveal::{RevealHandler, RevealReport};
use crate::scroll::ScrollAnimator;
use crate::Result;

/// Events a host forwards to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The window finished loading
    Load,
    /// The page scrolled
    Scroll,
    /// A navigation link was clicked
    Click { href: String },
}

/// Result of dispatching a `PageEvent`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventOutcome {
    Revealed(RevealReport),
    Clicked(ClickOutcome),
}

/// Wires the reveal and navigation handlers to a host document.
///
/// The only state kept between events is the scroll animation in flight;
/// everything else is re-read from the document each time.
#[derive(Debug, Clone, Default)]
pub struct ScrollUiController {
    reveal: RevealHandler,
    nav: NavHandler,
    animator: ScrollAnimator,
}

impl ScrollUiController {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            reveal: RevealHandler::from_config(&config.reveal),
            nav: NavHandler::from_config(&config.nav),
            animator: ScrollAnimator::new(config.scroll.clone()),
        }
    }

    pub fn reveal_handler(&self) -> &RevealHandler {
        &self.reveal
    }

    pub fn nav_handler(&self) -> &NavHandler {
        &self.nav
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Eager pass so content already in view shows up without a scroll
    pub fn install<D: Document>(&mut self, doc: &mut D) -> Result<RevealReport> {
        let report = self.run_reveal(doc)?;
        debug!(
            examined = report.examined,
            revealed = report.revealed,
            "controller installed"
        );
        Ok(report)
    }

    /// Dispatch one page event
    pub fn handle<D: Document>(&mut self, doc: &mut D, event: PageEvent, now: Duration) -> Result<EventOutcome> {
        match event {
            PageEvent::Load | PageEvent::Scroll => self.run_reveal(doc).map(EventOutcome::Revealed),
            PageEvent::Click { href } => self.on_click(doc, &href, now).map(EventOutcome::Clicked),
        }
    }

    /// Reveal pass for a `scroll` or `load` event
    pub fn run_reveal<D: Document>(&self, doc: &mut D) -> Result<RevealReport> {
        let report = self.reveal.check(doc)?;
        if report.revealed > 0 {
            debug!(
                revealed = report.revealed,
                scroll_top = doc.scroll_top(),
                "elements revealed"
            );
        }
        Ok(report)
    }

    /// Handle a navigation click, starting the scroll animation when the
    /// link resolves to an element of the page
    pub fn on_click<D: Document>(&mut self, doc: &mut D, href: &str, now: Duration) -> Result<ClickOutcome> {
        let outcome = self.nav.click(doc, href);

        if let Some(target) = outcome.target() {
            debug!(
                fragment = %target.fragment,
                from = doc.scroll_top(),
                to = target.scroll_top,
                "scrolling to navigation target"
            );
            let jump = self.animator.animate_to(
                doc.scroll_top(),
                target.scroll_top,
                doc.max_scroll_top(),
                now,
            );
            if let Some(position) = jump {
                self.apply_scroll(doc, position)?;
            }
        }

        Ok(outcome)
    }

    /// Advance the animation one frame
    ///
    /// Writes the new offset to the document and runs the reveal pass the
    /// resulting scroll would trigger. Returns whether the animation is
    /// still running.
    pub fn tick<D: Document>(&mut self, doc: &mut D, now: Duration) -> Result<bool> {
        if let Some(position) = self.animator.tick(now) {
            self.apply_scroll(doc, position)?;
        }
        Ok(self.animator.is_animating())
    }

    /// Manual scroll by `delta` pixels; cancels any animation in flight
    pub fn on_user_scroll<D: Document>(&mut self, doc: &mut D, delta: f64) -> Result<RevealReport> {
        let position = (doc.scroll_top() + delta).clamp(0.0, doc.max_scroll_top());
        self.animator.cancel(position);
        self.apply_scroll(doc, position)
    }

    /// Drop the animation in flight, leaving the page where it is
    pub fn cancel_animation(&mut self) {
        let position = self.animator.current();
        self.animator.cancel(position);
    }

    fn apply_scroll<D: Document>(&self, doc: &mut D, position: f64) -> Result<RevealReport> {
        if let Err(e) = doc.set_scroll_top(position) {
            warn!(error = %e, position, "failed to move scroll position");
            return Err(e);
        }
        self.run_reveal(doc)
    }
}
