use serde::Serialize;
use tracing::trace;

use crate::config::RevealConfig;
use crate::document::Document;
use crate::Result;

/// Whether an element whose top edge is at `element_top` has come into view.
///
/// True once the viewport bottom is more than `lookahead` pixels past the
/// element's top edge.
#[inline]
pub fn should_reveal(scroll_top: f64, viewport_height: f64, element_top: f64, lookahead: f64) -> bool {
    scroll_top + viewport_height > element_top + lookahead
}

/// Outcome of one reveal pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevealReport {
    /// Marked elements looked at
    pub examined: usize,
    /// Elements that got the visible class in this pass
    pub revealed: usize,
    /// Elements that were already visible
    pub already_visible: usize,
}

/// Adds the visible class to marked elements once they scroll into view.
///
/// Stateless: every pass re-reads the document. Elements are never hidden
/// again, so repeated passes only ever grow the visible set.
#[derive(Debug, Clone)]
pub struct RevealHandler {
    marker_classes: Vec<String>,
    visible_class: String,
    lookahead: f64,
}

impl Default for RevealHandler {
    fn default() -> Self {
        Self::from_config(&RevealConfig::default())
    }
}

impl RevealHandler {
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            marker_classes: config
                .marker_classes
                .iter()
                .filter(|c| !c.trim().is_empty())
                .cloned()
                .collect(),
            visible_class: config.visible_class.clone(),
            lookahead: config.lookahead_px,
        }
    }

    pub fn visible_class(&self) -> &str {
        &self.visible_class
    }

    pub fn marker_classes(&self) -> &[String] {
        &self.marker_classes
    }

    /// Run one reveal pass against the document
    pub fn check<D: Document>(&self, doc: &mut D) -> Result<RevealReport> {
        let scroll_top = doc.scroll_top();
        let viewport_height = doc.viewport_height();

        let mut seen: Vec<D::Element> = Vec::new();
        for class in &self.marker_classes {
            for element in doc.elements_with_class(class)? {
                if !seen.contains(&element) {
                    seen.push(element);
                }
            }
        }

        let mut report = RevealReport {
            examined: seen.len(),
            ..Default::default()
        };

        for element in &seen {
            if doc.has_class(element, &self.visible_class) {
                report.already_visible += 1;
                continue;
            }
            let top = doc.offset_top(element);
            if should_reveal(scroll_top, viewport_height, top, self.lookahead) {
                doc.add_class(element, &self.visible_class)?;
                report.revealed += 1;
                trace!(top, "revealed element");
            }
        }

        Ok(report)
    }
}
