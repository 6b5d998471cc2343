//! Host document abstraction
//!
//! The behavior handlers never hold page state of their own: every event
//! re-reads geometry and class lists through this trait. The browser host
//! implements it over the live DOM, `StaticPage` implements it in memory.

use crate::Result;

/// Read/write access to the page the handlers act on.
///
/// All lengths are CSS pixels, offsets are document-relative.
pub trait Document {
    /// Handle to one element of the page
    type Element: Clone + PartialEq;

    /// Current vertical scroll offset
    fn scroll_top(&self) -> f64;

    /// Height of the visible area
    fn viewport_height(&self) -> f64;

    /// Largest scroll offset the page allows
    fn max_scroll_top(&self) -> f64;

    /// Move the page to a scroll offset
    fn set_scroll_top(&mut self, top: f64) -> Result<()>;

    /// All elements carrying `class`, in document order
    fn elements_with_class(&self, class: &str) -> Result<Vec<Self::Element>>;

    /// First element matching a selector, `Ok(None)` when nothing matches
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>>;

    /// Top edge of an element relative to the document
    fn offset_top(&self, element: &Self::Element) -> f64;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Add `class` to an element; adding a present class is a no-op
    fn add_class(&mut self, element: &Self::Element, class: &str) -> Result<()>;

    /// Address of the page itself, used to tell same-page links apart
    fn page_url(&self) -> Option<String> {
        None
    }
}
