//! In-memory page used by the terminal preview, the headless CLI commands
//! and the tests.
//!
//! A page is described in TOML:
//!
//! ```toml
//! url = "https://example.com/"
//! viewport_height = 600.0
//!
//! [[nav]]
//! label = "About"
//! href = "#about"
//!
//! [[elements]]
//! id = "about"
//! classes = ["animate-up"]
//! top = 800.0
//! height = 300.0
//! label = "About us"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::{Error, Result};

/// Index of an element inside a `StaticPage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageElement {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Document-relative top edge
    pub top: f64,
    #[serde(default)]
    pub height: f64,
    /// Text shown by the preview
    #[serde(default)]
    pub label: String,
}

impl PageElement {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPage {
    /// Address of the page, used to resolve relative hrefs
    #[serde(default)]
    pub url: Option<String>,
    pub viewport_height: f64,
    #[serde(default)]
    pub scroll_top: f64,
    /// Explicit document height; derived from the elements when absent
    #[serde(default)]
    pub document_height: Option<f64>,
    #[serde(default)]
    pub nav: Vec<NavLink>,
    #[serde(default)]
    pub elements: Vec<PageElement>,
}

impl StaticPage {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            url: None,
            viewport_height,
            scroll_top: 0.0,
            document_height: None,
            nav: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Parse a TOML page description
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let page: Self = toml::from_str(content).map_err(|e| Error::Page(e.to_string()))?;
        page.validate()?;
        Ok(page)
    }

    /// Read a TOML page description from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if !(self.viewport_height > 0.0) {
            return Err(Error::Page(format!(
                "viewport_height must be > 0, got {}",
                self.viewport_height
            )));
        }
        for (idx, element) in self.elements.iter().enumerate() {
            if !element.top.is_finite() || !(element.height >= 0.0) {
                return Err(Error::Page(format!("element {} has invalid geometry", idx)));
            }
        }
        Ok(())
    }

    /// Append an element, returning its handle
    pub fn push(&mut self, element: PageElement) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// Builder-style helper: an element with an id and classes at `top`
    pub fn with_element(mut self, id: Option<&str>, classes: &[&str], top: f64, height: f64) -> Self {
        self.push(PageElement {
            id: id.map(str::to_string),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            top,
            height,
            label: id.unwrap_or_default().to_string(),
        });
        self
    }

    pub fn with_nav(mut self, label: &str, href: &str) -> Self {
        self.nav.push(NavLink {
            label: label.to_string(),
            href: href.to_string(),
        });
        self
    }

    pub fn element(&self, id: ElementId) -> Option<&PageElement> {
        self.elements.get(id.0)
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(ElementId)
    }

    /// Full height of the document
    pub fn height(&self) -> f64 {
        self.document_height.unwrap_or_else(|| {
            self.elements
                .iter()
                .map(PageElement::bottom)
                .fold(self.viewport_height, f64::max)
        })
    }
}

/// Validate a CSS identifier the way the in-memory selector engine needs it
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

impl Document for StaticPage {
    type Element = ElementId;

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn max_scroll_top(&self) -> f64 {
        (self.height() - self.viewport_height).max(0.0)
    }

    fn set_scroll_top(&mut self, top: f64) -> Result<()> {
        self.scroll_top = top.clamp(0.0, self.max_scroll_top());
        Ok(())
    }

    fn elements_with_class(&self, class: &str) -> Result<Vec<ElementId>> {
        Ok(self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.classes.iter().any(|c| c == class))
            .map(|(idx, _)| ElementId(idx))
            .collect())
    }

    /// Supports the `#id` and `.class` forms
    fn query_selector(&self, selector: &str) -> Result<Option<ElementId>> {
        if let Some(id) = selector.strip_prefix('#') {
            if !is_identifier(id) {
                return Err(Error::Selector(selector.to_string()));
            }
            return Ok(self.element_by_id(id));
        }
        if let Some(class) = selector.strip_prefix('.') {
            if !is_identifier(class) {
                return Err(Error::Selector(selector.to_string()));
            }
            return Ok(self.elements_with_class(class)?.into_iter().next());
        }
        Err(Error::Selector(selector.to_string()))
    }

    fn offset_top(&self, element: &ElementId) -> f64 {
        self.element(*element).map(|e| e.top).unwrap_or(0.0)
    }

    fn has_class(&self, element: &ElementId, class: &str) -> bool {
        self.element(*element)
            .map(|e| e.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, element: &ElementId, class: &str) -> Result<()> {
        let el = self
            .elements
            .get_mut(element.0)
            .ok_or_else(|| Error::Page(format!("no element at index {}", element.0)))?;
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_string());
        }
        Ok(())
    }

    fn page_url(&self) -> Option<String> {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
        url = "https://example.com/index.html"
        viewport_height = 600.0

        [[nav]]
        label = "Services"
        href = "#services"

        [[elements]]
        id = "hero"
        top = 0.0
        height = 600.0

        [[elements]]
        id = "services"
        classes = ["animate-up"]
        top = 800.0
        height = 500.0
        label = "Our services"
    "##;

    #[test]
    fn test_parse_page() {
        let page = StaticPage::from_toml_str(SAMPLE).unwrap();
        assert_eq!(page.nav.len(), 1);
        assert_eq!(page.elements.len(), 2);
        assert_eq!(page.elements[1].label, "Our services");
        assert_eq!(page.height(), 1300.0);
        assert_eq!(page.max_scroll_top(), 700.0);
    }

    #[test]
    fn test_rejects_zero_viewport() {
        let err = StaticPage::from_toml_str("viewport_height = 0.0").unwrap_err();
        assert!(matches!(err, Error::Page(_)));
    }

    #[test]
    fn test_query_selector_forms() {
        let page = StaticPage::from_toml_str(SAMPLE).unwrap();
        assert_eq!(page.query_selector("#services").unwrap(), Some(ElementId(1)));
        assert_eq!(page.query_selector(".animate-up").unwrap(), Some(ElementId(1)));
        assert_eq!(page.query_selector("#missing").unwrap(), None);
        assert!(page.query_selector("#1bad").is_err());
        assert!(page.query_selector("div > p").is_err());
    }

    #[test]
    fn test_add_class_is_idempotent() {
        let mut page = StaticPage::from_toml_str(SAMPLE).unwrap();
        page.add_class(&ElementId(1), "visible").unwrap();
        page.add_class(&ElementId(1), "visible").unwrap();
        assert_eq!(page.elements[1].classes, vec!["animate-up", "visible"]);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut page = StaticPage::from_toml_str(SAMPLE).unwrap();
        page.set_scroll_top(5000.0).unwrap();
        assert_eq!(page.scroll_top(), 700.0);
        page.set_scroll_top(-20.0).unwrap();
        assert_eq!(page.scroll_top(), 0.0);
    }
}
