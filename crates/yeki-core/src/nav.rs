use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::NavConfig;
use crate::document::Document;
use crate::Result;

/// Where a navigation click should scroll to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollTarget {
    /// Fragment identifier without the leading `#`
    pub fragment: String,
    /// Document-relative top of the target element
    pub element_top: f64,
    /// Scroll offset to animate to, before clamping to the page
    pub scroll_top: f64,
}

/// What a click on a navigation link resolved to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Leave the click alone, the host navigates normally
    Default,
    /// Default navigation suppressed; scroll to `target` when one was found
    Suppressed { target: Option<ScrollTarget> },
}

impl ClickOutcome {
    /// Whether the host must cancel its default link handling
    pub fn prevents_default(&self) -> bool {
        matches!(self, ClickOutcome::Suppressed { .. })
    }

    pub fn target(&self) -> Option<&ScrollTarget> {
        match self {
            ClickOutcome::Suppressed { target } => target.as_ref(),
            ClickOutcome::Default => None,
        }
    }
}

/// Fragment of an href: everything after the first `#`, empty when absent
pub fn fragment_of(href: &str) -> &str {
    href.split_once('#').map(|(_, frag)| frag).unwrap_or("")
}

/// Resolve `href` against the page and return its fragment when it points
/// into the same document, `None` when it leads elsewhere.
pub fn same_page_fragment(page_url: &str, href: &str) -> Result<Option<String>> {
    let base = Url::parse(page_url)?;
    let resolved = base.join(href)?;

    let mut base_doc = base.clone();
    base_doc.set_fragment(None);
    let mut resolved_doc = resolved.clone();
    resolved_doc.set_fragment(None);

    if base_doc != resolved_doc {
        return Ok(None);
    }
    Ok(Some(resolved.fragment().unwrap_or("").to_string()))
}

/// Turns clicks on in-page links into scroll targets.
#[derive(Debug, Clone)]
pub struct NavHandler {
    link_selector: String,
    header_offset: f64,
    same_page_only: bool,
}

impl Default for NavHandler {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}

impl NavHandler {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            link_selector: config.link_selector.clone(),
            header_offset: config.header_offset_px,
            same_page_only: config.same_page_only,
        }
    }

    /// Selector hosts use to find the links to bind
    pub fn link_selector(&self) -> &str {
        &self.link_selector
    }

    pub fn header_offset(&self) -> f64 {
        self.header_offset
    }

    /// Fragment the click should act on, `None` to leave the click alone
    fn fragment_for<D: Document>(&self, doc: &D, href: &str) -> Option<String> {
        let fragment = match (self.same_page_only, doc.page_url()) {
            (true, Some(page_url)) => match same_page_fragment(&page_url, href) {
                Ok(Some(fragment)) => fragment,
                Ok(None) => {
                    debug!(href, "link leads to another document");
                    return None;
                }
                Err(e) => {
                    debug!(href, error = %e, "unresolvable link");
                    return None;
                }
            },
            _ => fragment_of(href).to_string(),
        };

        if fragment.is_empty() {
            None
        } else {
            Some(fragment)
        }
    }

    /// Handle a click on a link with the given href
    ///
    /// A missing or unselectable target still suppresses navigation but
    /// yields no scroll; nothing is reported as an error.
    pub fn click<D: Document>(&self, doc: &D, href: &str) -> ClickOutcome {
        let Some(fragment) = self.fragment_for(doc, href) else {
            return ClickOutcome::Default;
        };

        let selector = format!("#{}", fragment);
        let element = match doc.query_selector(&selector) {
            Ok(Some(element)) => element,
            Ok(None) => {
                debug!(%selector, "navigation target not found");
                return ClickOutcome::Suppressed { target: None };
            }
            Err(e) => {
                debug!(%selector, error = %e, "navigation target not selectable");
                return ClickOutcome::Suppressed { target: None };
            }
        };

        let element_top = doc.offset_top(&element);
        ClickOutcome::Suppressed {
            target: Some(ScrollTarget {
                fragment,
                element_top,
                scroll_top: element_top - self.header_offset,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::StaticPage;

    fn page() -> StaticPage {
        StaticPage::new(600.0)
            .with_element(Some("section1"), &[], 0.0, 800.0)
            .with_element(Some("section2"), &[], 800.0, 800.0)
    }

    #[test]
    fn test_fragment_of() {
        assert_eq!(fragment_of("#section2"), "section2");
        assert_eq!(fragment_of("/about#team"), "team");
        assert_eq!(fragment_of("#"), "");
        assert_eq!(fragment_of("/about"), "");
    }

    #[test]
    fn test_click_targets_offset_minus_header() {
        let outcome = NavHandler::default().click(&page(), "#section2");
        assert!(outcome.prevents_default());
        let target = outcome.target().unwrap();
        assert_eq!(target.fragment, "section2");
        assert_eq!(target.element_top, 800.0);
        assert_eq!(target.scroll_top, 730.0);
    }

    #[test]
    fn test_empty_fragment_keeps_default() {
        let handler = NavHandler::default();
        assert_eq!(handler.click(&page(), "#"), ClickOutcome::Default);
        assert_eq!(handler.click(&page(), ""), ClickOutcome::Default);
        assert_eq!(handler.click(&page(), "/contact"), ClickOutcome::Default);
    }

    #[test]
    fn test_missing_target_is_suppressed_noop() {
        let outcome = NavHandler::default().click(&page(), "#nowhere");
        assert_eq!(outcome, ClickOutcome::Suppressed { target: None });
    }

    #[test]
    fn test_invalid_selector_is_suppressed_noop() {
        let outcome = NavHandler::default().click(&page(), "#1st");
        assert_eq!(outcome, ClickOutcome::Suppressed { target: None });
    }

    #[test]
    fn test_other_document_keeps_default() {
        let mut page = page();
        page.url = Some("https://example.com/index.html".into());
        let handler = NavHandler::default();

        assert_eq!(handler.click(&page, "/blog.html#section2"), ClickOutcome::Default);
        assert_eq!(
            handler.click(&page, "https://other.org/index.html#section2"),
            ClickOutcome::Default
        );
        assert!(handler
            .click(&page, "index.html#section2")
            .target()
            .is_some());
        assert!(handler
            .click(&page, "https://example.com/index.html#section2")
            .target()
            .is_some());
    }

    #[test]
    fn test_same_page_only_disabled_uses_raw_fragment() {
        let mut page = page();
        page.url = Some("https://example.com/index.html".into());
        let handler = NavHandler::from_config(&NavConfig {
            same_page_only: false,
            ..Default::default()
        });
        let outcome = handler.click(&page, "/blog.html#section2");
        assert_eq!(outcome.target().map(|t| t.scroll_top), Some(730.0));
    }

    #[test]
    fn test_same_page_fragment() {
        let base = "https://example.com/a/index.html?x=1#top";
        assert_eq!(
            same_page_fragment(base, "#services").unwrap(),
            Some("services".to_string())
        );
        assert_eq!(same_page_fragment(base, "#").unwrap(), Some(String::new()));
        assert_eq!(same_page_fragment(base, "other.html#services").unwrap(), None);
        assert!(same_page_fragment("not a url", "#x").is_err());
    }
}
