use wasm_bindgen::JsValue;
use web_sys::{Element, Window};

use yeki_core::{Document, Error, Result};

pub(crate) fn host_error(context: &str, value: JsValue) -> Error {
    Error::Host(format!("{}: {:?}", context, value))
}

/// `Document` over the live browser DOM
pub struct BrowserDocument {
    window: Window,
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::Host("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::Host("window has no document".into()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn dom(&self) -> &web_sys::Document {
        &self.document
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }
}

impl Document for BrowserDocument {
    type Element = Element;

    fn scroll_top(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    /// Layout viewport height, excluding a horizontal scrollbar
    fn viewport_height(&self) -> f64 {
        self.root()
            .map(|root| f64::from(root.client_height()))
            .unwrap_or(0.0)
    }

    fn max_scroll_top(&self) -> f64 {
        self.root()
            .map(|root| f64::from(root.scroll_height() - root.client_height()))
            .unwrap_or(0.0)
            .max(0.0)
    }

    fn set_scroll_top(&mut self, top: f64) -> Result<()> {
        let x = self.window.scroll_x().unwrap_or(0.0);
        self.window.scroll_to_with_x_and_y(x, top);
        Ok(())
    }

    fn elements_with_class(&self, class: &str) -> Result<Vec<Element>> {
        let collection = self.document.get_elements_by_class_name(class);
        Ok((0..collection.length())
            .filter_map(|idx| collection.item(idx))
            .collect())
    }

    fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
        self.document
            .query_selector(selector)
            .map_err(|_| Error::Selector(selector.to_string()))
    }

    /// Bounding box top plus page scroll, as jQuery's `offset()` computes it
    fn offset_top(&self, element: &Element) -> f64 {
        element.get_bounding_client_rect().top() + self.scroll_top()
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&mut self, element: &Element, class: &str) -> Result<()> {
        element
            .class_list()
            .add_1(class)
            .map_err(|e| host_error("classList.add", e))
    }

    fn page_url(&self) -> Option<String> {
        self.document.url().ok()
    }
}
