//! Run with `wasm-pack test --headless --firefox crates/yeki-web`
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use web_sys::Element;

use yeki_core::{Document, Error};
use yeki_web::BrowserDocument;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(id: &str, style: &str) -> Element {
    let dom = web_sys::window().unwrap().document().unwrap();
    let element = dom.create_element("div").unwrap();
    element.set_id(id);
    element.set_attribute("style", style).unwrap();
    dom.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn offset_is_page_relative() {
    mount("spacer", "height: 5000px");
    mount("far-section", "position: absolute; top: 1234px; height: 10px");
    let mut doc = BrowserDocument::new().unwrap();

    let target = doc.query_selector("#far-section").unwrap().unwrap();
    assert_eq!(doc.offset_top(&target), 1234.0);

    // same answer once the page has scrolled
    doc.set_scroll_top(300.0).unwrap();
    assert_eq!(doc.scroll_top(), 300.0);
    assert_eq!(doc.offset_top(&target), 1234.0);
    doc.set_scroll_top(0.0).unwrap();
}

#[wasm_bindgen_test]
fn invalid_selector_is_an_error() {
    let doc = BrowserDocument::new().unwrap();
    let err = doc.query_selector("#1st").unwrap_err();
    assert!(matches!(err, Error::Selector(_)));
    assert_eq!(doc.query_selector("#not-on-this-page").unwrap(), None);
}

#[wasm_bindgen_test]
fn classes_are_added_once() {
    let element = mount("revealed", "");
    element.set_class_name("animate-up");
    let mut doc = BrowserDocument::new().unwrap();

    assert!(doc.elements_with_class("animate-up").unwrap().contains(&element));
    assert!(!doc.has_class(&element, "visible"));
    doc.add_class(&element, "visible").unwrap();
    doc.add_class(&element, "visible").unwrap();
    assert_eq!(element.class_name(), "animate-up visible");
}

#[wasm_bindgen_test]
fn second_install_is_refused() {
    // the autostart hook may already have attached
    let _ = yeki_web::install(None);
    assert!(yeki_web::install(None).is_err());
}
