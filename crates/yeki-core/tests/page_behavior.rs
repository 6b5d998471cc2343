use std::time::Duration;

use yeki_core::{
    AppConfig, ClickOutcome, Document, ElementId, Error, PageEvent, ScrollUiController, StaticPage,
};

const LANDING: &str = r##"
url = "https://yeki.example/"
viewport_height = 700.0

[[nav]]
label = "Home"
href = "#"

[[nav]]
label = "Services"
href = "#section2"

[[nav]]
label = "Gallery"
href = "#gallery"

[[elements]]
id = "hero"
classes = ["animate-fade"]
top = 0.0
height = 700.0

[[elements]]
id = "intro"
classes = ["animate-up"]
top = 560.0
height = 200.0

[[elements]]
id = "section2"
classes = ["animate-up"]
top = 800.0
height = 900.0

[[elements]]
id = "footer"
classes = ["animate-fade"]
top = 1700.0
height = 300.0
"##;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn visible(page: &StaticPage) -> Vec<bool> {
    (0..page.elements.len())
        .map(|idx| page.has_class(&ElementId(idx), "visible"))
        .collect()
}

#[test]
fn load_reveals_what_the_initial_viewport_covers() {
    let mut page = StaticPage::from_toml_str(LANDING).unwrap();
    let mut controller = ScrollUiController::default();

    controller.handle(&mut page, PageEvent::Load, ms(0)).unwrap();

    // 0 + 700 > top + 100 holds for hero (0) and intro (560), not section2 (800)
    assert_eq!(visible(&page), vec![true, true, false, false]);
}

#[test]
fn reveal_is_monotonic_across_scroll_events() {
    let mut page = StaticPage::from_toml_str(LANDING).unwrap();
    let mut controller = ScrollUiController::default();

    page.set_scroll_top(1300.0).unwrap();
    controller.handle(&mut page, PageEvent::Scroll, ms(0)).unwrap();
    assert_eq!(visible(&page), vec![true, true, true, true]);

    page.set_scroll_top(0.0).unwrap();
    controller.handle(&mut page, PageEvent::Scroll, ms(10)).unwrap();
    controller.handle(&mut page, PageEvent::Load, ms(20)).unwrap();
    assert_eq!(visible(&page), vec![true, true, true, true]);
}

#[test]
fn repeated_passes_leave_class_lists_unchanged() {
    let mut page = StaticPage::from_toml_str(LANDING).unwrap();
    let mut controller = ScrollUiController::default();

    controller.install(&mut page).unwrap();
    let once: Vec<_> = page.elements.iter().map(|e| e.classes.clone()).collect();
    controller.install(&mut page).unwrap();
    let twice: Vec<_> = page.elements.iter().map(|e| e.classes.clone()).collect();

    assert_eq!(once, twice);
}

#[test]
fn nav_click_scrolls_to_target_minus_header() {
    let mut page = StaticPage::from_toml_str(LANDING).unwrap();
    let mut controller = ScrollUiController::default();
    controller.install(&mut page).unwrap();

    let outcome = controller.on_click(&mut page, "#section2", ms(1_000)).unwrap();
    assert!(outcome.prevents_default());
    assert_eq!(outcome.target().map(|t| t.scroll_top), Some(730.0));

    // Still moving right before the 600 ms mark, settled at it
    let mut now = 1_000;
    while now < 1_590 {
        now += 16;
        controller.tick(&mut page, ms(now.min(1_590))).unwrap();
    }
    assert!(controller.is_animating());
    assert!(page.scroll_top() < 730.0);

    assert!(!controller.tick(&mut page, ms(1_600)).unwrap());
    assert_eq!(page.scroll_top(), 730.0);
    assert!(page.has_class(&ElementId(2), "visible"));
}

#[test]
fn empty_fragment_is_left_to_the_browser() {
    let mut page = StaticPage::from_toml_str(LANDING).unwrap();
    page.set_scroll_top(200.0).unwrap();
    let mut controller = ScrollUiController::default();

    let outcome = controller.on_click(&mut page, "#", ms(0)).unwrap();
    assert_eq!(outcome, ClickOutcome::Default);
    assert!(!outcome.prevents_default());
    assert!(!controller.is_animating());
    assert_eq!(page.scroll_top(), 200.0);
}

#[test]
fn unknown_fragment_is_silent() {
    let mut page = StaticPage::from_toml_str(LANDING).unwrap();
    page.set_scroll_top(200.0).unwrap();
    let mut controller = ScrollUiController::default();

    let outcome = controller.on_click(&mut page, "#gallery", ms(0)).unwrap();
    assert_eq!(outcome, ClickOutcome::Suppressed { target: None });
    controller.tick(&mut page, ms(1_000)).unwrap();
    assert_eq!(page.scroll_top(), 200.0);
}

#[test]
fn later_click_wins() {
    let mut page = StaticPage::from_toml_str(LANDING).unwrap();
    let mut controller = ScrollUiController::default();

    controller.on_click(&mut page, "#section2", ms(0)).unwrap();
    controller.tick(&mut page, ms(200)).unwrap();
    controller.on_click(&mut page, "#intro", ms(200)).unwrap();
    controller.tick(&mut page, ms(800)).unwrap();

    assert_eq!(page.scroll_top(), 490.0);
}

#[test]
fn target_near_page_end_is_clamped() {
    let mut page = StaticPage::from_toml_str(LANDING).unwrap();
    let mut controller = ScrollUiController::default();

    controller.on_click(&mut page, "#footer", ms(0)).unwrap();
    controller.tick(&mut page, ms(600)).unwrap();

    // document is 2000 tall with a 700 viewport
    assert_eq!(page.scroll_top(), 1300.0);
}

#[test]
fn custom_config_changes_classes_and_offsets() {
    let config = AppConfig::from_toml_str(
        r#"
        [reveal]
        marker_classes = ["reveal"]
        visible_class = "shown"
        lookahead_px = 0.0

        [nav]
        header_offset_px = 0.0

        [scroll]
        smooth_enabled = false
        "#,
    )
    .unwrap();

    let mut page = StaticPage::new(500.0)
        .with_element(Some("a"), &["reveal"], 499.0, 10.0)
        .with_element(Some("b"), &["animate-up"], 0.0, 10.0)
        .with_element(Some("c"), &["reveal"], 900.0, 600.0);
    let mut controller = ScrollUiController::new(&config);

    controller.install(&mut page).unwrap();
    assert!(page.has_class(&ElementId(0), "shown"));
    assert!(!page.has_class(&ElementId(1), "shown"));

    controller.on_click(&mut page, "#c", ms(0)).unwrap();
    assert_eq!(page.scroll_top(), 900.0);
    assert!(page.has_class(&ElementId(2), "shown"));
}

/// Document whose scroll writes always fail, like a detached frame
struct FrozenPage(StaticPage);

impl Document for FrozenPage {
    type Element = ElementId;

    fn scroll_top(&self) -> f64 {
        self.0.scroll_top()
    }
    fn viewport_height(&self) -> f64 {
        self.0.viewport_height()
    }
    fn max_scroll_top(&self) -> f64 {
        self.0.max_scroll_top()
    }
    fn set_scroll_top(&mut self, _top: f64) -> yeki_core::Result<()> {
        Err(Error::Host("scrolling is frozen".into()))
    }
    fn elements_with_class(&self, class: &str) -> yeki_core::Result<Vec<ElementId>> {
        self.0.elements_with_class(class)
    }
    fn query_selector(&self, selector: &str) -> yeki_core::Result<Option<ElementId>> {
        self.0.query_selector(selector)
    }
    fn offset_top(&self, element: &ElementId) -> f64 {
        self.0.offset_top(element)
    }
    fn has_class(&self, element: &ElementId, class: &str) -> bool {
        self.0.has_class(element, class)
    }
    fn add_class(&mut self, element: &ElementId, class: &str) -> yeki_core::Result<()> {
        self.0.add_class(element, class)
    }
}

#[test]
fn host_scroll_failure_is_reported_to_the_host() {
    let mut page = FrozenPage(StaticPage::from_toml_str(LANDING).unwrap());
    let mut controller = ScrollUiController::default();

    controller.on_click(&mut page, "#section2", ms(0)).unwrap();
    let err = controller.tick(&mut page, ms(100)).unwrap_err();
    assert!(matches!(err, Error::Host(_)));
}

#[test]
fn bundled_demo_page_behaves() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/landing.toml");
    let mut page = StaticPage::load(&path).unwrap();
    let mut controller = ScrollUiController::default();
    controller.install(&mut page).unwrap();

    let hrefs: Vec<String> = page.nav.iter().map(|link| link.href.clone()).collect();
    let outcomes: Vec<ClickOutcome> = hrefs
        .iter()
        .map(|href| controller.on_click(&mut page, href, ms(0)).unwrap())
        .collect();

    // "#" and the link into /blog/ navigate normally, the rest are in-page
    let suppressed: Vec<bool> = outcomes.iter().map(ClickOutcome::prevents_default).collect();
    assert_eq!(suppressed, vec![false, true, true, true, true, false]);
    assert!(outcomes[1..5].iter().all(|o| o.target().is_some()));

    // last click wins: contact
    controller.tick(&mut page, ms(600)).unwrap();
    assert_eq!(page.scroll_top(), 3110.0);
}
