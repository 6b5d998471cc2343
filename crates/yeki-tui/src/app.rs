use std::time::Duration;

use tracing::warn;
use yeki_core::page::PageElement;
use yeki_core::{AppConfig, ClickOutcome, Document, ElementId, ScrollUiController, StaticPage};

/// Preview state: the page, the controller acting on it, and the link cursor
pub struct App {
    pub page: StaticPage,
    pub controller: ScrollUiController,
    /// Index into `page.nav` of the highlighted link
    pub selected_link: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Page pixels per terminal row
    px_per_row: f64,
}

impl App {
    pub fn new(page: StaticPage, config: &AppConfig) -> Self {
        Self {
            page,
            controller: ScrollUiController::new(config),
            selected_link: 0,
            status_message: None,
            should_quit: false,
            px_per_row: config.preview.px_per_row,
        }
    }

    pub fn px_per_row(&self) -> f64 {
        self.px_per_row
    }

    /// Run the eager reveal pass
    pub fn install(&mut self) {
        if let Err(e) = self.controller.install(&mut self.page) {
            self.report_error("install", e);
        }
    }

    /// Match the page viewport to the rows available for the page view
    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.page.viewport_height = f64::from(rows.max(1)) * self.px_per_row;
        let max = self.page.max_scroll_top();
        if self.page.scroll_top > max {
            self.page.scroll_top = max;
        }
    }

    /// Rows of the viewport
    pub fn viewport_rows(&self) -> u16 {
        (self.page.viewport_height / self.px_per_row).round() as u16
    }

    /// Manual scroll by whole rows
    pub fn scroll_rows(&mut self, rows: i32) {
        let delta = f64::from(rows) * self.px_per_row;
        if let Err(e) = self.controller.on_user_scroll(&mut self.page, delta) {
            self.report_error("scroll", e);
        }
    }

    pub fn scroll_half_page(&mut self, down: bool) {
        let half = (self.viewport_rows() / 2).max(1) as i32;
        self.scroll_rows(if down { half } else { -half });
    }

    pub fn scroll_page(&mut self, down: bool) {
        let page = self.viewport_rows().max(1) as i32;
        self.scroll_rows(if down { page } else { -page });
    }

    pub fn jump_to_top(&mut self) {
        let delta = -self.page.scroll_top();
        self.scroll_by_px(delta);
    }

    pub fn jump_to_bottom(&mut self) {
        let delta = self.page.max_scroll_top() - self.page.scroll_top();
        self.scroll_by_px(delta);
    }

    fn scroll_by_px(&mut self, delta: f64) {
        if let Err(e) = self.controller.on_user_scroll(&mut self.page, delta) {
            self.report_error("scroll", e);
        }
    }

    pub fn next_link(&mut self) {
        if !self.page.nav.is_empty() {
            self.selected_link = (self.selected_link + 1) % self.page.nav.len();
        }
    }

    pub fn prev_link(&mut self) {
        if !self.page.nav.is_empty() {
            self.selected_link = (self.selected_link + self.page.nav.len() - 1) % self.page.nav.len();
        }
    }

    pub fn select_link(&mut self, index: usize) {
        if index < self.page.nav.len() {
            self.selected_link = index;
        }
    }

    /// Click the highlighted navigation link
    pub fn click_selected(&mut self, now: Duration) {
        let Some(link) = self.page.nav.get(self.selected_link) else {
            self.status_message = Some("No navigation links on this page".to_string());
            return;
        };
        let href = link.href.clone();

        match self.controller.on_click(&mut self.page, &href, now) {
            Ok(ClickOutcome::Default) => {
                self.status_message = Some(format!("{}: default navigation", href));
            }
            Ok(ClickOutcome::Suppressed { target: Some(target) }) => {
                self.status_message = Some(format!(
                    "{} -> {:.0}px",
                    href,
                    target.scroll_top.clamp(0.0, self.page.max_scroll_top())
                ));
            }
            Ok(ClickOutcome::Suppressed { target: None }) => {
                self.status_message = Some(format!("{}: no such element", href));
            }
            Err(e) => self.report_error("click", e),
        }
    }

    /// Advance any running scroll animation
    pub fn tick(&mut self, now: Duration) {
        if let Err(e) = self.controller.tick(&mut self.page, now) {
            self.report_error("animation", e);
        }
    }

    pub fn needs_fast_update(&self) -> bool {
        self.controller.is_animating()
    }

    /// Whether an element is shown: unmarked elements always are
    pub fn is_shown(&self, id: ElementId) -> bool {
        let reveal = self.controller.reveal_handler();
        let marked = reveal
            .marker_classes()
            .iter()
            .any(|class| self.page.has_class(&id, class));
        !marked || self.page.has_class(&id, reveal.visible_class())
    }

    /// Marked elements and how many of them are visible
    pub fn reveal_counts(&self) -> (usize, usize) {
        let reveal = self.controller.reveal_handler();
        let marked: Vec<usize> = (0..self.page.elements.len())
            .filter(|idx| {
                reveal
                    .marker_classes()
                    .iter()
                    .any(|class| self.page.has_class(&ElementId(*idx), class))
            })
            .collect();
        let shown = marked
            .iter()
            .filter(|idx| self.page.has_class(&ElementId(**idx), reveal.visible_class()))
            .count();
        (shown, marked.len())
    }

    /// Elements overlapping the viewport, with their handles
    pub fn elements_in_view(&self) -> impl Iterator<Item = (ElementId, &PageElement)> + '_ {
        let top = self.page.scroll_top;
        let bottom = top + self.page.viewport_height;
        self.page
            .elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.bottom() > top && e.top < bottom)
            .map(|(idx, e)| (ElementId(idx), e))
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn report_error(&mut self, what: &str, e: yeki_core::Error) {
        warn!(error = %e, "{} failed", what);
        self.status_message = Some(format!("{} failed: {}", what, e));
    }
}
