use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use yeki_core::{AppConfig, Document, ElementId, RevealReport, ScrollUiController, StaticPage};

#[derive(Debug, Serialize)]
pub struct ElementState {
    pub index: usize,
    pub id: Option<String>,
    pub label: String,
    pub top: f64,
    pub marked: bool,
    pub visible: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub pass: RevealReport,
    pub elements: Vec<ElementState>,
}

/// Place the page at `scroll`, run the install pass and collect the result
pub fn check_page(config: &AppConfig, mut page: StaticPage, scroll: f64) -> Result<CheckReport> {
    page.set_scroll_top(scroll)?;
    let mut controller = ScrollUiController::new(config);
    let pass = controller.install(&mut page)?;

    let reveal = controller.reveal_handler();
    let elements = page
        .elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let handle = ElementId(index);
            ElementState {
                index,
                id: element.id.clone(),
                label: element.label.clone(),
                top: element.top,
                marked: reveal
                    .marker_classes()
                    .iter()
                    .any(|class| page.has_class(&handle, class)),
                visible: page.has_class(&handle, reveal.visible_class()),
            }
        })
        .collect();

    Ok(CheckReport {
        scroll_top: page.scroll_top(),
        viewport_height: page.viewport_height(),
        pass,
        elements,
    })
}

pub fn run(config: &AppConfig, path: &Path, scroll: f64, json: bool) -> Result<()> {
    let page = super::load_page(path)?;
    let report = check_page(config, page, scroll)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "scroll {:.0}px, viewport {:.0}px: {} of {} marked elements visible",
        report.scroll_top,
        report.viewport_height,
        report.pass.revealed + report.pass.already_visible,
        report.pass.examined
    );
    for element in report.elements.iter().filter(|e| e.marked) {
        let name = element
            .id
            .as_deref()
            .map(|id| format!("#{}", id))
            .unwrap_or_else(|| format!("[{}]", element.index));
        println!(
            "  {} {:<20} top {:>7.0}  {}",
            if element.visible { "+" } else { "-" },
            name,
            element.top,
            element.label
        );
    }
    Ok(())
}
