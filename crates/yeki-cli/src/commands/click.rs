use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use yeki_core::scroll::ScrollConfigExt;
use yeki_core::{AppConfig, ClickOutcome, Document, ScrollUiController, StaticPage};

#[derive(Debug, Serialize)]
pub struct Frame {
    pub at_ms: u64,
    pub scroll_top: f64,
}

#[derive(Debug, Serialize)]
pub struct ClickReport {
    pub href: String,
    pub outcome: ClickOutcome,
    pub start_scroll: f64,
    pub final_scroll: f64,
    pub frames: Vec<Frame>,
}

/// Click `href` after the install pass and run the animation to completion
pub fn simulate_click(config: &AppConfig, mut page: StaticPage, href: &str) -> Result<ClickReport> {
    let mut controller = ScrollUiController::new(config);
    controller.install(&mut page)?;

    let start_scroll = page.scroll_top();
    let outcome = controller.on_click(&mut page, href, Duration::ZERO)?;

    let step = config.scroll.animation_tick_duration();
    let mut now = Duration::ZERO;
    let mut frames = Vec::new();
    while controller.is_animating() {
        now += step;
        controller.tick(&mut page, now)?;
        frames.push(Frame {
            at_ms: now.as_millis() as u64,
            scroll_top: page.scroll_top(),
        });
    }

    Ok(ClickReport {
        href: href.to_string(),
        outcome,
        start_scroll,
        final_scroll: page.scroll_top(),
        frames,
    })
}

pub fn run(config: &AppConfig, path: &Path, href: &str, show_frames: bool, json: bool) -> Result<()> {
    let page = super::load_page(path)?;
    let report = simulate_click(config, page, href)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &report.outcome {
        ClickOutcome::Default => println!("{}: left to default navigation", href),
        ClickOutcome::Suppressed { target: None } => {
            println!("{}: navigation suppressed, no matching element", href)
        }
        ClickOutcome::Suppressed { target: Some(target) } => println!(
            "{}: element at {:.0}px, scrolled {:.0}px -> {:.0}px in {} frames",
            href,
            target.element_top,
            report.start_scroll,
            report.final_scroll,
            report.frames.len()
        ),
    }

    if show_frames {
        for frame in &report.frames {
            println!("  {:>5}ms {:>8.1}", frame.at_ms, frame.scroll_top);
        }
    }
    Ok(())
}
