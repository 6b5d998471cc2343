use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use yeki_core::Document;

use crate::app::App;
use crate::theme::Palette;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let (shown, marked) = app.reveal_counts();
        let mode_str = if app.needs_fast_update() { "SCROLLING" } else { "IDLE" };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            format!(
                " {} | {:.0}/{:.0}px | revealed {}/{}",
                mode_str,
                app.page.scroll_top(),
                app.page.max_scroll_top(),
                shown,
                marked
            )
        };

        let help_hint = " q:quit j/k:scroll tab:link enter:go ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let mode_color = if app.needs_fast_update() { Palette::GREEN } else { Palette::FG0 };

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(mode_color).bg(Palette::BG2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(Palette::BG2)),
            Span::styled(help_hint, Style::default().fg(Palette::GREY2).bg(Palette::BG2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
