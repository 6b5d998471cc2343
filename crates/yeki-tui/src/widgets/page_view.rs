use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::Palette;

/// Draws the part of the page inside the viewport.
///
/// Marked elements that have not been revealed yet are drawn as empty
/// placeholders, the way they would sit invisible on the real page.
pub struct PageViewWidget;

impl PageViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(Block::default().style(Style::default().bg(Palette::BG0)), area);

        let scroll_top = app.page.scroll_top;
        let px_per_row = app.px_per_row();

        for (id, element) in app.elements_in_view() {
            let start = ((element.top - scroll_top) / px_per_row).floor().max(0.0) as u16;
            let end = ((element.bottom() - scroll_top) / px_per_row)
                .ceil()
                .min(area.height as f64) as u16;
            if end <= start || start >= area.height {
                continue;
            }

            let rect = Rect {
                x: area.x,
                y: area.y + start,
                width: area.width,
                height: end - start,
            };

            let title = element
                .id
                .as_deref()
                .map(|id| format!(" #{} ", id))
                .unwrap_or_default();

            if app.is_shown(id) {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(Palette::AQUA));
                let lines = vec![
                    Line::from(Span::styled(
                        element.label.clone(),
                        Style::default().fg(Palette::FG0).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        element.classes.join(" "),
                        Style::default().fg(Palette::GREY2),
                    )),
                ];
                frame.render_widget(Paragraph::new(lines).block(block), rect);
            } else {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(Palette::GREY0));
                frame.render_widget(block, rect);
            }
        }
    }
}
